use nalgebra::Isometry2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Path, ShapeFactory};
use crate::math::{wrap_arc_length, Point2};
use crate::operations::query::ArcLengthIndex;

/// How items are spread along a closed path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingStrategy {
    /// Items and equal gaps alternate around the whole path.
    #[default]
    Even,
    /// Same arithmetic as [`SpacingStrategy::Even`]; used for tab slots.
    Simple,
    /// Items at `i × L / (count − 1)`, so the first and last coincide on a
    /// closed path.
    Endpoints,
}

/// Pose of one placed item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    /// Arc length of the item centre, in `[0, total_length)`.
    pub arc_length: f64,
    pub position: Point2,
    /// Direction of travel at the centre, in degrees.
    pub angle_degrees: f64,
}

impl Placement {
    /// Rigid transform taking item-local coordinates to the path frame.
    #[must_use]
    pub fn isometry(&self) -> Isometry2<f64> {
        Isometry2::new(self.position.coords, self.angle_degrees.to_radians())
    }
}

/// An item outline paired with its pose. The outline stays in item-local
/// coordinates; applying the pose is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShape {
    pub placement: Placement,
    pub shape: Path,
}

/// Distributes `count` items of a given extent along a closed path.
#[derive(Debug)]
pub struct PatternAlongPath<'a> {
    index: &'a ArcLengthIndex,
    count: usize,
    item_extent: f64,
    start_offset: f64,
    strategy: SpacingStrategy,
}

impl<'a> PatternAlongPath<'a> {
    #[must_use]
    pub fn new(index: &'a ArcLengthIndex, count: usize, item_extent: f64) -> Self {
        Self {
            index,
            count,
            item_extent,
            start_offset: 0.0,
            strategy: SpacingStrategy::Even,
        }
    }

    #[must_use]
    pub fn with_start_offset(mut self, start_offset: f64) -> Self {
        self.start_offset = start_offset;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SpacingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Gap between neighbouring items for the even and simple strategies.
    ///
    /// Negative when the items do not fit; the layout then overlaps.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gap(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.index.total_length() - n * self.item_extent) / n
    }

    /// Computes one placement per item. Zero items yields an empty list.
    #[must_use]
    pub fn execute(&self) -> Vec<Placement> {
        (0..self.count)
            .map(|i| {
                let s = self.centre_offset(i);
                let pp = self.index.point_at_length(s);
                Placement {
                    index: i,
                    arc_length: s,
                    position: pp.point,
                    angle_degrees: pp.angle_degrees(),
                }
            })
            .collect()
    }

    /// Computes the placements and builds each item's outline.
    #[must_use]
    pub fn place_shapes<F: ShapeFactory + ?Sized>(&self, factory: &F) -> Vec<PlacedShape> {
        self.execute()
            .into_iter()
            .map(|placement| PlacedShape {
                shape: factory.build(placement.index),
                placement,
            })
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn centre_offset(&self, i: usize) -> f64 {
        let total = self.index.total_length();
        let fi = i as f64;
        match self.strategy {
            SpacingStrategy::Even | SpacingStrategy::Simple => {
                let item_start =
                    wrap_arc_length(self.start_offset + fi * (self.gap() + self.item_extent), total);
                wrap_arc_length(item_start + self.item_extent / 2.0, total)
            }
            SpacingStrategy::Endpoints => {
                let base = if self.count > 1 {
                    total * fi / (self.count - 1) as f64
                } else {
                    0.0
                };
                wrap_arc_length(base + self.start_offset, total)
            }
        }
    }
}
