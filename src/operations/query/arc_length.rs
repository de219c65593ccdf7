use crate::geometry::Path;
use crate::math::bezier::{CubicBezier, ARC_LENGTH_TOLERANCE};
use crate::math::polygon_2d::unit_or_zero;
use crate::math::{wrap_arc_length, Point2, Vector2};

/// A point on a path together with the unit direction of travel there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub point: Point2,
    pub tangent: Vector2,
}

impl PathPoint {
    /// Direction of travel in degrees, `atan2(ty, tx)`.
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.tangent.y.atan2(self.tangent.x).to_degrees()
    }
}

/// One cubic segment of the indexed path with its arc-length span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSegment {
    pub bezier: CubicBezier,
    /// Cumulative length at the segment start.
    pub start: f64,
    pub length: f64,
}

impl IndexedSegment {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Position and tangent at local parameter `t`.
    ///
    /// Straight chords are interpolated linearly and use the chord direction,
    /// since `B'` vanishes at their ends.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> PathPoint {
        let b = &self.bezier;
        if b.is_straight() {
            return PathPoint {
                point: b.p0 + (b.p3 - b.p0) * t,
                tangent: unit_or_zero(b.p3 - b.p0),
            };
        }
        PathPoint {
            point: b.point_at(t),
            tangent: unit_or_zero(b.derivative(t)),
        }
    }
}

/// Cumulative arc-length table over a path's cubic decomposition.
///
/// Segment lengths are estimated numerically with a fixed relative tolerance.
/// Inside a segment, the local parameter is found by linear interpolation of
/// arc length, which is exact for straight chords and approximate for curves.
#[derive(Debug, Clone, Default)]
pub struct ArcLengthIndex {
    segments: Vec<IndexedSegment>,
    total_length: f64,
}

impl ArcLengthIndex {
    /// Builds the index for `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self::from_segments(&path.to_cubic_segments())
    }

    /// Builds the index from an already decomposed segment list.
    #[must_use]
    pub fn from_segments(beziers: &[CubicBezier]) -> Self {
        let mut segments = Vec::with_capacity(beziers.len());
        let mut total_length = 0.0;
        for bezier in beziers {
            let length = bezier.arc_length(ARC_LENGTH_TOLERANCE);
            segments.push(IndexedSegment {
                bezier: *bezier,
                start: total_length,
                length,
            });
            total_length += length;
        }
        Self {
            segments,
            total_length,
        }
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    #[must_use]
    pub fn segments(&self) -> &[IndexedSegment] {
        &self.segments
    }

    /// Point and unit tangent at arc length `s` from the path start.
    ///
    /// Offsets at or past the total length return the last path point with
    /// the tangent at the end of the last segment. An empty path yields the
    /// origin heading along +x.
    #[must_use]
    pub fn point_at_length(&self, s: f64) -> PathPoint {
        if s < self.total_length {
            // Zero-length segments carry no direction; skip them.
            if let Some(seg) = self
                .segments
                .iter()
                .find(|seg| seg.length > 0.0 && seg.end() >= s)
            {
                let t = ((s - seg.start) / seg.length).clamp(0.0, 1.0);
                return seg.evaluate(t);
            }
        }
        self.end_point()
    }

    /// Like [`ArcLengthIndex::point_at_length`], but wraps `s` modulo the
    /// total length first.
    #[must_use]
    pub fn point_at_wrapped(&self, s: f64) -> PathPoint {
        self.point_at_length(wrap_arc_length(s, self.total_length))
    }

    fn end_point(&self) -> PathPoint {
        let Some(last) = self.segments.iter().rev().find(|seg| seg.length > 0.0) else {
            let point = self.segments.last().map_or(Point2::origin(), |seg| seg.bezier.p3);
            return PathPoint {
                point,
                tangent: Vector2::new(1.0, 0.0),
            };
        };
        let end = last.evaluate(1.0);
        let tangent = if end.tangent.norm() > 0.0 {
            end.tangent
        } else {
            Vector2::new(1.0, 0.0)
        };
        PathPoint {
            point: self.segments.last().map_or(end.point, |seg| seg.bezier.p3),
            tangent,
        }
    }
}
