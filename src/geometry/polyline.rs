use crate::math::polygon_2d::{closed_perimeter, signed_area_2d};
use crate::math::Point2;

use super::path::Path;

/// An ordered list of points, optionally closed (last connects to first).
///
/// The offset engine consumes and produces closed polylines; the flattener
/// produces open ones whose closure is whatever the source path encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point2>,
    pub closed: bool,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates a closed polyline from `(x, y)` pairs.
    #[must_use]
    pub fn closed_from_xy(coords: &[(f64, f64)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            closed: true,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total edge length; includes the closing edge when closed.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        if self.closed {
            closed_perimeter(&self.points)
        } else {
            self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
        }
    }

    /// Signed shoelace area, treating the points as a closed ring.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Returns a copy with the point order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
            closed: self.closed,
        }
    }

    /// Converts to straight-line path commands; closed polylines end with `Z`.
    #[must_use]
    pub fn to_path(&self) -> Path {
        if self.closed {
            return Path::from_polygon(&self.points);
        }
        let Some((first, rest)) = self.points.split_first() else {
            return Path::new();
        };
        rest.iter()
            .fold(Path::new().move_to(first.x, first.y), |path, p| {
                path.line_to(p.x, p.y)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::PathCommand;

    #[test]
    fn closed_perimeter_and_area() {
        let pl = Polyline::closed_from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        assert!((pl.perimeter() - 6.0).abs() < 1e-12);
        assert!((pl.signed_area() - 2.0).abs() < 1e-12);
        assert!((pl.reversed().signed_area() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn open_perimeter_skips_closing_edge() {
        let pl = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)], false);
        assert!((pl.perimeter() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn to_path_closed_ends_with_close() {
        let pl = Polyline::closed_from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let path = pl.to_path();
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn to_path_open_has_no_close() {
        let pl = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], false);
        let path = pl.to_path();
        assert_eq!(path.len(), 2);
        assert!(!path.commands().contains(&PathCommand::Close));
    }
}
