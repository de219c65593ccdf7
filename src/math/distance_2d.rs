use super::Point2;

/// Returns the distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the point distance `|p - a|` when `a` and `b` coincide.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let numerator = (d.y * p.x - d.x * p.y + b.x * a.y - b.y * a.x).abs();
    numerator / len_sq.sqrt()
}

/// Returns the minimum distance from `p` to the segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        return (p - a).norm();
    }

    // Project onto the segment, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Distance from `p` to the nearest edge of a closed polygon.
#[must_use]
pub fn point_to_polygon_dist(p: &Point2, polygon: &[Point2]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| point_to_segment_dist(p, &polygon[i], &polygon[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_distance_is_unclamped() {
        let d = point_to_line_dist(
            &Point2::new(5.0, 3.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn line_distance_degenerate_line() {
        let d = point_to_line_dist(
            &Point2::new(3.0, 4.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(0.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_clamps_to_endpoint() {
        let d = point_to_segment_dist(
            &Point2::new(4.0, 4.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn polygon_distance_uses_nearest_edge() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let d = point_to_polygon_dist(&Point2::new(2.0, 5.0), &square);
        assert!((d - 2.0).abs() < 1e-12);
    }
}
