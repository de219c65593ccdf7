use super::{Point2, TOLERANCE};

/// Strict segment-segment crossing test in 2D.
///
/// Returns `(point, t, u)` only when both parameters lie in the open
/// interval `(0, 1)`: touching at an endpoint is not a crossing. Parallel
/// and collinear segments never intersect.
#[must_use]
pub fn segment_crossing_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = (d.x * db.y - d.y * db.x) / cross;
    let u = (d.x * da.y - d.y * da.x) / cross;

    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some((a0 + da * t, t, u))
    } else {
        None
    }
}
