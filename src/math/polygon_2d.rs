use super::{Point2, Vector2, TOLERANCE};

/// Rotational sense of a closed polygon.
///
/// `Ccw` is reported for non-negative shoelace area (counter-clockwise in a
/// y-up frame); the offset engine only relies on the sign being consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Ccw,
    Cw,
}

impl Winding {
    /// Returns `+1.0` for [`Winding::Ccw`] and `-1.0` for [`Winding::Cw`].
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Ccw => 1.0,
            Self::Cw => -1.0,
        }
    }
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned enclosed area of a polygon.
#[must_use]
pub fn area_2d(points: &[Point2]) -> f64 {
    signed_area_2d(points).abs()
}

/// Global winding of a closed polygon. Zero-area input counts as CCW.
#[must_use]
pub fn winding(points: &[Point2]) -> Winding {
    if signed_area_2d(points) < 0.0 {
        Winding::Cw
    } else {
        Winding::Ccw
    }
}

/// Sum of edge lengths of a closed polygon, including the closing edge.
#[must_use]
pub fn closed_perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum()
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Normalizes `v`, returning the zero vector for zero-length input.
#[must_use]
pub fn unit_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        Vector2::zeros()
    }
}

/// Rotates a direction 90° clockwise in a y-up frame: `(x, y) -> (y, -x)`.
#[must_use]
pub fn right_normal(dir: Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}
