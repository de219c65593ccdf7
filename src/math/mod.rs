pub mod arc_2d;
pub mod bezier;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Two points closer than this are treated as the same outline vertex.
pub const COINCIDENT_EPS: f64 = 1e-3;

/// Wraps an arc-length coordinate into `[0, total)`.
///
/// Returns `0.0` for a zero-length path.
#[must_use]
pub fn wrap_arc_length(s: f64, total: f64) -> f64 {
    if total <= TOLERANCE {
        return 0.0;
    }
    let wrapped = s.rem_euclid(total);
    // rem_euclid can round up to `total` for tiny negative inputs.
    if wrapped >= total {
        0.0
    } else {
        wrapped
    }
}
