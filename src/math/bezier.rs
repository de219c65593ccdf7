use super::{Point2, Vector2, COINCIDENT_EPS};

/// Relative tolerance used for Bézier arc-length estimation.
pub const ARC_LENGTH_TOLERANCE: f64 = 0.01;

/// Upper bound on Simpson subdivisions during arc-length estimation.
const SIMPSON_MAX_INTERVALS: usize = 4096;

/// A cubic Bézier segment `p0 → p3` with control points `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl CubicBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// A straight chord encoded as a cubic: both controls sit on their endpoints.
    #[must_use]
    pub fn line(from: Point2, to: Point2) -> Self {
        Self::new(from, from, to, to)
    }

    /// Exact degree elevation of a quadratic segment.
    #[must_use]
    pub fn from_quadratic(q: &QuadraticBezier) -> Self {
        let c1 = q.p0 + (q.p1 - q.p0) * (2.0 / 3.0);
        let c2 = q.p2 + (q.p1 - q.p2) * (2.0 / 3.0);
        Self::new(q.p0, c1, c2, q.p2)
    }

    /// Evaluates the curve at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point2::from(
            self.p0.coords * a + self.p1.coords * b + self.p2.coords * c + self.p3.coords * d,
        )
    }

    /// First derivative `B'(t)`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        let mt = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * mt * mt)
            + (self.p2 - self.p1) * (6.0 * mt * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Whether both controls coincide with their nearest endpoint, i.e. the
    /// segment is a straight chord and `B'` vanishes at the ends.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        (self.p1 - self.p0).norm() < COINCIDENT_EPS && (self.p3 - self.p2).norm() < COINCIDENT_EPS
    }

    #[must_use]
    pub fn chord_length(&self) -> f64 {
        (self.p3 - self.p0).norm()
    }

    /// Length of the control polygon `p0 → p1 → p2 → p3`.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p1).norm() + (self.p3 - self.p2).norm()
    }

    /// Estimates the arc length with adaptive Simpson integration of `|B'(t)|`.
    ///
    /// `tolerance` is relative: refinement stops once two successive estimates
    /// differ by less than `tolerance × estimate`.
    #[must_use]
    pub fn arc_length(&self, tolerance: f64) -> f64 {
        if self.is_straight() {
            return self.chord_length();
        }
        simpson(|t| self.derivative(t).norm(), tolerance)
    }
}

/// A quadratic Bézier segment `p0 → p2` with control point `p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub p0: Point2,
    pub p1: Point2,
    pub p2: Point2,
}

impl QuadraticBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluates the curve at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        Point2::from(
            self.p0.coords * (mt * mt) + self.p1.coords * (2.0 * mt * t) + self.p2.coords * (t * t),
        )
    }

    #[must_use]
    pub fn chord_length(&self) -> f64 {
        (self.p2 - self.p0).norm()
    }

    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p1).norm()
    }
}

/// Number of straight sub-segments used to flatten a curve so the chordal
/// deviation stays bounded by `tolerance`.
///
/// The curve length is estimated as the mean of chord and control-polygon
/// length; at least 2 sub-segments are always produced.
#[must_use]
pub fn subdivision_count(chord_length: f64, control_length: f64, tolerance: f64) -> usize {
    if tolerance <= 0.0 {
        return 2;
    }
    let approx_length = (chord_length + control_length) / 2.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = (approx_length / tolerance) as usize;
    n.max(2)
}

/// Composite Simpson integration of `f` over `[0, 1]`, doubling the interval
/// count until the relative change falls below `tolerance`.
#[allow(clippy::cast_precision_loss)]
fn simpson<F: Fn(f64) -> f64>(f: F, tolerance: f64) -> f64 {
    let mut n = 2usize;
    let mut multiplier = 1.0 / 6.0;
    let end_sum = f(0.0) + f(1.0);
    let mut interval = 0.5;
    let mut a_sum = 0.0;
    let mut b_sum = f(interval);
    let mut est1 = multiplier * (end_sum + 2.0 * a_sum + 4.0 * b_sum);
    let mut est0 = 2.0 * est1;

    while n < SIMPSON_MAX_INTERVALS && est1.abs() > 0.0 && ((est1 - est0) / est1).abs() > tolerance
    {
        n *= 2;
        multiplier /= 2.0;
        interval /= 2.0;
        a_sum += b_sum;
        b_sum = (1..n).step_by(2).map(|i| f(i as f64 * interval)).sum();
        est0 = est1;
        est1 = multiplier * (end_sum + 2.0 * a_sum + 4.0 * b_sum);
    }
    est1
}
