use std::f64::consts::PI;

use tracing::debug;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::Polyline;
use crate::math::polygon_2d::{
    closed_perimeter, right_normal, signed_area_2d, unit_or_zero, winding, Winding,
};
use crate::math::{Point2, COINCIDENT_EPS};

use super::self_intersect::{LargestLoopRepair, LoopRepair};
use super::simplify::simplify_closed;

/// Upper bound on the miter scale at sharp corners.
const MITER_LIMIT: f64 = 2.0;

/// Vertices whose interior angle exceeds this are nearly straight runs and
/// move by exactly `|distance|`.
const STRAIGHT_TURN: f64 = PI * 0.9;

/// Minimum `sin(turn / 2)` before the miter scale saturates at the limit.
const MIN_HALF_TURN_SIN: f64 = 0.01;

/// Offsets a closed polygon by a signed distance.
///
/// # Sign convention
///
/// Positive distance grows the polygon, negative shrinks it. The sign is
/// interpreted against the polygon's computed winding, so storage order of
/// the points does not change the result.
///
/// # Algorithm
///
/// 1. Drop a closing point that duplicates the first one (within 0.001)
/// 2. Pre-simplify with RDP at `2 × simplify_tolerance`
/// 3. Move each vertex along its averaged-tangent normal, scaled by a miter
///    factor capped at [`MITER_LIMIT`]
/// 4. Remove self-intersection loops with the configured [`LoopRepair`]
/// 5. Simplify again at `simplify_tolerance`
///
/// Every stage must leave at least 3 distinct points, and the result must
/// keep a non-zero area with the input's orientation.
#[derive(Debug)]
pub struct PolygonOffset2D<R = LargestLoopRepair> {
    points: Vec<Point2>,
    distance: f64,
    simplify_tolerance: f64,
    repair: R,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation with the default repair
    /// strategy and a simplification tolerance of 0.05.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self {
            points,
            distance,
            simplify_tolerance: crate::tessellation::DEFAULT_CHORD_TOLERANCE,
            repair: LargestLoopRepair::default(),
        }
    }

    /// Creates the operation from a polyline; the closed flag is ignored since
    /// the input is always treated as a closed ring.
    #[must_use]
    pub fn from_polyline(polyline: &Polyline, distance: f64) -> Self {
        Self::new(polyline.points.clone(), distance)
    }
}

impl<R: LoopRepair> PolygonOffset2D<R> {
    /// Sets the simplification tolerance used by both RDP passes.
    #[must_use]
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    /// Swaps the self-intersection repair strategy.
    #[must_use]
    pub fn with_repair<S: LoopRepair>(self, repair: S) -> PolygonOffset2D<S> {
        PolygonOffset2D {
            points: self.points,
            distance: self.distance,
            simplify_tolerance: self.simplify_tolerance,
            repair,
        }
    }

    /// Executes the offset, returning a closed polyline.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if the distance is not finite or the
    ///   tolerance is not a positive finite number
    /// - `GeometryError::Degenerate` if the input ring has near-zero perimeter
    /// - `GeometryError::InsufficientPoints` if any stage leaves fewer than 3
    ///   distinct points
    /// - `GeometryError::Degenerate` if the result has no area left or is
    ///   inverted, which happens when an inset exceeds the polygon's width
    pub fn execute(&self) -> Result<Polyline> {
        if !self.distance.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset distance must be finite, got {}",
                self.distance
            ))
            .into());
        }
        if !(self.simplify_tolerance.is_finite() && self.simplify_tolerance > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "simplify tolerance must be positive, got {}",
                self.simplify_tolerance
            ))
            .into());
        }

        let mut points = self.points.clone();
        require_points("input", &points)?;

        let perimeter = closed_perimeter(&points);
        if perimeter < COINCIDENT_EPS {
            return Err(GeometryError::Degenerate(format!(
                "polygon perimeter {perimeter} is too small to offset"
            ))
            .into());
        }

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if (last - first).norm() < COINCIDENT_EPS {
                points.pop();
            }
        }
        require_points("deduplicate", &points)?;

        let simplified = simplify_closed(&points, self.simplify_tolerance * 2.0);
        debug!(
            before = points.len(),
            after = simplified.len(),
            "pre-simplified offset input"
        );
        require_points("pre-simplify", &simplified)?;

        let raw = offset_vertices(&simplified, self.distance);
        require_points("offset", &raw)?;

        let outcome = self.repair.repair(raw);
        let repaired = drop_coincident(outcome.points);
        require_points("repair", &repaired)?;

        let result = drop_coincident(simplify_closed(&repaired, self.simplify_tolerance));
        require_points("simplify", &result)?;
        require_same_sense(&simplified, &result)?;

        debug!(
            distance = self.distance,
            points = result.len(),
            repairs = outcome.iterations,
            converged = outcome.converged,
            "offset polygon"
        );
        Ok(Polyline::new(result, true))
    }
}

/// Removes points that coincide with their predecessor, including the
/// closing pair.
fn drop_coincident(points: Vec<Point2>) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last().is_none_or(|last| (p - last).norm() >= COINCIDENT_EPS) {
            ring.push(p);
        }
    }
    while ring.len() > 1 {
        match (ring.first(), ring.last()) {
            (Some(first), Some(last)) if (last - first).norm() < COINCIDENT_EPS => {
                ring.pop();
            }
            _ => break,
        }
    }
    ring
}

/// Fails when the offset ring has no area left or encloses it with the
/// opposite sense to the input, as happens when an inset overshoots.
fn require_same_sense(input: &[Point2], result: &[Point2]) -> Result<()> {
    let before = signed_area_2d(input);
    let after = signed_area_2d(result);
    if after.abs() <= COINCIDENT_EPS * closed_perimeter(result) {
        return Err(GeometryError::Degenerate(format!(
            "offset ring collapsed to area {after}"
        ))
        .into());
    }
    if (before < 0.0) != (after < 0.0) {
        return Err(GeometryError::Degenerate(
            "offset ring is inverted relative to its input".to_owned(),
        )
        .into());
    }
    Ok(())
}

fn require_points(stage: &'static str, points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints {
            stage,
            count: points.len(),
        }
        .into());
    }
    Ok(())
}

/// Moves every vertex of a closed ring along its miter direction.
fn offset_vertices(points: &[Point2], distance: f64) -> Vec<Point2> {
    let ring_winding = winding(points);
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            offset_vertex(&points[i], prev, next, distance, ring_winding)
        })
        .collect()
}

fn offset_vertex(
    point: &Point2,
    prev: &Point2,
    next: &Point2,
    distance: f64,
    ring_winding: Winding,
) -> Point2 {
    let e1 = unit_or_zero(point - prev);
    let e2 = unit_or_zero(next - point);
    let tangent = unit_or_zero(e1 + e2);

    let mut direction = right_normal(tangent);
    let w = ring_winding.sign();
    if (distance > 0.0 && w < 0.0) || (distance < 0.0 && w > 0.0) {
        direction = -direction;
    }

    point + direction * (distance.abs() * miter_scale(e1.dot(&e2)))
}

/// Miter scale for a vertex whose unit edge directions have dot product
/// `cos_between`.
fn miter_scale(cos_between: f64) -> f64 {
    let turn = PI - cos_between.clamp(-1.0, 1.0).acos();
    if turn > STRAIGHT_TURN {
        return 1.0;
    }
    let half_sin = (turn / 2.0).sin();
    if half_sin.abs() > MIN_HALF_TURN_SIN {
        (1.0 / half_sin).min(MITER_LIMIT)
    } else {
        MITER_LIMIT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BoxcutError;
    use crate::math::distance_2d::point_to_polygon_dist;
    use crate::math::polygon_2d::{area_2d, rotate_to_canonical_start};
    use crate::operations::offset::RepairOutcome;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn square(side: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ]
    }

    #[test]
    fn square_inset_by_ten() {
        let result = PolygonOffset2D::new(square(100.0), -10.0).execute().unwrap();
        assert!(result.closed);
        assert_eq!(result.len(), 4);
        assert_relative_eq!(area_2d(&result.points), 6400.0, max_relative = 0.03);
        let original = square(100.0);
        for p in &result.points {
            assert_relative_eq!(point_to_polygon_dist(p, &original), 10.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn square_outset_grows() {
        let result = PolygonOffset2D::new(square(100.0), 5.0).execute().unwrap();
        assert_relative_eq!(area_2d(&result.points), 110.0 * 110.0, max_relative = 1e-9);
        let canonical = rotate_to_canonical_start(&result.points);
        assert_relative_eq!(canonical[0], Point2::new(-5.0, -5.0), epsilon = 1e-9);
    }

    #[test]
    fn closing_duplicate_is_dropped() {
        let mut pts = square(50.0);
        pts.push(Point2::new(0.0, 0.0005));
        let result = PolygonOffset2D::new(pts, -5.0).execute().unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn collinear_midpoints_are_simplified_away() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(25.0, 0.0),
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 50.0),
            Point2::new(0.0, 50.0),
        ];
        let result = PolygonOffset2D::new(pts, -5.0).execute().unwrap();
        assert_eq!(result.len(), 4);
        assert_relative_eq!(area_2d(&result.points), 1600.0, max_relative = 1e-9);
    }

    #[test]
    fn miter_scale_limits() {
        assert_relative_eq!(miter_scale(1.0), 1.0);
        assert_relative_eq!(miter_scale(0.0), std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(miter_scale(-0.99), MITER_LIMIT);
    }

    #[test]
    fn collapsed_spike_is_repaired() {
        // A thin spike on a base whose two shoulders sit at different
        // heights. Insetting by 3 inverts the spike and its walls cross the
        // left shoulder.
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 10.0),
            Point2::new(17.0, 10.0),
            Point2::new(15.0, 30.0),
            Point2::new(13.0, 12.0),
            Point2::new(0.0, 12.0),
        ];
        let result = PolygonOffset2D::new(pts.clone(), -3.0).execute().unwrap();
        let n = result.len();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let crossing = crate::math::intersect_2d::segment_crossing_2d(
                    &result.points[i],
                    &result.points[(i + 1) % n],
                    &result.points[j],
                    &result.points[(j + 1) % n],
                );
                assert!(crossing.is_none(), "edges {i} and {j} still cross");
            }
        }
        assert!(result.points.iter().all(|p| p.y < 12.0));
        assert!(area_2d(&result.points) < area_2d(&pts));
    }

    #[test]
    fn too_few_points_is_invalid_geometry() {
        let err = PolygonOffset2D::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], 1.0)
            .execute()
            .unwrap_err();
        assert!(err.is_invalid_geometry());
        assert!(matches!(
            err,
            BoxcutError::Geometry(GeometryError::InsufficientPoints { stage: "input", count: 2 })
        ));
    }

    #[test]
    fn collinear_input_fails_after_pre_simplify() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(7.0, 0.0),
        ];
        let err = PolygonOffset2D::new(pts, 1.0).execute().unwrap_err();
        assert!(matches!(
            err,
            BoxcutError::Geometry(GeometryError::InsufficientPoints {
                stage: "pre-simplify",
                ..
            })
        ));
    }

    #[test]
    fn tiny_ring_is_degenerate() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0001, 0.0),
            Point2::new(0.0001, 0.0001),
        ];
        let err = PolygonOffset2D::new(pts, 1.0).execute().unwrap_err();
        assert!(matches!(err, BoxcutError::Geometry(GeometryError::Degenerate(_))));
    }

    fn rect(w: f64, h: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, h),
            Point2::new(0.0, h),
        ]
    }

    #[test]
    fn inset_to_a_line_is_invalid_geometry() {
        let err = PolygonOffset2D::new(rect(20.0, 10.0), -5.0)
            .execute()
            .unwrap_err();
        assert!(err.is_invalid_geometry());
        assert!(matches!(
            err,
            BoxcutError::Geometry(GeometryError::InsufficientPoints { stage: "repair", .. })
        ));
    }

    #[test]
    fn overshooting_inset_is_degenerate() {
        // Insetting by 7 turns the 20 x 10 rectangle inside out.
        let err = PolygonOffset2D::new(rect(20.0, 10.0), -7.0)
            .execute()
            .unwrap_err();
        assert!(matches!(err, BoxcutError::Geometry(GeometryError::Degenerate(_))));
    }

    #[test]
    fn result_has_no_coincident_neighbours() {
        let result = PolygonOffset2D::new(rect(20.0, 10.0), -4.9).execute().unwrap();
        let n = result.len();
        assert!(n >= 3);
        for i in 0..n {
            let gap = (result.points[(i + 1) % n] - result.points[i]).norm();
            assert!(gap >= COINCIDENT_EPS, "point {i} coincides with its successor");
        }
        assert_relative_eq!(area_2d(&result.points), 10.2 * 0.2, max_relative = 1e-9);
    }

    #[test]
    fn drop_coincident_handles_wrap() {
        let ring = drop_coincident(vec![
            Point2::new(5.0, 5.0),
            Point2::new(15.0, 5.0),
            Point2::new(15.0, 5.0005),
            Point2::new(5.0, 5.0),
        ]);
        assert_eq!(ring, vec![Point2::new(5.0, 5.0), Point2::new(15.0, 5.0)]);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let err = PolygonOffset2D::new(square(10.0), f64::NAN).execute().unwrap_err();
        assert!(matches!(err, BoxcutError::Operation(_)));
        let err = PolygonOffset2D::new(square(10.0), 1.0)
            .with_simplify_tolerance(0.0)
            .execute()
            .unwrap_err();
        assert!(matches!(err, BoxcutError::Operation(_)));
    }

    struct NoRepair;

    impl LoopRepair for NoRepair {
        fn repair(&self, points: Vec<Point2>) -> RepairOutcome {
            RepairOutcome {
                points,
                iterations: 0,
                converged: true,
            }
        }
    }

    #[test]
    fn repair_strategy_is_pluggable() {
        let result = PolygonOffset2D::new(square(20.0), -2.0)
            .with_repair(NoRepair)
            .execute()
            .unwrap();
        assert_relative_eq!(area_2d(&result.points), 256.0, max_relative = 1e-9);
    }

    proptest! {
        #[test]
        fn storage_order_does_not_change_result(
            w in 20.0f64..200.0,
            h in 20.0f64..200.0,
            d in -5.0f64..5.0,
        ) {
            let rect = vec![
                Point2::new(0.0, 0.0),
                Point2::new(w, 0.0),
                Point2::new(w, h),
                Point2::new(0.0, h),
            ];
            let reversed: Vec<Point2> = rect.iter().rev().copied().collect();
            let a = PolygonOffset2D::new(rect, d).execute().unwrap();
            let b = PolygonOffset2D::new(reversed, d).execute().unwrap();
            prop_assert!((area_2d(&a.points) - area_2d(&b.points)).abs() < 1e-6);
            let ca = rotate_to_canonical_start(&a.points);
            let cb = rotate_to_canonical_start(&b.points);
            prop_assert!((ca[0] - cb[0]).norm() < 1e-6);
        }

        #[test]
        fn convex_outset_vertices_sit_near_distance(
            r in 20.0f64..100.0,
            sides in 5usize..12,
            d in 0.5f64..3.0,
        ) {
            #[allow(clippy::cast_precision_loss)]
            let polygon: Vec<Point2> = (0..sides)
                .map(|i| {
                    let a = std::f64::consts::TAU * i as f64 / sides as f64;
                    Point2::new(r * a.cos(), r * a.sin())
                })
                .collect();
            let result = PolygonOffset2D::new(polygon.clone(), d).execute().unwrap();
            for p in &result.points {
                let dist = point_to_polygon_dist(p, &polygon);
                prop_assert!(dist >= d - 1e-6 && dist <= d * MITER_LIMIT + 1e-6);
            }
        }
    }
}
