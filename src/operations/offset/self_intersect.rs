use tracing::{debug, warn};

use crate::math::intersect_2d::segment_crossing_2d;
use crate::math::polygon_2d::area_2d;
use crate::math::Point2;

/// Iteration cap for [`LargestLoopRepair`].
pub const DEFAULT_MAX_REPAIR_ITERATIONS: usize = 100;

/// Result of a self-intersection repair pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub points: Vec<Point2>,
    /// Number of crossings removed.
    pub iterations: usize,
    /// `false` when the pass stopped at its iteration cap; `points` is then
    /// the best candidate found so far.
    pub converged: bool,
}

/// Strategy for turning a self-intersecting closed ring into a simple one.
pub trait LoopRepair {
    fn repair(&self, points: Vec<Point2>) -> RepairOutcome;
}

/// Greedy repair: at the first crossing, split the ring into the part that
/// bypasses the loop and the loop itself, keep whichever encloses more area,
/// and rescan.
#[derive(Debug, Clone, Copy)]
pub struct LargestLoopRepair {
    pub max_iterations: usize,
}

impl Default for LargestLoopRepair {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_REPAIR_ITERATIONS,
        }
    }
}

impl LoopRepair for LargestLoopRepair {
    fn repair(&self, mut points: Vec<Point2>) -> RepairOutcome {
        if points.len() < 4 {
            return RepairOutcome {
                points,
                iterations: 0,
                converged: true,
            };
        }

        let mut iterations = 0;
        while iterations < self.max_iterations {
            let Some((i, j, crossing)) = find_first_crossing(&points) else {
                if iterations > 0 {
                    debug!(iterations, remaining = points.len(), "removed self-intersections");
                }
                return RepairOutcome {
                    points,
                    iterations,
                    converged: true,
                };
            };
            iterations += 1;

            let (bypass, the_loop) = split_at_crossing(&points, i, j, crossing);
            points = if area_2d(&bypass) >= area_2d(&the_loop) {
                bypass
            } else {
                the_loop
            };
        }

        let converged = find_first_crossing(&points).is_none();
        if !converged {
            warn!(
                iterations,
                remaining = points.len(),
                "self-intersection repair hit its iteration cap; keeping best candidate"
            );
        }
        RepairOutcome {
            points,
            iterations,
            converged,
        }
    }
}

/// Finds the first crossing between non-adjacent edges of a closed ring.
///
/// Edge `k` runs from `points[k]` to `points[(k + 1) % n]`. The pair formed by
/// the first and the wrap-around edge is adjacent and skipped.
///
/// Returns `(i, j, point)` with `i < j`.
fn find_first_crossing(points: &[Point2]) -> Option<(usize, usize, Point2)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if let Some((pt, _, _)) = segment_crossing_2d(a0, a1, &points[j], &points[(j + 1) % n])
            {
                return Some((i, j, pt));
            }
        }
    }
    None
}

/// Splits a ring at the crossing of edges `i` and `j` (`i < j`).
///
/// - bypass: `P[0..=i], X, P[j+1..]`
/// - loop:   `X, P[i+1..=j]`
fn split_at_crossing(
    points: &[Point2],
    i: usize,
    j: usize,
    crossing: Point2,
) -> (Vec<Point2>, Vec<Point2>) {
    let mut bypass = Vec::with_capacity(points.len() - (j - i) + 1);
    bypass.extend_from_slice(&points[..=i]);
    bypass.push(crossing);
    bypass.extend_from_slice(&points[j + 1..]);

    let mut the_loop = Vec::with_capacity(j - i + 1);
    the_loop.push(crossing);
    the_loop.extend_from_slice(&points[i + 1..=j]);

    (bypass, the_loop)
}
