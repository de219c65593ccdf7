use crate::math::distance_2d::point_to_line_dist;
use crate::math::Point2;

/// Ramer–Douglas–Peucker simplification of an open point sequence.
///
/// Keeps both endpoints and every point farther than `epsilon` from the
/// chord of its enclosing span (measured to the infinite chord line).
#[must_use]
pub fn simplify_rdp(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0usize, n - 1)];
    while let Some((first, last)) = spans.pop() {
        if last <= first + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut max_index = first;
        for i in (first + 1)..last {
            let d = point_to_line_dist(&points[i], &points[first], &points[last]);
            if d > max_dist {
                max_dist = d;
                max_index = i;
            }
        }
        if max_dist > epsilon {
            keep[max_index] = true;
            spans.push((first, max_index));
            spans.push((max_index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// RDP over a closed ring stored without its closing duplicate.
///
/// The ring is opened at its first point, which is always kept. Rings of
/// fewer than 4 points are returned unchanged.
#[must_use]
pub fn simplify_closed(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    if points.len() < 4 {
        return points.to_vec();
    }
    simplify_rdp(points, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn collinear_points_collapse() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let out = simplify_rdp(&line, 0.01);
        assert_eq!(out, pts(&[(0.0, 0.0), (3.0, 0.0)]));
    }

    #[test]
    fn corner_survives() {
        let l_shape = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (2.0, 2.0)]);
        let out = simplify_rdp(&l_shape, 0.01);
        assert_eq!(out, pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]));
    }

    #[test]
    fn noise_below_epsilon_is_removed() {
        let wobbly = pts(&[(0.0, 0.0), (1.0, 0.02), (2.0, -0.02), (3.0, 0.0)]);
        assert_eq!(simplify_rdp(&wobbly, 0.05).len(), 2);
        assert_eq!(simplify_rdp(&wobbly, 0.01).len(), 4);
    }

    #[test]
    fn closed_ring_keeps_square_corners() {
        let ring = pts(&[
            (0.0, 0.0),
            (50.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ]);
        let out = simplify_closed(&ring, 0.1);
        assert_eq!(
            out,
            pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
        );
    }

    #[test]
    fn small_rings_untouched() {
        let tri = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 0.0)]);
        assert_eq!(simplify_closed(&tri, 10.0), tri);
    }
}
