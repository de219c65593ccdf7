//! SVG elliptical-arc math.
//!
//! Arcs are given in endpoint form (`rx ry x-axis-rotation large-arc sweep x y`)
//! and converted to center form before being split into cubic segments of at
//! most a quarter turn each.
use std::f64::consts::{FRAC_PI_2, PI};

use super::bezier::CubicBezier;
use super::{Point2, Vector2};

/// Endpoint-form elliptical arc as it appears in an SVG path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgArc {
    pub from: Point2,
    pub to: Point2,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Center-form parameters of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    pub center: Point2,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in radians.
    pub phi: f64,
    pub start_angle: f64,
    /// Signed sweep in radians; positive when the sweep flag is set.
    pub sweep_angle: f64,
}

impl SvgArc {
    /// Converts to center form, scaling radii up when they are too small to
    /// span the endpoints.
    ///
    /// Returns `None` for degenerate arcs (coincident endpoints or a zero
    /// radius); see [`SvgArc::to_cubics`] for how those are handled.
    #[must_use]
    pub fn to_center(&self) -> Option<ArcCenter> {
        if self.from == self.to {
            return None;
        }
        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        if rx == 0.0 || ry == 0.0 {
            return None;
        }

        let phi = self.x_axis_rotation.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let half = (self.from - self.to) / 2.0;
        let x1p = cos_phi * half.x + sin_phi * half.y;
        let y1p = -sin_phi * half.x + cos_phi * half.y;

        let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let num = ((rx * ry).powi(2) - (rx * y1p).powi(2) - (ry * x1p).powi(2)).max(0.0);
        let den = (rx * y1p).powi(2) + (ry * x1p).powi(2);
        let mut sq = (num / den).sqrt();
        if self.large_arc == self.sweep {
            sq = -sq;
        }

        let cxp = sq * rx * y1p / ry;
        let cyp = -sq * ry * x1p / rx;

        let mid = nalgebra::center(&self.from, &self.to);
        let center = Point2::new(
            cos_phi * cxp - sin_phi * cyp + mid.x,
            sin_phi * cxp + cos_phi * cyp + mid.y,
        );

        let u = Vector2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v = Vector2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let start_angle = angle_between(Vector2::new(1.0, 0.0), u);
        let mut sweep_angle = angle_between(u, v);

        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        }

        Some(ArcCenter {
            center,
            rx,
            ry,
            phi,
            start_angle,
            sweep_angle,
        })
    }

    /// Splits the arc into cubic segments spanning at most 90° each.
    ///
    /// Coincident endpoints yield no segments; a zero radius yields a single
    /// straight chord.
    #[must_use]
    pub fn to_cubics(&self) -> Vec<CubicBezier> {
        if self.from == self.to {
            return Vec::new();
        }
        let Some(arc) = self.to_center() else {
            return vec![CubicBezier::line(self.from, self.to)];
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let segments = ((arc.sweep_angle.abs() / FRAC_PI_2).ceil() as usize).max(1);
        #[allow(clippy::cast_precision_loss)]
        let delta = arc.sweep_angle / segments as f64;
        let alpha = delta.sin() * ((4.0 + 3.0 * (delta / 2.0).tan().powi(2)).sqrt() - 1.0) / 3.0;

        let mut cubics = Vec::with_capacity(segments);
        for i in 0..segments {
            #[allow(clippy::cast_precision_loss)]
            let theta0 = arc.start_angle + i as f64 * delta;
            let theta1 = theta0 + delta;
            let (s0, c0) = theta0.sin_cos();
            let (s1, c1) = theta1.sin_cos();

            let p0 = arc.map_unit(c0, s0);
            let p1 = arc.map_unit(c0 - s0 * alpha, s0 + c0 * alpha);
            let p2 = arc.map_unit(c1 + s1 * alpha, s1 - c1 * alpha);
            let p3 = arc.map_unit(c1, s1);
            cubics.push(CubicBezier::new(p0, p1, p2, p3));
        }

        // Pin the ends to the exact endpoints to avoid seams from round-off.
        if let Some(first) = cubics.first_mut() {
            first.p0 = self.from;
        }
        if let Some(last) = cubics.last_mut() {
            last.p3 = self.to;
        }
        cubics
    }
}

impl ArcCenter {
    /// Maps a point on the unit circle onto the ellipse.
    fn map_unit(&self, x: f64, y: f64) -> Point2 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let x = x * self.rx;
        let y = y * self.ry;
        Point2::new(
            cos_phi * x - sin_phi * y + self.center.x,
            sin_phi * x + cos_phi * y + self.center.y,
        )
    }
}

/// Signed angle from `u` to `v` in `[-π, π]`.
fn angle_between(u: Vector2, v: Vector2) -> f64 {
    let n = u.norm() * v.norm();
    if n == 0.0 {
        return 0.0;
    }
    let c = (u.dot(&v) / n).clamp(-1.0, 1.0);
    let angle = c.acos();
    if u.x * v.y - u.y * v.x < 0.0 {
        -angle
    } else {
        angle
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arc(from: (f64, f64), to: (f64, f64), r: f64, large_arc: bool, sweep: bool) -> SvgArc {
        SvgArc {
            from: Point2::new(from.0, from.1),
            to: Point2::new(to.0, to.1),
            rx: r,
            ry: r,
            x_axis_rotation: 0.0,
            large_arc,
            sweep,
        }
    }

    #[test]
    fn quarter_arc_center() {
        let c = arc((1.0, 0.0), (0.0, 1.0), 1.0, false, true)
            .to_center()
            .unwrap();
        assert_relative_eq!(c.center, Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(c.sweep_angle, FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn large_arc_flag_picks_long_way() {
        let c = arc((1.0, 0.0), (0.0, 1.0), 1.0, true, true)
            .to_center()
            .unwrap();
        assert_relative_eq!(c.sweep_angle, 1.5 * PI, epsilon = 1e-9);
        assert_eq!(
            arc((1.0, 0.0), (0.0, 1.0), 1.0, true, true).to_cubics().len(),
            3
        );
    }

    #[test]
    fn sweep_flag_clear_is_negative() {
        let c = arc((1.0, 0.0), (0.0, 1.0), 1.0, false, false)
            .to_center()
            .unwrap();
        assert!(c.sweep_angle < 0.0);
    }

    #[test]
    fn undersized_radius_is_scaled_up() {
        // Endpoints 4 apart, radius 1: scaled to a semicircle of radius 2.
        let c = arc((0.0, 0.0), (4.0, 0.0), 1.0, false, true)
            .to_center()
            .unwrap();
        assert_relative_eq!(c.rx, 2.0, epsilon = 1e-9);
        assert_relative_eq!(c.center, Point2::new(2.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(c.sweep_angle.abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn zero_radius_is_a_straight_chord() {
        let cubics = arc((0.0, 0.0), (3.0, 0.0), 0.0, false, true).to_cubics();
        assert_eq!(cubics.len(), 1);
        assert!(cubics[0].is_straight());
    }

    #[test]
    fn coincident_endpoints_vanish() {
        assert!(arc((1.0, 1.0), (1.0, 1.0), 5.0, false, true)
            .to_cubics()
            .is_empty());
    }

    #[test]
    fn cubic_pieces_stay_on_circle() {
        let cubics = arc((1.0, 0.0), (-1.0, 0.0), 1.0, false, true).to_cubics();
        assert_eq!(cubics.len(), 2);
        for c in &cubics {
            for i in 0..=8 {
                let p = c.point_at(f64::from(i) / 8.0);
                assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-3);
            }
        }
        assert_relative_eq!(cubics[1].p3, Point2::new(-1.0, 0.0));
    }
}
