use crate::geometry::{Path, PathCommand, Polyline};
use crate::math::arc_2d::SvgArc;
use crate::math::bezier::{subdivision_count, CubicBezier, QuadraticBezier};
use crate::math::Point2;

/// Flattens a path into a polyline at a given chord tolerance.
///
/// Lines contribute their endpoints; curves are sampled at a uniform number
/// of parameter steps derived from [`subdivision_count`]. Arcs go through the
/// cubic conversion first. Smooth segments (`S`, `T`) are sampled along the
/// straight chord between their endpoints.
///
/// The close command adds no point: the result is closed implicitly.
#[derive(Debug)]
pub struct FlattenPath<'a> {
    path: &'a Path,
    tolerance: f64,
}

impl<'a> FlattenPath<'a> {
    /// Creates a new flattening operation.
    #[must_use]
    pub fn new(path: &'a Path, tolerance: f64) -> Self {
        Self { path, tolerance }
    }

    /// Executes the flattening.
    ///
    /// A path with fewer than 2 commands yields an empty polyline; callers
    /// that need geometry must treat that as invalid input.
    #[must_use]
    pub fn execute(&self) -> Polyline {
        let commands = self.path.commands();
        if commands.len() < 2 {
            return Polyline::default();
        }

        let mut points: Vec<Point2> = Vec::with_capacity(commands.len() * 4);
        let mut current = Point2::origin();
        let mut closed = false;

        for cmd in commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    current = p;
                    points.push(p);
                }
                PathCommand::HorizontalTo(_) | PathCommand::VerticalTo(_) => {
                    if let Some(p) = cmd.end_point(current) {
                        current = p;
                        points.push(p);
                    }
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    self.push_cubic(&mut points, &CubicBezier::new(current, c1, c2, to));
                    current = to;
                }
                PathCommand::QuadTo { c, to } => {
                    let quad = QuadraticBezier::new(current, c, to);
                    let n = subdivision_count(
                        quad.chord_length(),
                        quad.control_polygon_length(),
                        self.tolerance,
                    );
                    points.extend(sample(n, |t| quad.point_at(t)));
                    current = to;
                }
                PathCommand::SmoothCubicTo { to, .. } | PathCommand::SmoothQuadTo(to) => {
                    self.push_chord(&mut points, current, to);
                    current = to;
                }
                PathCommand::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = SvgArc {
                        from: current,
                        to,
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                    };
                    for cubic in arc.to_cubics() {
                        self.push_cubic(&mut points, &cubic);
                    }
                    current = to;
                }
                PathCommand::Close => closed = true,
            }
        }

        Polyline::new(points, closed)
    }

    fn push_cubic(&self, points: &mut Vec<Point2>, cubic: &CubicBezier) {
        let n = subdivision_count(
            cubic.chord_length(),
            cubic.control_polygon_length(),
            self.tolerance,
        );
        points.extend(sample(n, |t| cubic.point_at(t)));
    }

    fn push_chord(&self, points: &mut Vec<Point2>, from: Point2, to: Point2) {
        let chord = (to - from).norm();
        // The chord is its own control polygon.
        let n = subdivision_count(chord, chord, self.tolerance);
        points.extend(sample(n, |t| from + (to - from) * t));
    }
}

/// Samples `eval` at `t = i/n` for `i` in `1..=n` (the start point is
/// already in the output).
#[allow(clippy::cast_precision_loss)]
fn sample<F: Fn(f64) -> Point2>(n: usize, eval: F) -> impl Iterator<Item = Point2> {
    (1..=n).map(move |i| eval(i as f64 / n as f64))
}
