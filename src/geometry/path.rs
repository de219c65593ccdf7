use crate::math::arc_2d::SvgArc;
use crate::math::bezier::{CubicBezier, QuadraticBezier};
use crate::math::{Point2, Vector2};

/// One absolute-coordinate drawing command.
///
/// Relative commands are the host's business: by the time a path reaches the
/// core every coordinate is absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2),
    LineTo(Point2),
    /// Horizontal line to the given x.
    HorizontalTo(f64),
    /// Vertical line to the given y.
    VerticalTo(f64),
    CubicTo {
        c1: Point2,
        c2: Point2,
        to: Point2,
    },
    QuadTo {
        c: Point2,
        to: Point2,
    },
    SmoothCubicTo {
        c2: Point2,
        to: Point2,
    },
    SmoothQuadTo(Point2),
    ArcTo {
        rx: f64,
        ry: f64,
        /// Degrees.
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point2,
    },
    Close,
}

impl PathCommand {
    /// Endpoint reached after this command, given the current point.
    ///
    /// `Close` has no endpoint of its own and returns `None`.
    #[must_use]
    pub fn end_point(&self, current: Point2) -> Option<Point2> {
        match *self {
            Self::MoveTo(p)
            | Self::LineTo(p)
            | Self::SmoothQuadTo(p)
            | Self::CubicTo { to: p, .. }
            | Self::QuadTo { to: p, .. }
            | Self::SmoothCubicTo { to: p, .. }
            | Self::ArcTo { to: p, .. } => Some(p),
            Self::HorizontalTo(x) => Some(Point2::new(x, current.y)),
            Self::VerticalTo(y) => Some(Point2::new(current.x, y)),
            Self::Close => None,
        }
    }
}

/// An ordered sequence of absolute drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Builds a closed straight-line path `M p0 L p1 … L pn Z`.
    #[must_use]
    pub fn from_polygon(points: &[Point2]) -> Self {
        let mut path = Self::new();
        let Some((first, rest)) = points.split_first() else {
            return path;
        };
        path.commands.push(PathCommand::MoveTo(*first));
        path.commands.extend(rest.iter().map(|p| PathCommand::LineTo(*p)));
        path.commands.push(PathCommand::Close);
        path
    }

    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point2::new(x, y)));
        self
    }

    #[must_use]
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point2::new(x, y)));
        self
    }

    #[must_use]
    pub fn horizontal_to(mut self, x: f64) -> Self {
        self.commands.push(PathCommand::HorizontalTo(x));
        self
    }

    #[must_use]
    pub fn vertical_to(mut self, y: f64) -> Self {
        self.commands.push(PathCommand::VerticalTo(y));
        self
    }

    #[must_use]
    pub fn cubic_to(mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) -> Self {
        self.commands.push(PathCommand::CubicTo {
            c1: Point2::new(c1.0, c1.1),
            c2: Point2::new(c2.0, c2.1),
            to: Point2::new(to.0, to.1),
        });
        self
    }

    #[must_use]
    pub fn quad_to(mut self, c: (f64, f64), to: (f64, f64)) -> Self {
        self.commands.push(PathCommand::QuadTo {
            c: Point2::new(c.0, c.1),
            to: Point2::new(to.0, to.1),
        });
        self
    }

    #[must_use]
    pub fn smooth_cubic_to(mut self, c2: (f64, f64), to: (f64, f64)) -> Self {
        self.commands.push(PathCommand::SmoothCubicTo {
            c2: Point2::new(c2.0, c2.1),
            to: Point2::new(to.0, to.1),
        });
        self
    }

    #[must_use]
    pub fn smooth_quad_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::SmoothQuadTo(Point2::new(x, y)));
        self
    }

    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            to: Point2::new(x, y),
        });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns a copy shifted by `(dx, dy)`. Radii and rotations are unchanged.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let d = Vector2::new(dx, dy);
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(p + d),
                PathCommand::LineTo(p) => PathCommand::LineTo(p + d),
                PathCommand::HorizontalTo(x) => PathCommand::HorizontalTo(x + dx),
                PathCommand::VerticalTo(y) => PathCommand::VerticalTo(y + dy),
                PathCommand::CubicTo { c1, c2, to } => PathCommand::CubicTo {
                    c1: c1 + d,
                    c2: c2 + d,
                    to: to + d,
                },
                PathCommand::QuadTo { c, to } => PathCommand::QuadTo { c: c + d, to: to + d },
                PathCommand::SmoothCubicTo { c2, to } => PathCommand::SmoothCubicTo {
                    c2: c2 + d,
                    to: to + d,
                },
                PathCommand::SmoothQuadTo(p) => PathCommand::SmoothQuadTo(p + d),
                PathCommand::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                } => PathCommand::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to: to + d,
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }

    /// Every on-curve point visited by the path, in order.
    #[must_use]
    pub fn end_points(&self) -> Vec<Point2> {
        let mut current = Point2::origin();
        let mut start = current;
        let mut points = Vec::with_capacity(self.commands.len());
        for cmd in &self.commands {
            match cmd.end_point(current) {
                Some(p) => {
                    if matches!(cmd, PathCommand::MoveTo(_)) {
                        start = p;
                    }
                    current = p;
                    points.push(p);
                }
                None => current = start,
            }
        }
        points
    }

    /// Decomposes the path into cubic segments.
    ///
    /// Straight commands (L, H, V) and the smooth variants (S, T) become
    /// straight cubics whose controls sit on their endpoints; quadratics are
    /// degree-elevated; arcs are split into quarter-turn cubics. `Close` adds a
    /// straight segment back to the subpath start when the current point is
    /// elsewhere. `MoveTo` starts a new, unconnected span.
    #[must_use]
    pub fn to_cubic_segments(&self) -> Vec<CubicBezier> {
        let mut segments = Vec::with_capacity(self.commands.len());
        let mut current = Point2::origin();
        let mut start = current;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    current = p;
                    start = p;
                }
                PathCommand::LineTo(_)
                | PathCommand::HorizontalTo(_)
                | PathCommand::VerticalTo(_)
                | PathCommand::SmoothCubicTo { .. }
                | PathCommand::SmoothQuadTo(_) => {
                    if let Some(to) = cmd.end_point(current) {
                        segments.push(CubicBezier::line(current, to));
                        current = to;
                    }
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    segments.push(CubicBezier::new(current, c1, c2, to));
                    current = to;
                }
                PathCommand::QuadTo { c, to } => {
                    let quad = QuadraticBezier::new(current, c, to);
                    segments.push(CubicBezier::from_quadratic(&quad));
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
                    segments.extend(arc.to_cubics());
                    current = to;
                }
                PathCommand::Close => {
                    if current != start {
                        segments.push(CubicBezier::line(current, start));
                    }
                    current = start;
                }
            }
        }
        segments
    }
}
