use serde::{Deserialize, Serialize};

use super::path::Path;

/// Builds the outline of one placed item, in item-local coordinates
/// (centred on the origin, x along the direction of travel).
///
/// The placement engine only depends on this capability; the caller owns the
/// returned outlines.
pub trait ShapeFactory {
    fn build(&self, index: usize) -> Path;
}

impl<F> ShapeFactory for F
where
    F: Fn(usize) -> Path,
{
    fn build(&self, index: usize) -> Path {
        self(index)
    }
}

/// Item outlines used by box generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle { width: f64, height: f64 },
    Circle { diameter: f64 },
    RoundedTab { width: f64, height: f64, radius: f64 },
}

impl ShapeKind {
    /// Size of the shape along the direction of travel.
    #[must_use]
    pub fn extent(&self) -> f64 {
        match *self {
            Self::Rectangle { width, .. } | Self::RoundedTab { width, .. } => width,
            Self::Circle { diameter } => diameter,
        }
    }

    /// Origin-centred outline.
    #[must_use]
    pub fn to_path(&self) -> Path {
        match *self {
            Self::Rectangle { width, height } => {
                let x = -width / 2.0;
                let y = -height / 2.0;
                Path::new()
                    .move_to(x, y)
                    .line_to(x + width, y)
                    .line_to(x + width, y + height)
                    .line_to(x, y + height)
                    .close()
            }
            Self::Circle { diameter } => {
                let r = diameter / 2.0;
                Path::new()
                    .move_to(r, 0.0)
                    .arc_to(r, r, 0.0, false, true, 0.0, r)
                    .arc_to(r, r, 0.0, false, true, -r, 0.0)
                    .arc_to(r, r, 0.0, false, true, 0.0, -r)
                    .arc_to(r, r, 0.0, false, true, r, 0.0)
                    .close()
            }
            Self::RoundedTab {
                width,
                height,
                radius,
            } => rounded_rect(-width / 2.0, -height / 2.0, width, height, radius),
        }
    }
}

impl ShapeFactory for ShapeKind {
    fn build(&self, _index: usize) -> Path {
        self.to_path()
    }
}

/// Axis-aligned rectangle with corner `(x, y)` and quarter-circle corners.
///
/// The radius is clamped to half the smaller side; a zero radius degrades to
/// zero-length arcs, which flatten to nothing.
#[must_use]
pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Path {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    Path::new()
        .move_to(x + r, y)
        .line_to(x + width - r, y)
        .arc_to(r, r, 0.0, false, true, x + width, y + r)
        .line_to(x + width, y + height - r)
        .arc_to(r, r, 0.0, false, true, x + width - r, y + height)
        .line_to(x + r, y + height)
        .arc_to(r, r, 0.0, false, true, x, y + height - r)
        .line_to(x, y + r)
        .arc_to(r, r, 0.0, false, true, x + r, y)
        .close()
}
