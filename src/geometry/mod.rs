pub mod path;
pub mod polyline;
pub mod shape;

pub use path::{Path, PathCommand};
pub use polyline::Polyline;
pub use shape::{rounded_rect, ShapeFactory, ShapeKind};
