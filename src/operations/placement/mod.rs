mod pattern_along_path;

pub use pattern_along_path::{PatternAlongPath, PlacedShape, Placement, SpacingStrategy};
