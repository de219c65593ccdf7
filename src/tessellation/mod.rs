mod flatten_path;

pub use flatten_path::FlattenPath;

/// Default chord tolerance used when flattening outlines, in working units.
pub const DEFAULT_CHORD_TOLERANCE: f64 = 0.05;
