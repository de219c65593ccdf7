mod arc_length;

pub use arc_length::{ArcLengthIndex, IndexedSegment, PathPoint};
