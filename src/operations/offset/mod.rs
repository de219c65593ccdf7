mod path_offset_2d;
mod polygon_offset_2d;
mod self_intersect;
mod simplify;

pub use path_offset_2d::PathOffset2D;
pub use polygon_offset_2d::PolygonOffset2D;
pub use self_intersect::{
    LargestLoopRepair, LoopRepair, RepairOutcome, DEFAULT_MAX_REPAIR_ITERATIONS,
};
pub use simplify::{simplify_closed, simplify_rdp};
