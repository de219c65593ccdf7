pub mod hinge;
pub mod offset;
pub mod placement;
pub mod query;
