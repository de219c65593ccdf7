pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod panel;
pub mod tessellation;

pub use error::{BoxcutError, Result};
