//! Box generation: configuration, the side panel and the full layout pass.

mod config;
mod generator;
mod side;

pub use config::{BoxConfig, HingeConfig, MagnetConfig, MagnetKind, MagnetPlate};
pub use generator::{BoxGenerator, BoxLayout};
pub use side::{BuildSidePanel, SidePanel};
