mod living_hinge;
mod regions;
mod straight_segments;

pub use living_hinge::{CutKind, HingeCut, LivingHingePattern};
pub use regions::{PanelRegions, Region, RegionKind};
pub use straight_segments::{reanchor_ranges, ArcRange, DetectStraightSegments};
