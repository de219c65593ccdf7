use tracing::{debug, warn};

use crate::error::{BoxcutError, Result};
use crate::geometry::{Path, ShapeKind};
use crate::operations::offset::PathOffset2D;
use crate::operations::placement::{PatternAlongPath, PlacedShape, SpacingStrategy};
use crate::operations::query::ArcLengthIndex;

use super::config::{BoxConfig, MagnetPlate};
use super::side::{BuildSidePanel, SidePanel};

/// Every piece of geometry one generation pass produces.
///
/// Placed items keep their outlines in item-local coordinates next to their
/// pose; arranging pieces on the sheet is up to the host.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    /// The outline inset by `tab_inset`; tab slots and magnets sit on it.
    pub inset: Path,
    pub inset_length: f64,
    /// Slots cut into the bottom and top plates for the side panel tabs.
    pub tab_slots: Vec<PlacedShape>,
    /// Opening in the top plate. `None` when the inset collapses.
    pub top_hole: Option<Path>,
    pub magnets: Vec<PlacedShape>,
    /// Plates that cut the magnet pockets through.
    pub magnet_cuts: Vec<MagnetPlate>,
    /// Plates that only carry the pockets as reference marks.
    pub magnet_marks: Vec<MagnetPlate>,
    pub side: SidePanel,
    /// Lid layer that drops into the top opening.
    pub lid_fitting: Option<Path>,
}

/// Generates the flat pieces of a box from a closed outline.
#[derive(Debug, Clone, Default)]
pub struct BoxGenerator {
    config: BoxConfig,
}

impl BoxGenerator {
    #[must_use]
    pub fn new(config: BoxConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Runs one generation pass over `outline`.
    ///
    /// # Errors
    ///
    /// - `ConfigError` if the configuration does not validate
    /// - any offset error from the tab inset, which every other piece needs
    ///
    /// Failing to build the top opening or the lid fitting is not an error;
    /// the piece is left out and a warning is logged.
    pub fn generate(&self, outline: &Path) -> Result<BoxLayout> {
        let cfg = &self.config;
        cfg.validate()?;

        let inset = PathOffset2D::new(outline, -cfg.tab_inset)
            .with_precision(cfg.precision)
            .execute()?;
        let index = ArcLengthIndex::new(&inset);
        let inset_length = index.total_length();
        debug!(inset_length, "computed tab inset");

        let slot = ShapeKind::Rectangle {
            width: cfg.tab_width - cfg.kerf,
            height: cfg.thickness - cfg.kerf,
        };
        let tab_slots = PatternAlongPath::new(&index, cfg.num_tabs, slot.extent())
            .with_start_offset(cfg.tab_start_offset)
            .with_strategy(SpacingStrategy::Simple)
            .place_shapes(&slot);

        let top_hole = self.optional_offset(outline, -cfg.top_hole_inset, "top hole")?;

        let magnets = match cfg.magnets.shape() {
            Some(shape) => PatternAlongPath::new(&index, cfg.magnets.count, shape.extent())
                .with_start_offset(cfg.magnets.placement_offset)
                .with_strategy(SpacingStrategy::Even)
                .place_shapes(&shape),
            None => Vec::new(),
        };

        let (magnet_cuts, magnet_marks) = self.magnet_plates(!magnets.is_empty());

        let side = BuildSidePanel::new(&index, cfg).execute()?;

        let lid_fitting = if cfg.generate_lid {
            self.optional_offset(
                outline,
                -(cfg.top_hole_inset + cfg.lid_extra_inset),
                "lid fitting",
            )?
        } else {
            None
        };

        debug!(
            tab_slots = tab_slots.len(),
            magnets = magnets.len(),
            top_hole = top_hole.is_some(),
            lid_fitting = lid_fitting.is_some(),
            "generated box layout"
        );

        Ok(BoxLayout {
            inset,
            inset_length,
            tab_slots,
            top_hole,
            magnets,
            magnet_cuts,
            magnet_marks,
            side,
            lid_fitting,
        })
    }

    /// Splits the magnet-bearing plates into those that cut the pockets and
    /// those that only mark them. Lid plates take part only with a lid.
    fn magnet_plates(&self, has_magnets: bool) -> (Vec<MagnetPlate>, Vec<MagnetPlate>) {
        if !has_magnets {
            return (Vec::new(), Vec::new());
        }
        let mut plates = vec![MagnetPlate::TopTabs, MagnetPlate::Top];
        if self.config.generate_lid {
            plates.extend([MagnetPlate::LidMiddle, MagnetPlate::LidBottom]);
        }
        plates
            .into_iter()
            .partition(|&plate| self.config.magnets.cuts_pockets(plate))
    }

    /// Offsets the outline for a piece the layout can do without. Invalid
    /// geometry drops the piece; other errors still propagate.
    fn optional_offset(
        &self,
        outline: &Path,
        distance: f64,
        piece: &'static str,
    ) -> Result<Option<Path>> {
        match PathOffset2D::new(outline, distance)
            .with_precision(self.config.precision)
            .execute()
        {
            Ok(path) => Ok(Some(path)),
            Err(err @ BoxcutError::Geometry(_)) => {
                warn!(piece, distance, error = %err, "skipping piece");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
