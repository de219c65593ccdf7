use tracing::debug;

use crate::error::Result;
use crate::geometry::{rounded_rect, Path};
use crate::math::wrap_arc_length;
use crate::operations::hinge::{
    reanchor_ranges, DetectStraightSegments, HingeCut, LivingHingePattern, PanelRegions, Region,
    RegionKind,
};
use crate::operations::query::ArcLengthIndex;

use super::config::BoxConfig;

/// The wall strip that wraps around the box, laid out flat.
///
/// Panel x runs along the inset path starting at the first tab's centreline;
/// y runs from the top plate down to the bottom plate.
#[derive(Debug, Clone)]
pub struct SidePanel {
    pub width: f64,
    pub height: f64,
    /// The bare strip `[0, width] × [0, height]`.
    pub outline: Path,
    /// Rounded tabs reaching one thickness past both long edges. They are
    /// union operands for the host's boolean engine.
    pub tabs: Vec<Path>,
    /// Straight and hinge stretches of `[0, width)`.
    pub regions: Vec<Region>,
    /// Living hinge slits in panel coordinates; empty when the hinge is off.
    pub hinge_cuts: Vec<HingeCut>,
}

impl SidePanel {
    /// Slits as open paths, ready for the host to cut.
    #[must_use]
    pub fn hinge_paths(&self) -> Vec<Path> {
        self.hinge_cuts.iter().map(HingeCut::to_path).collect()
    }
}

/// Lays out the side panel for an indexed inset path.
#[derive(Debug)]
pub struct BuildSidePanel<'a> {
    index: &'a ArcLengthIndex,
    config: &'a BoxConfig,
}

impl<'a> BuildSidePanel<'a> {
    #[must_use]
    pub fn new(index: &'a ArcLengthIndex, config: &'a BoxConfig) -> Self {
        Self { index, config }
    }

    /// Arc length along the inset path that maps to panel x = 0: the centre
    /// of the first tab.
    #[must_use]
    pub fn side_start_offset(&self) -> f64 {
        let total = self.index.total_length();
        let first_tab_start = wrap_arc_length(self.config.tab_start_offset, total);
        wrap_arc_length(first_tab_start + self.config.tab_width / 2.0, total)
    }

    /// # Errors
    ///
    /// Propagates hinge pattern errors (non-positive slit length or spacing).
    pub fn execute(&self) -> Result<SidePanel> {
        let width = self.index.total_length();
        let height = self.config.side_height();

        let outline = Path::new()
            .move_to(0.0, 0.0)
            .line_to(width, 0.0)
            .line_to(width, height)
            .line_to(0.0, height)
            .close();

        let tabs = self.tabs(width, height);
        let regions = self.regions(width);

        let hinge_cuts = if self.config.hinge.enabled {
            self.hinge_cuts(&regions, height)?
        } else {
            Vec::new()
        };

        debug!(
            width,
            height,
            tabs = tabs.len(),
            regions = regions.len(),
            cuts = hinge_cuts.len(),
            "built side panel"
        );

        Ok(SidePanel {
            width,
            height,
            outline,
            tabs,
            regions,
            hinge_cuts,
        })
    }

    /// `num_tabs + 1` tabs: half-width ones flush with both panel ends and
    /// full ones centred at every `width / num_tabs`.
    #[allow(clippy::cast_precision_loss)]
    fn tabs(&self, width: f64, height: f64) -> Vec<Path> {
        let cfg = self.config;
        let n = cfg.num_tabs;
        let half = cfg.tab_width / 2.0;
        let tab_height = height + 2.0 * cfg.thickness;
        let y = -cfg.thickness;
        let pitch = width / n as f64;

        (0..=n)
            .map(|i| {
                let (x, w) = if i == 0 {
                    (0.0, half)
                } else if i == n {
                    (width - half, half)
                } else {
                    (i as f64 * pitch - half, cfg.tab_width)
                };
                rounded_rect(x, y, w, tab_height, cfg.tab_corner_radius)
            })
            .collect()
    }

    fn regions(&self, width: f64) -> Vec<Region> {
        let straight =
            DetectStraightSegments::new(self.index, self.config.hinge.min_straight_length)
                .execute();
        let anchored = reanchor_ranges(&straight, self.side_start_offset(), width);
        PanelRegions::new(&anchored, width).partition()
    }

    fn hinge_cuts(&self, regions: &[Region], height: f64) -> Result<Vec<HingeCut>> {
        let hinge = &self.config.hinge;
        let mut cuts = Vec::new();
        for region in regions.iter().filter(|r| r.kind == RegionKind::Hinge) {
            let pattern = LivingHingePattern {
                length: height * hinge.length_percent / 100.0,
                gap: hinge.gap,
                spacing: hinge.spacing,
                width: region.width(),
                height,
            };
            cuts.extend(pattern.execute()?.into_iter().map(|mut cut| {
                cut.x += region.start;
                cut
            }));
        }
        Ok(cuts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn rect_index(w: f64, h: f64) -> ArcLengthIndex {
        ArcLengthIndex::new(
            &Path::new()
                .move_to(0.0, 0.0)
                .line_to(w, 0.0)
                .line_to(w, h)
                .line_to(0.0, h)
                .close(),
        )
    }

    /// Stadium: two 100-long sides joined by semicircles of radius 10. The
    /// quarter-arc segments are shorter than the default straight threshold.
    fn stadium_index() -> ArcLengthIndex {
        ArcLengthIndex::new(
            &Path::new()
                .move_to(0.0, 0.0)
                .line_to(100.0, 0.0)
                .arc_to(10.0, 10.0, 0.0, false, true, 100.0, 20.0)
                .line_to(0.0, 20.0)
                .arc_to(10.0, 10.0, 0.0, false, true, 0.0, 0.0)
                .close(),
        )
    }

    #[test]
    fn panel_size_follows_path_and_height() {
        let index = rect_index(100.0, 50.0);
        let config = BoxConfig::default();
        let panel = BuildSidePanel::new(&index, &config).execute().unwrap();
        assert_relative_eq!(panel.width, 300.0);
        assert_relative_eq!(panel.height, 38.0);
        let pts = panel.outline.end_points();
        assert_relative_eq!(pts[2], Point2::new(300.0, 38.0));
    }

    #[test]
    fn tabs_span_panel_ends_and_pitch() {
        let index = rect_index(100.0, 50.0);
        let config = BoxConfig {
            tab_corner_radius: 0.0,
            ..BoxConfig::default()
        };
        let panel = BuildSidePanel::new(&index, &config).execute().unwrap();
        assert_eq!(panel.tabs.len(), 9);

        // First tab: half width at x = 0, reaching one thickness past both
        // edges.
        let first = panel.tabs[0].end_points();
        assert_relative_eq!(first[0], Point2::new(0.0, -3.0));
        assert_relative_eq!(first[1], Point2::new(3.0, -3.0));
        assert_relative_eq!(first[3], Point2::new(3.0, 41.0));

        // Interior tab i = 1 centred at 300 / 8.
        let second = panel.tabs[1].end_points();
        assert_relative_eq!(second[0].x, 37.5 - 3.0);
        assert_relative_eq!(second[1].x, 37.5 + 3.0);

        let last = panel.tabs[8].end_points();
        assert_relative_eq!(last[0].x, 297.0);
        assert_relative_eq!(last[1].x, 300.0);
    }

    #[test]
    fn start_offset_is_first_tab_centre() {
        let index = rect_index(100.0, 50.0);
        let config = BoxConfig {
            tab_start_offset: 610.0,
            ..BoxConfig::default()
        };
        let side = BuildSidePanel::new(&index, &config);
        assert_relative_eq!(side.side_start_offset(), 13.0);
    }

    #[test]
    fn rectangle_has_no_hinge_regions_between_tabs_and_sides() {
        let index = rect_index(100.0, 50.0);
        let config = BoxConfig {
            hinge: crate::panel::HingeConfig {
                enabled: true,
                ..Default::default()
            },
            ..BoxConfig::default()
        };
        let panel = BuildSidePanel::new(&index, &config).execute().unwrap();
        assert!(panel.regions.iter().all(|r| r.kind == RegionKind::Straight));
        assert!(panel.hinge_cuts.is_empty());
    }

    #[test]
    fn stadium_gets_hinges_on_round_ends_only() {
        let index = stadium_index();
        let config = BoxConfig {
            hinge: crate::panel::HingeConfig {
                enabled: true,
                ..Default::default()
            },
            ..BoxConfig::default()
        };
        let side = BuildSidePanel::new(&index, &config);
        let panel = side.execute().unwrap();

        let hinges: Vec<&Region> = panel
            .regions
            .iter()
            .filter(|r| r.kind == RegionKind::Hinge)
            .collect();
        assert_eq!(hinges.len(), 2);
        let half_turn = std::f64::consts::PI * 10.0;
        for r in &hinges {
            assert_relative_eq!(r.width(), half_turn, max_relative = 1e-3);
        }

        assert!(!panel.hinge_cuts.is_empty());
        for cut in &panel.hinge_cuts {
            let inside = hinges.iter().any(|r| cut.x > r.start && cut.x < r.end);
            assert!(inside, "slit at x = {} is outside every hinge region", cut.x);
            assert!(cut.y_start >= 0.0 && cut.y_end <= panel.height);
        }
        assert_eq!(panel.hinge_paths().len(), panel.hinge_cuts.len());
    }

    #[test]
    fn disabled_hinge_still_reports_regions() {
        let index = stadium_index();
        let config = BoxConfig::default();
        let panel = BuildSidePanel::new(&index, &config).execute().unwrap();
        assert!(panel.hinge_cuts.is_empty());
        assert!(panel.regions.iter().any(|r| r.kind == RegionKind::Hinge));
    }
}
