use super::straight_segments::ArcRange;

/// Whether a stretch of the side panel runs along a straight or a curved
/// part of the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Straight,
    /// Curved stretch that needs a living hinge to bend.
    Hinge,
}

/// One piece of the side panel partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub kind: RegionKind,
}

impl Region {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn range(&self) -> ArcRange {
        ArcRange::new(self.start, self.end)
    }
}

/// Splits `[0, width)` into straight stretches and the hinge-eligible gaps
/// between them.
#[derive(Debug)]
pub struct PanelRegions {
    straight: Vec<ArcRange>,
    width: f64,
}

impl PanelRegions {
    /// `straight` must already be in panel coordinates (see
    /// [`super::reanchor_ranges`]); order does not matter.
    #[must_use]
    pub fn new(straight: &[ArcRange], width: f64) -> Self {
        Self {
            straight: straight.to_vec(),
            width,
        }
    }

    /// Ordered, gap-free, non-overlapping partition of `[0, width)`.
    ///
    /// Overlapping straight ranges merge into one straight region; ranges are
    /// clipped to the panel. With no straight ranges the whole panel is one
    /// hinge region.
    #[must_use]
    pub fn partition(&self) -> Vec<Region> {
        if self.width <= 0.0 {
            return Vec::new();
        }

        let mut straight: Vec<ArcRange> = self
            .straight
            .iter()
            .map(|r| ArcRange::new(r.start.max(0.0), r.end.min(self.width)))
            .filter(|r| !r.is_empty())
            .collect();
        straight.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut regions = Vec::with_capacity(straight.len() * 2 + 1);
        let mut cursor = 0.0;
        for range in straight {
            if range.end <= cursor {
                continue;
            }
            if cursor < range.start {
                regions.push(Region {
                    start: cursor,
                    end: range.start,
                    kind: RegionKind::Hinge,
                });
                cursor = range.start;
            }
            match regions.last_mut() {
                Some(last) if last.kind == RegionKind::Straight && last.end >= cursor => {
                    last.end = range.end;
                }
                _ => regions.push(Region {
                    start: cursor,
                    end: range.end,
                    kind: RegionKind::Straight,
                }),
            }
            cursor = range.end;
        }
        if cursor < self.width {
            regions.push(Region {
                start: cursor,
                end: self.width,
                kind: RegionKind::Hinge,
            });
        }
        regions
    }

    /// Only the hinge-eligible stretches of [`PanelRegions::partition`].
    #[must_use]
    pub fn hinge_regions(&self) -> Vec<ArcRange> {
        self.partition()
            .into_iter()
            .filter(|r| r.kind == RegionKind::Hinge)
            .map(|r| r.range())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_straight_ranges_is_one_hinge() {
        let regions = PanelRegions::new(&[], 120.0).partition();
        assert_eq!(
            regions,
            vec![Region {
                start: 0.0,
                end: 120.0,
                kind: RegionKind::Hinge
            }]
        );
    }

    #[test]
    fn gaps_between_straights_become_hinges() {
        let straight = [ArcRange::new(70.0, 100.0), ArcRange::new(10.0, 40.0)];
        let hinges = PanelRegions::new(&straight, 100.0).hinge_regions();
        assert_eq!(
            hinges,
            vec![ArcRange::new(0.0, 10.0), ArcRange::new(40.0, 70.0)]
        );
    }

    #[test]
    fn touching_and_overlapping_straights_merge() {
        let straight = [
            ArcRange::new(0.0, 30.0),
            ArcRange::new(30.0, 50.0),
            ArcRange::new(45.0, 60.0),
            ArcRange::new(50.0, 55.0),
        ];
        let regions = PanelRegions::new(&straight, 80.0).partition();
        assert_eq!(
            regions,
            vec![
                Region {
                    start: 0.0,
                    end: 60.0,
                    kind: RegionKind::Straight
                },
                Region {
                    start: 60.0,
                    end: 80.0,
                    kind: RegionKind::Hinge
                },
            ]
        );
    }

    #[test]
    fn ranges_are_clipped_to_panel() {
        let straight = [ArcRange::new(90.0, 130.0)];
        let regions = PanelRegions::new(&straight, 100.0).partition();
        assert_eq!(regions.last().unwrap().end, 100.0);
        assert_eq!(regions.last().unwrap().kind, RegionKind::Straight);
    }

    proptest! {
        #[test]
        fn partition_covers_panel_exactly(
            width in 1.0f64..1000.0,
            raw in proptest::collection::vec((0.0f64..1.0, 0.0f64..0.5), 0..12),
        ) {
            let straight: Vec<ArcRange> = raw
                .iter()
                .map(|&(s, len)| ArcRange::new(s * width, (s + len) * width))
                .collect();
            let regions = PanelRegions::new(&straight, width).partition();
            prop_assert!(!regions.is_empty());
            prop_assert_eq!(regions[0].start, 0.0);
            prop_assert_eq!(regions[regions.len() - 1].end, width);
            for r in &regions {
                prop_assert!(r.width() > 0.0);
            }
            for w in regions.windows(2) {
                prop_assert_eq!(w[0].end, w[1].start);
                prop_assert!(w[0].kind != w[1].kind);
            }
            // Every straight input point lands in a straight region.
            for r in &straight {
                let mid = (r.start + r.end.min(width)) / 2.0;
                if r.start < width && r.end > r.start {
                    let hit = regions.iter().find(|g| g.start <= mid && mid < g.end);
                    if let Some(g) = hit {
                        prop_assert_eq!(g.kind, RegionKind::Straight);
                    }
                }
            }
        }
    }
}
