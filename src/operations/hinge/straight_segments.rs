use crate::math::wrap_arc_length;
use crate::operations::query::ArcLengthIndex;

/// A half-open interval `[start, end)` of arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcRange {
    pub start: f64,
    pub end: f64,
}

impl ArcRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Finds path segments long enough to count as straight runs.
///
/// The test is per segment: a segment qualifies when its chord is at least
/// `min_length`. Consecutive collinear segments are not merged. Ranges are
/// reported in cumulative arc length along the indexed path.
#[derive(Debug)]
pub struct DetectStraightSegments<'a> {
    index: &'a ArcLengthIndex,
    min_length: f64,
}

impl<'a> DetectStraightSegments<'a> {
    #[must_use]
    pub fn new(index: &'a ArcLengthIndex, min_length: f64) -> Self {
        Self { index, min_length }
    }

    #[must_use]
    pub fn execute(&self) -> Vec<ArcRange> {
        self.index
            .segments()
            .iter()
            .filter(|seg| seg.length > 0.0 && seg.bezier.chord_length() >= self.min_length)
            .map(|seg| ArcRange::new(seg.start, seg.end()))
            .collect()
    }
}

/// Shifts ranges so that arc length `origin` becomes 0, wrapping modulo
/// `total`. A range that straddles the new seam is split in two; empty
/// results are dropped.
#[must_use]
pub fn reanchor_ranges(ranges: &[ArcRange], origin: f64, total: f64) -> Vec<ArcRange> {
    let mut out = Vec::with_capacity(ranges.len() + 1);
    for range in ranges {
        let start = wrap_arc_length(range.start - origin, total);
        let end = wrap_arc_length(range.end - origin, total);
        if start < end {
            out.push(ArcRange::new(start, end));
        } else {
            out.push(ArcRange::new(start, total));
            out.push(ArcRange::new(0.0, end));
        }
    }
    out.retain(|r| !r.is_empty());
    out
}
