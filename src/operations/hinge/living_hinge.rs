use crate::error::{OperationError, Result};
use crate::geometry::Path;

/// Position of a slit within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// Partial slit running in from the top edge.
    Leading,
    Full,
    /// Partial slit running out to the bottom edge.
    Trailing,
}

/// One vertical slit, in region-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeCut {
    pub column: usize,
    pub kind: CutKind,
    pub x: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl HingeCut {
    #[must_use]
    pub fn length(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// The slit as an open two-point path.
    #[must_use]
    pub fn to_path(&self) -> Path {
        Path::new()
            .move_to(self.x, self.y_start)
            .line_to(self.x, self.y_end)
    }
}

/// Staggered slit pattern that lets a flat panel bend.
///
/// Columns sit `spacing` apart starting at `spacing / 2`. Even columns start
/// their full slits at `gap`; odd columns are shifted down by half a slit so
/// the bridges between slits alternate like brickwork.
#[derive(Debug, Clone, Copy)]
pub struct LivingHingePattern {
    /// Length of a full slit.
    pub length: f64,
    /// Uncut margin at the top and bottom of each column.
    pub gap: f64,
    /// Distance between columns and between slits in a column.
    pub spacing: f64,
    pub width: f64,
    pub height: f64,
}

impl LivingHingePattern {
    /// Generates the slits column by column, top to bottom.
    ///
    /// A column whose leading slit would have no extent is skipped entirely.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `length` or `spacing` is not
    /// a positive finite number.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Vec<HingeCut>> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "hinge slit length must be positive, got {}",
                self.length
            ))
            .into());
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "hinge spacing must be positive, got {}",
                self.spacing
            ))
            .into());
        }

        let mut cuts = Vec::new();
        let mut column = 0usize;
        loop {
            let x = self.spacing / 2.0 + column as f64 * self.spacing;
            if x >= self.width {
                break;
            }
            self.fill_column(column, x, &mut cuts);
            column += 1;
        }
        Ok(cuts)
    }

    fn fill_column(&self, column: usize, x: f64, cuts: &mut Vec<HingeCut>) {
        let odd = column % 2 == 1;
        let (mut y, leading_end) = if odd {
            let shifted = self.gap + self.length / 2.0;
            (shifted, shifted - self.spacing)
        } else {
            (self.gap, self.gap)
        };
        let leading_start = (leading_end - self.length).max(0.0);
        if leading_end <= leading_start {
            return;
        }

        let cut = |kind, y_start, y_end| HingeCut {
            column,
            kind,
            x,
            y_start,
            y_end,
        };

        cuts.push(cut(CutKind::Leading, leading_start, leading_end));

        while y + self.length <= self.height - self.gap {
            cuts.push(cut(CutKind::Full, y, y + self.length));
            y += self.length + self.spacing;
        }

        let trailing_end = self.height.min(y + self.length);
        if y < self.height && trailing_end > y {
            cuts.push(cut(CutKind::Trailing, y, trailing_end));
        }
    }
}
