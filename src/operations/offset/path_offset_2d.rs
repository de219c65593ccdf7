use crate::error::{GeometryError, Result};
use crate::geometry::Path;
use crate::tessellation::{FlattenPath, DEFAULT_CHORD_TOLERANCE};

use super::PolygonOffset2D;

/// Offsets a closed path: flatten, offset the polygon, emit straight lines.
///
/// The same `precision` drives the flattening chord tolerance and the
/// simplification tolerance of the polygon offset. Curves are not re-fitted;
/// the output is `M`, `L`…, `Z`.
#[derive(Debug)]
pub struct PathOffset2D<'a> {
    path: &'a Path,
    distance: f64,
    precision: f64,
}

impl<'a> PathOffset2D<'a> {
    #[must_use]
    pub fn new(path: &'a Path, distance: f64) -> Self {
        Self {
            path,
            distance,
            precision: DEFAULT_CHORD_TOLERANCE,
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InsufficientPoints` if flattening yields fewer
    /// than 3 points, and any error of [`PolygonOffset2D::execute`].
    pub fn execute(&self) -> Result<Path> {
        let flat = FlattenPath::new(self.path, self.precision).execute();
        if flat.len() < 3 {
            return Err(GeometryError::InsufficientPoints {
                stage: "flatten",
                count: flat.len(),
            }
            .into());
        }

        let offset = PolygonOffset2D::from_polyline(&flat, self.distance)
            .with_simplify_tolerance(self.precision)
            .execute()?;
        Ok(offset.to_path())
    }
}
