use thiserror::Error;

/// Top-level error type for the boxcut geometry core.
#[derive(Debug, Error)]
pub enum BoxcutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised when geometry is too degenerate to process.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("not enough points after {stage}: got {count}, need at least 3")]
    InsufficientPoints { stage: &'static str, count: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to operation arguments.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to generation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parameter {name} = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Convenience type alias for results using [`BoxcutError`].
pub type Result<T> = std::result::Result<T, BoxcutError>;

impl BoxcutError {
    /// Returns `true` for the invalid-geometry family of failures.
    #[must_use]
    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }
}
