//! Error types for grid classification and tile rendering.

use thiserror::Error;

/// Result type alias using VizError.
pub type VizResult<T> = Result<T, VizError>;

/// Errors raised while building a visualization.
///
/// Everything here is a construction-time failure. Per-pixel rendering
/// never produces an error; anomalies there resolve to a default value or
/// to [`crate::WARNING_COLOR`].
#[derive(Debug, Error)]
pub enum VizError {
    // === Classification Errors ===
    #[error("Degenerate value domain: min {min} is not below max {max}")]
    DegenerateDomain { min: f64, max: f64 },

    #[error("Invalid class count: {0}")]
    InvalidClassCount(usize),

    // === Color Errors ===
    #[error("Invalid color specification: {0}")]
    InvalidColor(String),

    #[error("At least one color is required")]
    EmptyColors,

    // === Input Errors ===
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }
}

impl From<std::io::Error> for VizError {
    fn from(err: std::io::Error) -> Self {
        VizError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::Serialization(format!("JSON error: {}", err))
    }
}
