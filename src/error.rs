//! Error type shared by the generation pipeline and the export helpers.

use thiserror::Error;

/// Errors produced while generating or exporting a terrain tile.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// A configuration value that cannot be clamped into range
    /// (empty curve, empty gradient, non-finite numbers), or a strict
    /// validation failure.
    #[error("invalid terrain configuration: {0}")]
    InvalidConfiguration(String),

    /// A heightmap was applied to a mesh built for a different grid size.
    #[error("dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
