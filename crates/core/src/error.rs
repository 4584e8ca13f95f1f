//! Error types shared across the heatsim workspace.

use thiserror::Error;

/// Errors produced by simulation and rendering operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Width or height was zero, or their product overflowed, when
    /// creating a heat map or snapshot.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A palette name was not recognized or a palette could not be built.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A file write failed while producing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
