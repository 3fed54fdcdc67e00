//! Error types for lamina-measure

use thiserror::Error;

/// Errors that can occur during region measurement
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lamina_core::Error),

    /// Property name not in the catalogue
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// Property only defined for 2-dimensional stacks
    #[error("property {property} is only defined for 2-dimensional stacks, got {ndim} dimensions")]
    NotTwoDimensional { property: String, ndim: usize },

    /// Property needs an intensity stack that was not supplied
    #[error("property {property} requires an intensity stack")]
    MissingIntensity { property: String },

    /// Labels and intensity stacks must have identical shapes
    #[error("shape mismatch between labels {labels:?} and intensity image {intensity:?}")]
    ShapeMismatch {
        labels: Vec<usize>,
        intensity: Vec<usize>,
    },

    /// Connectivity outside 1..=ndim
    #[error("invalid connectivity {connectivity} for {ndim}-dimensional stack")]
    InvalidConnectivity { connectivity: usize, ndim: usize },
}

/// Result type for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;
