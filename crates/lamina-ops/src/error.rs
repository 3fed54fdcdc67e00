//! Error types for lamina-ops

use thiserror::Error;

/// Errors that can occur during image processing operations
#[derive(Debug, Error)]
pub enum OpsError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lamina_core::Error),

    /// Unsupported stack dimensionality for this operation
    #[error("unsupported dimensionality: expected {expected}, got {actual} dimensions")]
    UnsupportedDimensionality {
        expected: &'static str,
        actual: usize,
    },

    /// Two stacks that must have identical shapes do not
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Axis argument outside the stack's rank
    #[error("axis {axis} out of range for {ndim}-dimensional stack")]
    AxisOutOfRange { axis: usize, ndim: usize },

    /// Method or mode name not in the operation's choices
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for image processing operations
pub type OpsResult<T> = Result<T, OpsError>;
