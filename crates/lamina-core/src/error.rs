//! Error types for lamina-core
//!
//! Provides a unified error type for the core data structures. Each variant
//! carries enough context for diagnostics without exposing internals.

use thiserror::Error;

/// Lamina core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Shape with no dimensions
    #[error("empty shape: a stack needs at least one dimension")]
    EmptyShape,

    /// Shape with a zero-sized dimension
    #[error("invalid shape: dimension {axis} has size 0")]
    ZeroDimension { axis: usize },

    /// Data length does not match the shape
    #[error("data length mismatch: shape holds {expected} elements, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Coordinate outside the stack
    #[error("index out of bounds: {index:?} for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// Wrong number of coordinates for the stack's dimensionality
    #[error("rank mismatch: {expected} coordinates expected, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Two stacks that must have identical shapes do not
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
}

/// Result type alias for lamina-core operations
pub type Result<T> = std::result::Result<T, Error>;
