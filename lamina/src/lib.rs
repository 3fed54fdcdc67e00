//! Lamina - Scientific image processing toolkit for viewer layers
//!
//! # Overview
//!
//! Lamina provides the processing and measurement backend of an image
//! viewer plugin:
//!
//! - Dense n-dimensional stacks for image and labels layers
//! - Filtering, thresholding, morphology, and background estimation
//! - Connected component labelling and per-region measurement tables
//! - Property availability rules that track which measurements the current
//!   layer selection supports
//!
//! # Example
//!
//! ```
//! use lamina::{Shape, LabelStack, available_properties};
//!
//! let labels = LabelStack::new(Shape::new(&[5, 4]).unwrap());
//! let props = available_properties(labels.shape(), None);
//! assert!(props.contains(&"area"));
//! assert!(!props.contains(&"intensity_mean"));
//! ```

pub mod registry;

// Re-export core types (primary data structures used everywhere)
pub use lamina_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use lamina_measure as measure;
pub use lamina_ops as ops;

// Re-export the measurement availability API at the top level; hosts reach
// for it on every selection change
pub use lamina_measure::{Enablement, analysis_enablement, available_properties};

pub use registry::{Category, OperationInfo, Registry};
