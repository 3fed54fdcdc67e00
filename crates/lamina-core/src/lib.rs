//! Lamina Core - Basic data structures for the lamina image layer toolkit
//!
//! This crate provides the fundamental data structures used throughout the
//! lamina workspace:
//!
//! - [`Stack`] - Dense row-major n-dimensional array, the payload of one
//!   viewer layer ([`ImageStack`] for intensity data, [`LabelStack`] for
//!   labeled regions)
//! - [`Shape`] / [`IndexIter`] - Dimension tuples and coordinate iteration
//! - [`LayerKind`] and the [`naming`] conventions for derived layers
//!
//! # Examples
//!
//! ```
//! use lamina_core::{LabelStack, Shape, Stack};
//!
//! let shape = Shape::new(&[5, 4]).unwrap();
//! let mut labels = LabelStack::new(shape);
//! labels.set(&[1, 1], 1).unwrap();
//! labels.set(&[3, 2], 2).unwrap();
//! assert_eq!(labels.max_label(), 2);
//! ```

pub mod error;
pub mod layer;
pub mod shape;
pub mod stack;

pub use error::{Error, Result};
pub use layer::{LayerKind, naming};
pub use shape::{IndexIter, Shape};
pub use stack::{ImageStack, LabelStack, Stack};
