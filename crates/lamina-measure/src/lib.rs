//! lamina-measure - Region measurement for the lamina image layer toolkit
//!
//! This crate provides the measurement side of the toolkit:
//!
//! - **Property availability** - Which region properties are selectable for
//!   the current layer selection, and whether analysis may run at all
//! - **Region property tables** - Per-region measurements over a label
//!   stack, optionally weighted by an intensity stack
//! - **Connected-component labeling** - Relabeling equal-valued runs
//! - **Measurement sessions** - Explicit owner for the latest results table
//!
//! # Examples
//!
//! ## Checking a layer selection
//!
//! ```
//! use lamina_core::Shape;
//! use lamina_measure::{analysis_enablement, available_properties};
//!
//! let labels = Shape::new(&[3, 5, 4]).unwrap();
//!
//! // 3-D labels without intensity: planar and weighted properties drop out
//! let props = available_properties(&labels, None);
//! assert!(!props.contains(&"perimeter"));
//! assert!(!props.contains(&"intensity_mean"));
//!
//! // Labels-only analysis is always permitted
//! let gate = analysis_enablement(Some(&labels), None);
//! assert!(gate.enabled);
//! ```
//!
//! ## Measuring regions
//!
//! ```
//! use lamina_core::{LabelStack, Shape};
//! use lamina_measure::regionprops_table;
//!
//! let shape = Shape::new(&[1, 4]).unwrap();
//! let labels = LabelStack::from_vec(shape, vec![1, 1, 0, 2]).unwrap();
//! let table = regionprops_table(&labels, None, &["area", "label"]).unwrap();
//! assert_eq!(table.column("area").unwrap(), &[2.0, 1.0]);
//! ```

pub mod error;
pub mod label;
pub mod props;
pub mod regionprops;
pub mod session;

// Re-export core types
pub use lamina_core;

// Re-export error types
pub use error::{MeasureError, MeasureResult};

// Re-export the availability and validation engine
pub use props::{
    ALL_PROPERTIES, Enablement, INTENSITY_PROPERTIES, ONLY_2D_PROPERTIES, analysis_enablement,
    available_properties, is_2d_only, is_known_property, needs_intensity,
};

// Re-export measurement types and functions
pub use regionprops::{Column, ResultsTable, regionprops_table};

// Re-export labeling
pub use label::label_connected;

// Re-export session types
pub use session::{MeasureSession, retain_selection};
