//! lamina-ops - Image processing operations for viewer layers
//!
//! This crate provides the processing catalogue applied to layer stacks:
//!
//! - Filtering: Gaussian smoothing, median filtering, Sobel edge magnitude
//! - Border handling modes for neighborhood operations
//! - Automatic thresholding: Otsu, Li, mean, and Yen
//! - Binary and grayscale morphology with disk, square, and diamond footprints
//! - Rolling-ball background estimation and subtraction
//! - Local maximum detection for spot finding
//! - Axis manipulation: flip, swap, move, expand, squeeze
//! - Element-wise arithmetic between two stacks

pub mod axis;
pub mod border;
pub mod detection;
mod error;
pub mod filter;
pub mod maths;
pub mod morphology;
pub mod restoration;
pub mod threshold;

pub use error::{OpsError, OpsResult};

// Re-export filtering functions
pub use border::BorderMode;
pub use filter::{gaussian, median_filter, sobel};

// Re-export thresholding
pub use threshold::{ThresholdMethod, apply_threshold, threshold_value};

// Re-export morphology
pub use morphology::{Footprint, MorphMethod, binary_morphology, grayscale_morphology};

// Re-export background estimation
pub use restoration::{rolling_ball, subtract_background};

// Re-export detection
pub use detection::{PeakOptions, peak_local_max};

// Re-export axis manipulation
pub use axis::{expand_dims, flip, moveaxis, squeeze, swapaxes};

// Re-export arithmetic
pub use maths::{ArithMode, combine};
