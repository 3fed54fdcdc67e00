//! lamina-test - Regression test helpers for lamina
//!
//! Provides a small regression framework in the style of the classic
//! image-library test harnesses: a [`RegParams`] accumulator that compares
//! values, records failures, and reports at the end, plus literal
//! constructors for small test stacks.
//!
//! # Usage
//!
//! ```
//! use lamina_test::{RegParams, labels_2d};
//!
//! let mut rp = RegParams::new("example");
//! let mask = labels_2d(&[&[0, 2], &[1, 0]]);
//! rp.compare_values(2.0, mask.max_label() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;
mod stacks;

pub use params::RegParams;
pub use stacks::{image_2d, image_3d, labels_2d, labels_3d};
