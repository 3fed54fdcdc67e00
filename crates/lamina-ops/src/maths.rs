//! Element-wise arithmetic between two stacks

use crate::error::{OpsError, OpsResult};
use lamina_core::ImageStack;
use std::str::FromStr;

/// Element-wise combination mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArithMode {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithMode {
    /// Mode names as the arithmetic form lists them
    pub const CHOICES: &[&str] = &["add", "subtract", "multiply", "divide"];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithMode::Add => "add",
            ArithMode::Subtract => "subtract",
            ArithMode::Multiply => "multiply",
            ArithMode::Divide => "divide",
        }
    }
}

impl FromStr for ArithMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ArithMode::Add),
            "subtract" => Ok(ArithMode::Subtract),
            "multiply" => Ok(ArithMode::Multiply),
            "divide" => Ok(ArithMode::Divide),
            other => Err(OpsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Combine two stacks element-wise
///
/// Both stacks must have identical shapes. Division by zero follows IEEE 754
/// and yields infinities or NaN rather than an error.
pub fn combine(a: &ImageStack, b: &ImageStack, mode: ArithMode) -> OpsResult<ImageStack> {
    if a.shape() != b.shape() {
        return Err(OpsError::ShapeMismatch(
            a.shape().dims().to_vec(),
            b.shape().dims().to_vec(),
        ));
    }

    let mut out = ImageStack::new(a.shape().clone());
    for ((out, &x), &y) in out.data_mut().iter_mut().zip(a.data()).zip(b.data()) {
        *out = match mode {
            ArithMode::Add => x + y,
            ArithMode::Subtract => x - y,
            ArithMode::Multiply => x * y,
            ArithMode::Divide => x / y,
        };
    }
    Ok(out)
}
