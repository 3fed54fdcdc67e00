//! Viewer layer kinds and naming conventions
//!
//! Every operation adds its result back to the host viewer as a new layer.
//! The layer name is derived from the source layer and the operation, so a
//! processing chain stays readable in the layer list.

/// Kind of viewer layer an operation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Continuous-valued image layer
    Image,
    /// Integer label layer
    Labels,
    /// Point coordinates layer
    Points,
}

impl LayerKind {
    /// Lowercase name as the host viewer spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Image => "image",
            LayerKind::Labels => "labels",
            LayerKind::Points => "points",
        }
    }
}

/// Layer naming conventions
pub mod naming {
    /// Standard derived-layer name: `{base}_{op}`
    pub fn suffixed(base: &str, op: &str) -> String {
        format!("{}_{}", base, op)
    }

    /// Gaussian filter output name, carrying the sigma used
    pub fn gaussian_layer_name(sigma: f64) -> String {
        format!("Gaussian Filter σ={}", sigma)
    }

    /// Threshold output name: `{base}_threshold_{method}`
    pub fn threshold_layer_name(base: &str, method: &str) -> String {
        format!("{}_threshold_{}", base, method)
    }

    /// Arithmetic output name: `Result_{mode}`
    pub fn arithmetic_layer_name(mode: &str) -> String {
        format!("Result_{}", mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_kind_names() {
        assert_eq!(LayerKind::Image.as_str(), "image");
        assert_eq!(LayerKind::Labels.as_str(), "labels");
        assert_eq!(LayerKind::Points.as_str(), "points");
    }

    #[test]
    fn test_naming_conventions() {
        assert_eq!(naming::suffixed("cells", "erosion"), "cells_erosion");
        assert_eq!(
            naming::threshold_layer_name("cells", "otsu"),
            "cells_threshold_otsu"
        );
        assert_eq!(naming::arithmetic_layer_name("add"), "Result_add");
        assert_eq!(naming::gaussian_layer_name(1.5), "Gaussian Filter σ=1.5");
    }
}
