//! Operation registry
//!
//! One catalogue of every operation the toolkit offers, keyed by name. A
//! host UI can enumerate it to build menus, link each entry to its upstream
//! reference documentation, and learn what kind of layer the operation
//! produces.

use lamina_core::LayerKind;
use std::collections::BTreeMap;

/// Functional grouping of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Filtering,
    Thresholding,
    Morphology,
    Restoration,
    Detection,
    Measurement,
    Arithmetic,
    AxisManipulation,
}

impl Category {
    /// Display name for menu headings
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Filtering => "Filtering",
            Category::Thresholding => "Thresholding",
            Category::Morphology => "Morphology",
            Category::Restoration => "Restoration",
            Category::Detection => "Detection",
            Category::Measurement => "Measurement",
            Category::Arithmetic => "Arithmetic",
            Category::AxisManipulation => "Axis manipulation",
        }
    }
}

/// Description of one registered operation
#[derive(Debug, Clone)]
pub struct OperationInfo {
    /// Registry key, also the menu entry name
    pub name: &'static str,
    pub category: Category,
    /// Reference documentation for the underlying algorithm
    pub doc_url: &'static str,
    /// Kind of layer the operation produces, `None` for pure measurements
    pub output: Option<LayerKind>,
}

/// Catalogue of all operations, ordered by name
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<&'static str, OperationInfo>,
}

impl Registry {
    /// Build the full catalogue
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for info in CATALOGUE {
            entries.insert(info.name, info.clone());
        }
        Self { entries }
    }

    /// Look up one operation
    pub fn get(&self, name: &str) -> Option<&OperationInfo> {
        self.entries.get(name)
    }

    /// All operation names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// All operations in one category, in name order
    pub fn by_category(&self, category: Category) -> Vec<&OperationInfo> {
        self.entries
            .values()
            .filter(|info| info.category == category)
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

const CATALOGUE: &[OperationInfo] = &[
    OperationInfo {
        name: "gaussian_filter",
        category: Category::Filtering,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.filters.html#skimage.filters.gaussian",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "median_filter",
        category: Category::Filtering,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.filters.html#skimage.filters.median",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "sobel_filter",
        category: Category::Filtering,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.filters.html#skimage.filters.sobel",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "threshold",
        category: Category::Thresholding,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.filters.html#skimage.filters.threshold_otsu",
        output: Some(LayerKind::Labels),
    },
    OperationInfo {
        name: "binary_morphology",
        category: Category::Morphology,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.morphology.html",
        output: Some(LayerKind::Labels),
    },
    OperationInfo {
        name: "grayscale_morphology",
        category: Category::Morphology,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.morphology.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "rolling_ball",
        category: Category::Restoration,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.restoration.html#skimage.restoration.rolling_ball",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "peak_local_max",
        category: Category::Detection,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.feature.html#skimage.feature.peak_local_max",
        output: Some(LayerKind::Points),
    },
    OperationInfo {
        name: "label",
        category: Category::Measurement,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.measure.html#skimage.measure.label",
        output: Some(LayerKind::Labels),
    },
    OperationInfo {
        name: "regionprops",
        category: Category::Measurement,
        doc_url: "https://scikit-image.org/docs/stable/api/skimage.measure.html#skimage.measure.regionprops_table",
        output: None,
    },
    OperationInfo {
        name: "arithmetic",
        category: Category::Arithmetic,
        doc_url: "https://numpy.org/doc/stable/reference/routines.math.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "flip",
        category: Category::AxisManipulation,
        doc_url: "https://numpy.org/doc/stable/reference/generated/numpy.flip.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "swapaxes",
        category: Category::AxisManipulation,
        doc_url: "https://numpy.org/doc/stable/reference/generated/numpy.swapaxes.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "moveaxis",
        category: Category::AxisManipulation,
        doc_url: "https://numpy.org/doc/stable/reference/generated/numpy.moveaxis.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "expand_dims",
        category: Category::AxisManipulation,
        doc_url: "https://numpy.org/doc/stable/reference/generated/numpy.expand_dims.html",
        output: Some(LayerKind::Image),
    },
    OperationInfo {
        name: "squeeze",
        category: Category::AxisManipulation,
        doc_url: "https://numpy.org/doc/stable/reference/generated/numpy.squeeze.html",
        output: Some(LayerKind::Image),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_operation() {
        let registry = Registry::new();
        let info = registry.get("gaussian_filter").unwrap();
        assert_eq!(info.category, Category::Filtering);
        assert_eq!(info.output, Some(LayerKind::Image));
        assert!(info.doc_url.starts_with("https://scikit-image.org/"));
    }

    #[test]
    fn test_unknown_operation() {
        assert!(Registry::new().get("unsharp_mask").is_none());
    }

    #[test]
    fn test_names_sorted_and_unique() {
        let names = Registry::new().names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn test_by_category() {
        let registry = Registry::new();
        let filters = registry.by_category(Category::Filtering);
        assert_eq!(filters.len(), 3);
        assert!(filters.iter().all(|i| i.category == Category::Filtering));
        assert_eq!(registry.by_category(Category::AxisManipulation).len(), 5);
    }

    #[test]
    fn test_measurements_produce_no_layer() {
        let registry = Registry::new();
        assert_eq!(registry.get("regionprops").unwrap().output, None);
        assert_eq!(
            registry.get("label").unwrap().output,
            Some(LayerKind::Labels)
        );
    }
}
