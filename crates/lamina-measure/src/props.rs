//! Property catalogue, availability, and selection validation
//!
//! The catalogue is the closed set of region-measurement property names the
//! backend can compute. Which names are selectable at any moment depends on
//! two things only: the dimensionality of the selected labels stack, and
//! whether an intensity stack is paired with it. Both questions are answered
//! here as pure functions so the host UI can recompute on every selection
//! change without special cases.

use lamina_core::Shape;

/// Every property the measurement backend can compute, sorted
/// lexicographically.
pub const ALL_PROPERTIES: &[&str] = &[
    "area",
    "area_bbox",
    "bbox",
    "centroid",
    "centroid_local",
    "centroid_weighted",
    "eccentricity",
    "equivalent_diameter_area",
    "extent",
    "intensity_max",
    "intensity_mean",
    "intensity_min",
    "intensity_std",
    "label",
    "moments_hu",
    "moments_weighted_hu",
    "num_pixels",
    "orientation",
    "perimeter",
    "perimeter_crofton",
];

/// Properties only defined when the labels stack has exactly 2 dimensions.
pub const ONLY_2D_PROPERTIES: &[&str] = &[
    "eccentricity",
    "moments_hu",
    "moments_weighted_hu",
    "orientation",
    "perimeter",
    "perimeter_crofton",
];

/// Properties that need a paired intensity stack of identical shape.
///
/// Overlaps `ONLY_2D_PROPERTIES` in `moments_weighted_hu`, which needs both
/// conditions to hold.
pub const INTENSITY_PROPERTIES: &[&str] = &[
    "centroid_weighted",
    "intensity_max",
    "intensity_mean",
    "intensity_min",
    "intensity_std",
    "moments_weighted_hu",
];

/// Whether `name` is in the catalogue at all
pub fn is_known_property(name: &str) -> bool {
    ALL_PROPERTIES.binary_search(&name).is_ok()
}

/// Whether `name` is restricted to 2-dimensional stacks
pub fn is_2d_only(name: &str) -> bool {
    ONLY_2D_PROPERTIES.binary_search(&name).is_ok()
}

/// Whether `name` needs a paired intensity stack
pub fn needs_intensity(name: &str) -> bool {
    INTENSITY_PROPERTIES.binary_search(&name).is_ok()
}

/// Compute the set of currently selectable property names
///
/// Starts from the full catalogue, drops the 2-D-only names when the labels
/// stack is not 2-dimensional, and drops the intensity-weighted names when
/// no intensity stack is selected. The result is sorted lexicographically
/// and is identical for identical inputs, so a choice list repopulated from
/// it is stable.
///
/// An absent intensity stack is an expected case, not an error; this
/// function cannot fail.
pub fn available_properties(labels: &Shape, intensity: Option<&Shape>) -> Vec<&'static str> {
    let is_2d = labels.ndim() == 2;
    let has_intensity = intensity.is_some();

    ALL_PROPERTIES
        .iter()
        .copied()
        .filter(|name| (is_2d || !is_2d_only(name)) && (has_intensity || !needs_intensity(name)))
        .collect()
}

/// Whether the analyze action is currently permitted
///
/// When `enabled` is false, `reason` carries a message the host UI is
/// expected to surface to the user. The engine itself never raises an error
/// for an invalid selection; a bad selection is a normal, recoverable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Enablement {
    /// Whether the analyze action may run
    pub enabled: bool,
    /// Human-readable explanation when disabled
    pub reason: Option<String>,
}

impl Enablement {
    fn permitted() -> Self {
        Self {
            enabled: true,
            reason: None,
        }
    }

    fn refused(reason: String) -> Self {
        Self {
            enabled: false,
            reason: Some(reason),
        }
    }
}

/// Decide whether region analysis may run for the current layer selection
///
/// Decision table, evaluated in order:
///
/// | labels | intensity | shapes match | result |
/// |--------|-----------|--------------|--------|
/// | absent | any       | -            | disabled, "no labels layer selected" |
/// | present| absent    | -            | enabled (labels-only analysis) |
/// | present| present   | yes          | enabled |
/// | present| present   | no           | disabled, "shape mismatch ..." |
///
/// The intensity stack is entirely optional, but once supplied its shape
/// must match the labels stack exactly. Labels-only selections are always
/// enabled; the mismatch check only applies when both stacks are present.
pub fn analysis_enablement(labels: Option<&Shape>, intensity: Option<&Shape>) -> Enablement {
    let Some(labels) = labels else {
        return Enablement::refused("no labels layer selected".to_string());
    };

    match intensity {
        None => Enablement::permitted(),
        Some(intensity) if intensity == labels => Enablement::permitted(),
        Some(intensity) => Enablement::refused(format!(
            "shape mismatch between labels {} and intensity image {}",
            labels, intensity
        )),
    }
}
