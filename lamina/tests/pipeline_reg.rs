//! End-to-end pipeline regression test
//!
//! Drives the whole toolkit the way a host viewer does: smooth an image,
//! threshold it, relabel the mask, check what the availability rules offer
//! for the resulting layers, and measure the regions.

use lamina::measure::{
    analysis_enablement, available_properties, label_connected, regionprops_table,
    session::MeasureSession,
};
use lamina::ops::{BorderMode, ThresholdMethod, apply_threshold, gaussian};
use lamina::{Category, LayerKind, Registry, naming};
use lamina_test::{RegParams, image_2d};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // Two bright squares on a dark field
    let img = image_2d(&[
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 9.0, 9.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 9.0, 9.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 8.0, 8.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 8.0, 8.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]);

    let smoothed = gaussian(&img, 0.5, BorderMode::Reflect).unwrap();
    let (mask, _) = apply_threshold(&smoothed, ThresholdMethod::Otsu).unwrap();
    let (labels, count) = label_connected(&mask, 1, 0).unwrap();
    rp.compare_values(2.0, count as f64, 0.0);

    // The availability rules accept the matching pair
    let offered = available_properties(labels.shape(), Some(smoothed.shape()));
    rp.compare_bool(true, offered.contains(&"intensity_mean"));
    rp.compare_bool(true, offered.contains(&"perimeter"));
    let gate = analysis_enablement(Some(labels.shape()), Some(smoothed.shape()));
    rp.compare_bool(true, gate.enabled);

    // Measure against the original image and park the table in a session
    let table = regionprops_table(
        &labels,
        Some(&img),
        &["area", "centroid", "intensity_max", "label"],
    )
    .unwrap();
    rp.compare_slices(&[4.0, 4.0], table.column("area").unwrap(), 0.0);
    rp.compare_slices(&[9.0, 8.0], table.column("intensity_max").unwrap(), 0.0);
    rp.compare_slices(&[1.5, 4.5], table.column("centroid-0").unwrap(), 1e-12);
    rp.compare_slices(&[1.5, 5.5], table.column("centroid-1").unwrap(), 1e-12);

    let mut session = MeasureSession::new();
    session.set_results(table);
    rp.compare_bool(true, session.results().is_some());

    // The registry knows every operation the pipeline used
    let registry = Registry::new();
    for name in ["gaussian_filter", "threshold", "label", "regionprops"] {
        rp.compare_bool(true, registry.get(name).is_some());
    }
    rp.compare_bool(
        true,
        registry.get("threshold").unwrap().output == Some(LayerKind::Labels),
    );
    rp.compare_bool(
        true,
        !registry.by_category(Category::Measurement).is_empty(),
    );

    // Output layer names follow the host naming scheme
    rp.compare_bool(
        true,
        naming::gaussian_layer_name(0.5).contains("Gaussian"),
    );
    rp.compare_bool(
        true,
        naming::threshold_layer_name("nuclei", "otsu").contains("otsu"),
    );

    assert!(rp.cleanup());
}
