//! Filtering regression test
//!
//! Exercises Gaussian smoothing under each border mode, median filtering,
//! Sobel edges, and the axis manipulations on a small known image.

use lamina_ops::{
    BorderMode, flip, gaussian, median_filter, sobel, squeeze, swapaxes,
};
use lamina_test::{RegParams, image_2d};

#[test]
fn filter_reg() {
    let mut rp = RegParams::new("filter");

    // Gaussian on a constant image is the identity in every border mode
    let flat = image_2d(&[&[4.0; 6]; 6].map(|r| r as &[f64]));
    for mode in [
        BorderMode::Reflect,
        BorderMode::Nearest,
        BorderMode::Mirror,
        BorderMode::Wrap,
    ] {
        let smoothed = gaussian(&flat, 1.5, mode).unwrap();
        rp.compare_slices(flat.data(), smoothed.data(), 1e-10);
    }

    // Constant padding pulls the border toward zero but leaves the interior
    // alone once the kernel fits inside
    let wide = image_2d(&[&[4.0; 11]; 11].map(|r| r as &[f64]));
    let smoothed = gaussian(&wide, 1.0, BorderMode::Constant).unwrap();
    rp.compare_bool(true, smoothed.get(&[0, 0]).unwrap() < 4.0);
    rp.compare_values(4.0, smoothed.get(&[5, 5]).unwrap(), 1e-9);

    // Smoothing spreads an impulse but keeps its center the maximum
    let mut impulse = image_2d(&[&[0.0; 7]; 7].map(|r| r as &[f64]));
    impulse.set(&[3, 3], 1.0).unwrap();
    let smoothed = gaussian(&impulse, 1.0, BorderMode::Reflect).unwrap();
    let total: f64 = smoothed.data().iter().sum();
    rp.compare_values(1.0, total, 1e-9);
    let peak = smoothed
        .data()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    rp.compare_values(peak, smoothed.get(&[3, 3]).unwrap(), 0.0);

    // Median filtering removes salt noise without moving edges
    let noisy = image_2d(&[
        &[1.0, 1.0, 1.0, 9.0, 9.0],
        &[1.0, 50.0, 1.0, 9.0, 9.0],
        &[1.0, 1.0, 1.0, 9.0, 9.0],
    ]);
    let cleaned = median_filter(&noisy, 1).unwrap();
    rp.compare_values(1.0, cleaned.get(&[1, 1]).unwrap(), 0.0);
    rp.compare_values(9.0, cleaned.get(&[1, 4]).unwrap(), 0.0);

    // Sobel lights up only around a step edge
    let step = image_2d(&[
        &[0.0, 0.0, 8.0, 8.0],
        &[0.0, 0.0, 8.0, 8.0],
        &[0.0, 0.0, 8.0, 8.0],
        &[0.0, 0.0, 8.0, 8.0],
    ]);
    let edges = sobel(&step).unwrap();
    rp.compare_bool(true, edges.get(&[2, 1]).unwrap() > 0.0);
    rp.compare_bool(true, edges.get(&[2, 2]).unwrap() > 0.0);
    rp.compare_values(0.0, edges.get(&[2, 0]).unwrap(), 0.0);
    rp.compare_values(0.0, edges.get(&[2, 3]).unwrap(), 0.0);

    // Axis manipulation round trips
    let img = image_2d(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let transposed = swapaxes(&img, 0, 1).unwrap();
    rp.compare_values(3.0, transposed.get(&[2, 0]).unwrap(), 0.0);
    let back = swapaxes(&transposed, 0, 1).unwrap();
    rp.compare_slices(img.data(), back.data(), 0.0);
    let twice = flip(&flip(&img, 0).unwrap(), 0).unwrap();
    rp.compare_slices(img.data(), twice.data(), 0.0);
    let squeezed = squeeze(&lamina_ops::expand_dims(&img, 1).unwrap()).unwrap();
    rp.compare_slices(img.data(), squeezed.data(), 0.0);

    assert!(rp.cleanup());
}
