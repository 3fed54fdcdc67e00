//! Feature detection
//!
//! Local maximum detection for spot finding. Candidates are pixels that are
//! the strict-or-equal maximum of their neighborhood; they are then greedily
//! thinned so no two survivors lie within the minimum distance.

use crate::error::{OpsError, OpsResult};
use lamina_core::ImageStack;

/// Options for [`peak_local_max`]
#[derive(Debug, Clone)]
pub struct PeakOptions {
    /// Minimum euclidean distance between peaks, in pixels
    pub min_distance: usize,
    /// Absolute intensity floor for candidates
    pub threshold_abs: f64,
    /// Intensity floor as a fraction of the stack maximum
    pub threshold_rel: f64,
    /// Drop candidates within `min_distance` of the stack boundary
    pub exclude_border: bool,
}

impl Default for PeakOptions {
    fn default() -> Self {
        PeakOptions {
            min_distance: 10,
            threshold_abs: 0.0,
            threshold_rel: 0.0,
            exclude_border: true,
        }
    }
}

/// Find local intensity maxima
///
/// Works in any dimensionality; non-finite samples are ignored. A pixel is
/// a candidate when no sample in its
/// `min_distance` window exceeds it and it clears both thresholds. Candidates
/// are visited in descending intensity; each survivor suppresses later
/// candidates within `min_distance` of it. Coordinates come back in that
/// descending-intensity order.
pub fn peak_local_max(img: &ImageStack, options: &PeakOptions) -> OpsResult<Vec<Vec<usize>>> {
    if options.min_distance == 0 {
        return Err(OpsError::InvalidParameters(
            "min_distance must be positive".to_string(),
        ));
    }

    let global_max = img
        .data()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let global_min = img.data().iter().copied().fold(f64::INFINITY, f64::min);
    // Pixels at the global minimum never qualify, so flat background is
    // not reported as a plateau of peaks
    let floor = options
        .threshold_abs
        .max(options.threshold_rel * global_max)
        .max(global_min);

    let dims = img.shape().dims().to_vec();
    let d = options.min_distance as i64;

    let mut candidates: Vec<(f64, Vec<usize>)> = Vec::new();
    'pixels: for coord in img.shape().indices() {
        let v = img.get(&coord).expect("iterated coordinate in bounds");
        if !v.is_finite() || v <= floor {
            continue;
        }
        if options.exclude_border {
            for (axis, &c) in coord.iter().enumerate() {
                if (c as i64) < d || c as i64 >= dims[axis] as i64 - d {
                    continue 'pixels;
                }
            }
        }
        if !window_max(img, &dims, &coord, d, v) {
            continue;
        }
        candidates.push((v, coord));
    }

    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

    let min_sq = (options.min_distance * options.min_distance) as f64;
    let mut peaks: Vec<Vec<usize>> = Vec::new();
    for (_, coord) in candidates {
        let suppressed = peaks.iter().any(|p| distance_sq(p, &coord) < min_sq);
        if !suppressed {
            peaks.push(coord);
        }
    }
    Ok(peaks)
}

/// True when no in-bounds sample within radius `d` exceeds `v`
fn window_max(img: &ImageStack, dims: &[usize], coord: &[usize], d: i64, v: f64) -> bool {
    let ndim = coord.len();
    let mut delta = vec![-d; ndim];
    loop {
        let mut sample = Vec::with_capacity(ndim);
        let mut in_bounds = true;
        for axis in 0..ndim {
            let p = coord[axis] as i64 + delta[axis];
            if p < 0 || p >= dims[axis] as i64 {
                in_bounds = false;
                break;
            }
            sample.push(p as usize);
        }
        if in_bounds {
            let s = img.get(&sample).expect("sample in bounds");
            if s > v {
                return false;
            }
        }

        // Odometer step over the window
        let mut axis = ndim;
        loop {
            if axis == 0 {
                return true;
            }
            axis -= 1;
            delta[axis] += 1;
            if delta[axis] <= d {
                break;
            }
            delta[axis] = -d;
        }
    }
}

fn distance_sq(a: &[usize], b: &[usize]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}
