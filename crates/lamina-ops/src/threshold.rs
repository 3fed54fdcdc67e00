//! Automatic thresholding
//!
//! Provides the threshold catalogue: Otsu, Li, mean, and Yen. Each method
//! picks one global threshold from the stack's values; the mask keeps the
//! pixels strictly above it.

use crate::error::{OpsError, OpsResult};
use lamina_core::{ImageStack, LabelStack};
use std::str::FromStr;

const BINS: usize = 256;

/// Automatic threshold selection method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMethod {
    /// Otsu's method: maximize between-class variance
    #[default]
    Otsu,
    /// Li's iterative minimum cross-entropy method
    Li,
    /// Mean of all values
    Mean,
    /// Yen's maximum correlation criterion
    Yen,
}

impl ThresholdMethod {
    /// Method names as the threshold form lists them
    pub const CHOICES: &[&str] = &["otsu", "li", "mean", "yen"];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdMethod::Otsu => "otsu",
            ThresholdMethod::Li => "li",
            ThresholdMethod::Mean => "mean",
            ThresholdMethod::Yen => "yen",
        }
    }
}

impl FromStr for ThresholdMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "otsu" => Ok(ThresholdMethod::Otsu),
            "li" => Ok(ThresholdMethod::Li),
            "mean" => Ok(ThresholdMethod::Mean),
            "yen" => Ok(ThresholdMethod::Yen),
            other => Err(OpsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Compute the threshold a method selects for this stack
///
/// Works in any dimensionality; non-finite samples are ignored.
///
/// # Errors
///
/// Fails when the stack has no finite samples or all values are identical
/// (no threshold separates anything).
pub fn threshold_value(img: &ImageStack, method: ThresholdMethod) -> OpsResult<f64> {
    let finite: Vec<f64> = img.data().iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(OpsError::InvalidParameters(
            "no finite samples to threshold".to_string(),
        ));
    }

    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        return Err(OpsError::InvalidParameters(
            "constant stack has no threshold".to_string(),
        ));
    }

    match method {
        ThresholdMethod::Mean => Ok(finite.iter().sum::<f64>() / finite.len() as f64),
        ThresholdMethod::Otsu => Ok(otsu(&histogram(&finite, lo, hi), lo, hi)),
        ThresholdMethod::Yen => Ok(yen(&histogram(&finite, lo, hi), lo, hi)),
        ThresholdMethod::Li => Ok(li(&finite, lo, hi)),
    }
}

/// Threshold the stack into a 0/1 mask
///
/// Keeps pixels strictly above the selected threshold, as the host forms do
/// (`data > t`). Returns the mask and the threshold used.
pub fn apply_threshold(
    img: &ImageStack,
    method: ThresholdMethod,
) -> OpsResult<(LabelStack, f64)> {
    let t = threshold_value(img, method)?;
    let mut mask = LabelStack::new(img.shape().clone());
    for (out, &v) in mask.data_mut().iter_mut().zip(img.data()) {
        *out = if v > t { 1 } else { 0 };
    }
    Ok((mask, t))
}

/// 256-bin histogram over [lo, hi]
fn histogram(values: &[f64], lo: f64, hi: f64) -> [f64; BINS] {
    let mut hist = [0.0; BINS];
    let scale = (BINS as f64 - 1.0) / (hi - lo);
    for &v in values {
        let bin = ((v - lo) * scale).round() as usize;
        hist[bin.min(BINS - 1)] += 1.0;
    }
    let total: f64 = hist.iter().sum();
    for h in &mut hist {
        *h /= total;
    }
    hist
}

fn bin_center(bin: usize, lo: f64, hi: f64) -> f64 {
    lo + bin as f64 * (hi - lo) / (BINS as f64 - 1.0)
}

/// Otsu: threshold maximizing between-class variance
fn otsu(hist: &[f64; BINS], lo: f64, hi: f64) -> f64 {
    let mut total_mean = 0.0;
    for (i, &p) in hist.iter().enumerate() {
        total_mean += i as f64 * p;
    }

    let mut best_bin = 0;
    let mut best_score = f64::NEG_INFINITY;
    let mut w0 = 0.0;
    let mut sum0 = 0.0;
    for t in 0..BINS - 1 {
        w0 += hist[t];
        sum0 += t as f64 * hist[t];
        let w1 = 1.0 - w0;
        if w0 <= 0.0 || w1 <= 0.0 {
            continue;
        }
        let m0 = sum0 / w0;
        let m1 = (total_mean - sum0) / w1;
        let score = w0 * w1 * (m0 - m1) * (m0 - m1);
        if score > best_score {
            best_score = score;
            best_bin = t;
        }
    }
    bin_center(best_bin, lo, hi)
}

/// Yen: threshold maximizing the correlation criterion
fn yen(hist: &[f64; BINS], lo: f64, hi: f64) -> f64 {
    let mut best_bin = 0;
    let mut best_score = f64::NEG_INFINITY;
    let total_sq: f64 = hist.iter().map(|p| p * p).sum();

    let mut p1 = 0.0;
    let mut p1_sq = 0.0;
    for t in 0..BINS - 1 {
        p1 += hist[t];
        p1_sq += hist[t] * hist[t];
        let p2_sq = total_sq - p1_sq;
        if p1 <= 0.0 || p1 >= 1.0 || p1_sq <= 0.0 || p2_sq <= 0.0 {
            continue;
        }
        let score = (p1 * (1.0 - p1)).powi(2).ln() - (p1_sq * p2_sq).ln();
        if score > best_score {
            best_score = score;
            best_bin = t;
        }
    }
    bin_center(best_bin, lo, hi)
}

/// Li: iterative minimum cross-entropy threshold
///
/// Values are shifted to be strictly positive for the log terms and the
/// result is shifted back.
fn li(values: &[f64], lo: f64, hi: f64) -> f64 {
    let shift = lo - (hi - lo) * 1e-3;
    let shifted: Vec<f64> = values.iter().map(|v| v - shift).collect();

    let mean = shifted.iter().sum::<f64>() / shifted.len() as f64;
    let tolerance = (hi - lo) * 1e-6;
    let mut t = mean;

    for _ in 0..100 {
        let (mut sum0, mut n0, mut sum1, mut n1) = (0.0, 0usize, 0.0, 0usize);
        for &v in &shifted {
            if v <= t {
                sum0 += v;
                n0 += 1;
            } else {
                sum1 += v;
                n1 += 1;
            }
        }
        if n0 == 0 || n1 == 0 {
            break;
        }
        let m0 = sum0 / n0 as f64;
        let m1 = sum1 / n1 as f64;
        let next = (m1 - m0) / (m1.ln() - m0.ln());
        if (next - t).abs() < tolerance {
            t = next;
            break;
        }
        t = next;
    }
    t + shift
}
