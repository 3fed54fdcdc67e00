//! Background estimation
//!
//! Rolling-ball background estimation for uneven illumination. A ball of the
//! given radius is rolled under the intensity surface; the background is the
//! surface the ball traces, computed as grayscale erosion followed by
//! dilation with a non-flat ball structuring element.

use crate::error::{OpsError, OpsResult};
use lamina_core::ImageStack;

/// Estimate the background with the rolling-ball algorithm (2-D)
///
/// Returns the background stack; subtract it from the input to correct
/// uneven illumination. Bright features smaller than the ball vanish from
/// the background.
pub fn rolling_ball(img: &ImageStack, radius: usize) -> OpsResult<ImageStack> {
    if img.ndim() != 2 {
        return Err(OpsError::UnsupportedDimensionality {
            expected: "2-dimensional",
            actual: img.ndim(),
        });
    }
    if radius == 0 {
        return Err(OpsError::InvalidParameters(
            "ball radius must be positive".to_string(),
        ));
    }

    let ball = ball_heights(radius);
    let eroded = ball_erode(img, &ball);
    Ok(ball_dilate(&eroded, &ball))
}

/// Subtract the rolling-ball background from the input
pub fn subtract_background(img: &ImageStack, radius: usize) -> OpsResult<ImageStack> {
    let background = rolling_ball(img, radius)?;
    let mut out = ImageStack::new(img.shape().clone());
    for ((out, &v), &b) in out.data_mut().iter_mut().zip(img.data()).zip(background.data()) {
        *out = v - b;
    }
    Ok(out)
}

/// Offsets and heights of the ball's lower hemisphere
///
/// Height at (dy, dx) is `sqrt(r^2 - dy^2 - dx^2)` relative to the ball's
/// lowest point.
fn ball_heights(radius: usize) -> Vec<(i64, i64, f64)> {
    let r = radius as i64;
    let r2 = (radius * radius) as f64;
    let mut heights = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = (dy * dy + dx * dx) as f64;
            if d2 <= r2 {
                heights.push((dy, dx, (r2 - d2).sqrt()));
            }
        }
    }
    heights
}

/// Non-flat erosion: `min(v(p + o) - h(o))` over in-bounds offsets
fn ball_erode(img: &ImageStack, ball: &[(i64, i64, f64)]) -> ImageStack {
    let dims = img.shape().dims().to_vec();
    let mut out = ImageStack::new(img.shape().clone());
    for (off, coord) in img.shape().indices().enumerate() {
        let mut lowest = f64::INFINITY;
        for &(dy, dx, h) in ball {
            let y = coord[0] as i64 + dy;
            let x = coord[1] as i64 + dx;
            if y < 0 || y >= dims[0] as i64 || x < 0 || x >= dims[1] as i64 {
                continue;
            }
            let v = img.data()[y as usize * dims[1] + x as usize] - h;
            lowest = lowest.min(v);
        }
        out.data_mut()[off] = lowest;
    }
    out
}

/// Non-flat dilation: `max(v(p + o) + h(o))` over in-bounds offsets
fn ball_dilate(img: &ImageStack, ball: &[(i64, i64, f64)]) -> ImageStack {
    let dims = img.shape().dims().to_vec();
    let mut out = ImageStack::new(img.shape().clone());
    for (off, coord) in img.shape().indices().enumerate() {
        let mut highest = f64::NEG_INFINITY;
        for &(dy, dx, h) in ball {
            let y = coord[0] as i64 + dy;
            let x = coord[1] as i64 + dx;
            if y < 0 || y >= dims[0] as i64 || x < 0 || x >= dims[1] as i64 {
                continue;
            }
            let v = img.data()[y as usize * dims[1] + x as usize] + h;
            highest = highest.max(v);
        }
        out.data_mut()[off] = highest;
    }
    out
}
