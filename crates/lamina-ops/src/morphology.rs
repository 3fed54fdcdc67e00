//! Morphological operations
//!
//! Binary morphology on label masks and grayscale morphology on intensity
//! stacks, both 2-D, with the footprint shapes the morphology forms offer.
//! Outside the stack, binary operations see background and grayscale
//! operations ignore the samples (min/max over the in-bounds window).

use crate::error::{OpsError, OpsResult};
use lamina_core::{ImageStack, LabelStack};
use std::str::FromStr;

/// Footprint shape for morphological operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Footprint {
    /// Disk of the given radius
    #[default]
    Disk,
    /// Square of the given side length
    Square,
    /// Diamond (L1 ball) of the given radius
    Diamond,
}

impl Footprint {
    /// Footprint names as the morphology forms list them
    pub const CHOICES: &[&str] = &["disk", "square", "diamond"];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Footprint::Disk => "disk",
            Footprint::Square => "square",
            Footprint::Diamond => "diamond",
        }
    }

    /// Neighborhood offsets for the given size
    ///
    /// `size` is the radius for disk and diamond, and the side length for
    /// square (centered at `size / 2`, matching the upstream convention).
    pub fn offsets(&self, size: usize) -> Vec<(i64, i64)> {
        let mut offsets = Vec::new();
        match self {
            Footprint::Disk => {
                let r = size as i64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dy * dy + dx * dx <= r * r {
                            offsets.push((dy, dx));
                        }
                    }
                }
            }
            Footprint::Square => {
                let center = (size / 2) as i64;
                for dy in 0..size as i64 {
                    for dx in 0..size as i64 {
                        offsets.push((dy - center, dx - center));
                    }
                }
            }
            Footprint::Diamond => {
                let r = size as i64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        if dy.abs() + dx.abs() <= r {
                            offsets.push((dy, dx));
                        }
                    }
                }
            }
        }
        offsets
    }
}

impl FromStr for Footprint {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disk" => Ok(Footprint::Disk),
            "square" => Ok(Footprint::Square),
            "diamond" => Ok(Footprint::Diamond),
            other => Err(OpsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphMethod {
    /// Shrink foreground / take the window minimum
    #[default]
    Erosion,
    /// Grow foreground / take the window maximum
    Dilation,
    /// Erosion then dilation; removes small bright detail
    Opening,
    /// Dilation then erosion; fills small dark detail
    Closing,
    /// Input minus its opening; keeps small bright detail
    WhiteTophat,
    /// Closing minus the input; keeps small dark detail
    BlackTophat,
}

impl MorphMethod {
    /// Method names as the morphology forms list them
    pub const CHOICES: &[&str] = &[
        "erosion",
        "dilation",
        "opening",
        "closing",
        "white_tophat",
        "black_tophat",
    ];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphMethod::Erosion => "erosion",
            MorphMethod::Dilation => "dilation",
            MorphMethod::Opening => "opening",
            MorphMethod::Closing => "closing",
            MorphMethod::WhiteTophat => "white_tophat",
            MorphMethod::BlackTophat => "black_tophat",
        }
    }
}

impl FromStr for MorphMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erosion" => Ok(MorphMethod::Erosion),
            "dilation" => Ok(MorphMethod::Dilation),
            "opening" => Ok(MorphMethod::Opening),
            "closing" => Ok(MorphMethod::Closing),
            "white_tophat" => Ok(MorphMethod::WhiteTophat),
            "black_tophat" => Ok(MorphMethod::BlackTophat),
            other => Err(OpsError::UnknownMethod(other.to_string())),
        }
    }
}

/// Apply a binary morphological operation to a mask
///
/// Any nonzero pixel counts as foreground; the result is a 0/1 mask.
pub fn binary_morphology(
    mask: &LabelStack,
    method: MorphMethod,
    footprint: Footprint,
    size: usize,
) -> OpsResult<LabelStack> {
    check_2d(mask.ndim())?;
    let offsets = footprint.offsets(size);

    match method {
        MorphMethod::Erosion => Ok(binary_erode(mask, &offsets)),
        MorphMethod::Dilation => Ok(binary_dilate(mask, &offsets)),
        MorphMethod::Opening => Ok(binary_dilate(&binary_erode(mask, &offsets), &offsets)),
        MorphMethod::Closing => Ok(binary_erode(&binary_dilate(mask, &offsets), &offsets)),
        MorphMethod::WhiteTophat => {
            let opened = binary_dilate(&binary_erode(mask, &offsets), &offsets);
            Ok(mask_difference(mask, &opened))
        }
        MorphMethod::BlackTophat => {
            let closed = binary_erode(&binary_dilate(mask, &offsets), &offsets);
            Ok(mask_difference(&closed, mask))
        }
    }
}

/// Apply a grayscale morphological operation to an intensity stack
pub fn grayscale_morphology(
    img: &ImageStack,
    method: MorphMethod,
    footprint: Footprint,
    size: usize,
) -> OpsResult<ImageStack> {
    check_2d(img.ndim())?;
    let offsets = footprint.offsets(size);

    match method {
        MorphMethod::Erosion => Ok(gray_extreme(img, &offsets, false)),
        MorphMethod::Dilation => Ok(gray_extreme(img, &offsets, true)),
        MorphMethod::Opening => Ok(gray_extreme(
            &gray_extreme(img, &offsets, false),
            &offsets,
            true,
        )),
        MorphMethod::Closing => Ok(gray_extreme(
            &gray_extreme(img, &offsets, true),
            &offsets,
            false,
        )),
        MorphMethod::WhiteTophat => {
            let opened = gray_extreme(&gray_extreme(img, &offsets, false), &offsets, true);
            Ok(image_difference(img, &opened))
        }
        MorphMethod::BlackTophat => {
            let closed = gray_extreme(&gray_extreme(img, &offsets, true), &offsets, false);
            Ok(image_difference(&closed, img))
        }
    }
}

fn binary_erode(mask: &LabelStack, offsets: &[(i64, i64)]) -> LabelStack {
    let dims = mask.shape().dims().to_vec();
    let mut out = LabelStack::new(mask.shape().clone());
    for (off, coord) in mask.shape().indices().enumerate() {
        let mut all = true;
        for &(dy, dx) in offsets {
            let y = coord[0] as i64 + dy;
            let x = coord[1] as i64 + dx;
            // Outside the stack is background
            if y < 0 || y >= dims[0] as i64 || x < 0 || x >= dims[1] as i64 {
                all = false;
                break;
            }
            if mask.data()[y as usize * dims[1] + x as usize] == 0 {
                all = false;
                break;
            }
        }
        out.data_mut()[off] = if all { 1 } else { 0 };
    }
    out
}

// Dilation samples through the mirrored footprint so that opening and
// closing stay within/around the input for non-symmetric footprints.
fn binary_dilate(mask: &LabelStack, offsets: &[(i64, i64)]) -> LabelStack {
    let dims = mask.shape().dims().to_vec();
    let mut out = LabelStack::new(mask.shape().clone());
    for (off, coord) in mask.shape().indices().enumerate() {
        let mut any = false;
        for &(dy, dx) in offsets {
            let y = coord[0] as i64 - dy;
            let x = coord[1] as i64 - dx;
            if y < 0 || y >= dims[0] as i64 || x < 0 || x >= dims[1] as i64 {
                continue;
            }
            if mask.data()[y as usize * dims[1] + x as usize] != 0 {
                any = true;
                break;
            }
        }
        out.data_mut()[off] = if any { 1 } else { 0 };
    }
    out
}

/// Pixels in `a` but not in `b`
fn mask_difference(a: &LabelStack, b: &LabelStack) -> LabelStack {
    let mut out = LabelStack::new(a.shape().clone());
    for ((out, &va), &vb) in out.data_mut().iter_mut().zip(a.data()).zip(b.data()) {
        *out = if va != 0 && vb == 0 { 1 } else { 0 };
    }
    out
}

fn image_difference(a: &ImageStack, b: &ImageStack) -> ImageStack {
    let mut out = ImageStack::new(a.shape().clone());
    for ((out, &va), &vb) in out.data_mut().iter_mut().zip(a.data()).zip(b.data()) {
        *out = va - vb;
    }
    out
}

/// Window minimum (erosion) or maximum (dilation) over in-bounds samples
///
/// Dilation mirrors the footprint, same as the binary case.
fn gray_extreme(img: &ImageStack, offsets: &[(i64, i64)], take_max: bool) -> ImageStack {
    let dims = img.shape().dims().to_vec();
    let mut out = ImageStack::new(img.shape().clone());
    for (off, coord) in img.shape().indices().enumerate() {
        let mut extreme = if take_max {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for &(dy, dx) in offsets {
            let sign = if take_max { -1 } else { 1 };
            let y = coord[0] as i64 + sign * dy;
            let x = coord[1] as i64 + sign * dx;
            if y < 0 || y >= dims[0] as i64 || x < 0 || x >= dims[1] as i64 {
                continue;
            }
            let v = img.data()[y as usize * dims[1] + x as usize];
            extreme = if take_max {
                extreme.max(v)
            } else {
                extreme.min(v)
            };
        }
        out.data_mut()[off] = extreme;
    }
    out
}

fn check_2d(ndim: usize) -> OpsResult<()> {
    if ndim != 2 {
        return Err(OpsError::UnsupportedDimensionality {
            expected: "2-dimensional",
            actual: ndim,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::Shape;
    use lamina_test::{image_2d, labels_2d};

    fn block_5x5() -> LabelStack {
        labels_2d(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ])
    }

    #[test]
    fn test_binary_erosion_shrinks() {
        let eroded =
            binary_morphology(&block_5x5(), MorphMethod::Erosion, Footprint::Diamond, 1).unwrap();
        let fg: u32 = eroded.data().iter().sum();
        assert_eq!(fg, 1);
        assert_eq!(eroded.get(&[2, 2]).unwrap(), 1);
    }

    #[test]
    fn test_binary_dilation_grows() {
        let mask = labels_2d(&[
            &[0, 0, 0],
            &[0, 1, 0],
            &[0, 0, 0],
        ]);
        let dilated =
            binary_morphology(&mask, MorphMethod::Dilation, Footprint::Diamond, 1).unwrap();
        let fg: u32 = dilated.data().iter().sum();
        assert_eq!(fg, 5);
    }

    #[test]
    fn test_opening_removes_speck() {
        let mask = labels_2d(&[
            &[1, 0, 0, 0, 0],
            &[0, 0, 1, 1, 0],
            &[0, 0, 1, 1, 0],
            &[0, 0, 1, 1, 0],
        ]);
        let opened =
            binary_morphology(&mask, MorphMethod::Opening, Footprint::Square, 2).unwrap();
        // The isolated pixel disappears, the block survives
        assert_eq!(opened.get(&[0, 0]).unwrap(), 0);
        let fg: u32 = opened.data().iter().sum();
        assert_eq!(fg, 6);
    }

    #[test]
    fn test_closing_fills_hole() {
        let mask = labels_2d(&[
            &[1, 1, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let closed =
            binary_morphology(&mask, MorphMethod::Closing, Footprint::Diamond, 1).unwrap();
        assert_eq!(closed.get(&[1, 1]).unwrap(), 1);
    }

    #[test]
    fn test_white_tophat_keeps_speck() {
        let mask = labels_2d(&[
            &[1, 0, 0, 0, 0],
            &[0, 0, 1, 1, 0],
            &[0, 0, 1, 1, 0],
            &[0, 0, 1, 1, 0],
        ]);
        let tophat =
            binary_morphology(&mask, MorphMethod::WhiteTophat, Footprint::Square, 2).unwrap();
        assert_eq!(tophat.get(&[0, 0]).unwrap(), 1);
        assert_eq!(tophat.get(&[1, 2]).unwrap(), 0);
    }

    #[test]
    fn test_erosion_at_border() {
        // Foreground touching the edge erodes away (outside is background)
        let mask = labels_2d(&[&[1, 1], &[1, 1]]);
        let eroded =
            binary_morphology(&mask, MorphMethod::Erosion, Footprint::Diamond, 1).unwrap();
        assert_eq!(eroded.data().iter().sum::<u32>(), 0);
    }

    #[test]
    fn test_grayscale_erosion_dilation() {
        let img = image_2d(&[
            &[1.0, 1.0, 1.0],
            &[1.0, 9.0, 1.0],
            &[1.0, 1.0, 1.0],
        ]);
        let eroded =
            grayscale_morphology(&img, MorphMethod::Erosion, Footprint::Square, 3).unwrap();
        assert_eq!(eroded.get(&[1, 1]).unwrap(), 1.0);
        let dilated =
            grayscale_morphology(&img, MorphMethod::Dilation, Footprint::Square, 3).unwrap();
        assert_eq!(dilated.get(&[0, 0]).unwrap(), 9.0);
    }

    #[test]
    fn test_grayscale_white_tophat() {
        let img = image_2d(&[
            &[1.0, 1.0, 1.0],
            &[1.0, 9.0, 1.0],
            &[1.0, 1.0, 1.0],
        ]);
        let tophat =
            grayscale_morphology(&img, MorphMethod::WhiteTophat, Footprint::Square, 3).unwrap();
        assert_eq!(tophat.get(&[1, 1]).unwrap(), 8.0);
        assert_eq!(tophat.get(&[0, 0]).unwrap(), 0.0);
    }

    #[test]
    fn test_footprint_sizes() {
        assert_eq!(Footprint::Diamond.offsets(1).len(), 5);
        assert_eq!(Footprint::Square.offsets(3).len(), 9);
        assert_eq!(Footprint::Disk.offsets(1).len(), 5);
        assert_eq!(Footprint::Disk.offsets(2).len(), 13);
    }

    #[test]
    fn test_rejects_3d() {
        let mask = LabelStack::new(Shape::new(&[2, 2, 2]).unwrap());
        assert!(
            binary_morphology(&mask, MorphMethod::Erosion, Footprint::Disk, 1).is_err()
        );
    }

    #[test]
    fn test_method_and_footprint_from_str() {
        for name in MorphMethod::CHOICES {
            assert!(name.parse::<MorphMethod>().is_ok());
        }
        for name in Footprint::CHOICES {
            assert!(name.parse::<Footprint>().is_ok());
        }
        assert!("octagon".parse::<Footprint>().is_err());
    }
}
