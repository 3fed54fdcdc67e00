//! Connected-component labeling
//!
//! Relabels a stack so that each connected run of equal nonzero values gets
//! its own label, assigned in raster-scan order starting at 1. Works in any
//! dimensionality; connectivity is expressed the way the host application
//! does it, as the maximum number of axes a neighbor step may move along
//! (1 = orthogonal neighbors only, ndim = full neighborhood).

use crate::error::{MeasureError, MeasureResult};
use lamina_core::LabelStack;

/// Label connected components of equal value
///
/// # Arguments
///
/// * `stack` - Input stack; pixels equal to `background` are ignored
/// * `connectivity` - Neighbor reach, 1..=ndim
/// * `background` - Value treated as background (conventionally 0)
///
/// # Returns
///
/// The relabeled stack and the number of components found.
///
/// # Errors
///
/// Fails when `connectivity` is outside `1..=ndim`.
pub fn label_connected(
    stack: &LabelStack,
    connectivity: usize,
    background: u32,
) -> MeasureResult<(LabelStack, u32)> {
    let ndim = stack.ndim();
    if connectivity == 0 || connectivity > ndim {
        return Err(MeasureError::InvalidConnectivity { connectivity, ndim });
    }

    let offsets = neighbor_offsets(ndim, connectivity);
    let dims = stack.shape().dims().to_vec();
    let src = stack.data();

    let mut out = LabelStack::new(stack.shape().clone());
    let mut next_label = 0u32;
    let mut pending: Vec<Vec<usize>> = Vec::new();

    for (off, coord) in stack.shape().indices().enumerate() {
        let value = src[off];
        if value == background || out.data()[off] != 0 {
            continue;
        }

        next_label += 1;
        out.data_mut()[off] = next_label;
        pending.push(coord);

        // Flood the component of equal-valued connected pixels
        while let Some(current) = pending.pop() {
            for offset in &offsets {
                let Some(neighbor) = step(&current, offset, &dims) else {
                    continue;
                };
                let noff = stack
                    .shape()
                    .offset(&neighbor)
                    .expect("neighbor stays in bounds");
                if src[noff] == value && out.data()[noff] == 0 {
                    out.data_mut()[noff] = next_label;
                    pending.push(neighbor);
                }
            }
        }
    }

    Ok((out, next_label))
}

/// All neighbor offsets moving along at most `connectivity` axes
fn neighbor_offsets(ndim: usize, connectivity: usize) -> Vec<Vec<i64>> {
    let mut offsets = Vec::new();
    let mut current = vec![-1i64; ndim];
    loop {
        let moved = current.iter().filter(|&&v| v != 0).count();
        if moved >= 1 && moved <= connectivity {
            offsets.push(current.clone());
        }
        // Odometer over {-1, 0, 1}^ndim
        let mut axis = ndim;
        loop {
            if axis == 0 {
                return offsets;
            }
            axis -= 1;
            if current[axis] < 1 {
                current[axis] += 1;
                break;
            }
            current[axis] = -1;
        }
    }
}

/// Apply an offset to a coordinate, rejecting steps that leave the stack
fn step(coord: &[usize], offset: &[i64], dims: &[usize]) -> Option<Vec<usize>> {
    let mut out = Vec::with_capacity(coord.len());
    for axis in 0..coord.len() {
        let pos = coord[axis] as i64 + offset[axis];
        if pos < 0 || pos >= dims[axis] as i64 {
            return None;
        }
        out.push(pos as usize);
    }
    Some(out)
}
