//! Axis manipulation
//!
//! Shape-level rearrangements that reorder or relabel samples without
//! touching their values. All of them are generic over the sample type so
//! the same code serves image and labels stacks.

use crate::error::{OpsError, OpsResult};
use lamina_core::{Shape, Stack};

/// Reverse the sample order along one axis
pub fn flip<T: Copy + Default>(stack: &Stack<T>, axis: usize) -> OpsResult<Stack<T>> {
    check_axis(axis, stack.ndim())?;

    let shape = stack.shape().clone();
    let last = shape.dims()[axis] - 1;
    let mut out = Stack::new(shape.clone());
    let mut source = Vec::with_capacity(shape.ndim());

    for (off, coord) in shape.indices().enumerate() {
        source.clear();
        source.extend_from_slice(&coord);
        source[axis] = last - coord[axis];
        let soff = shape.offset(&source).expect("flipped coordinate in bounds");
        out.data_mut()[off] = stack.data()[soff];
    }
    Ok(out)
}

/// Exchange two axes
pub fn swapaxes<T: Copy + Default>(
    stack: &Stack<T>,
    axis1: usize,
    axis2: usize,
) -> OpsResult<Stack<T>> {
    check_axis(axis1, stack.ndim())?;
    check_axis(axis2, stack.ndim())?;

    let mut order: Vec<usize> = (0..stack.ndim()).collect();
    order.swap(axis1, axis2);
    transpose(stack, &order)
}

/// Move one axis to a new position, keeping the others in order
pub fn moveaxis<T: Copy + Default>(
    stack: &Stack<T>,
    source: usize,
    destination: usize,
) -> OpsResult<Stack<T>> {
    check_axis(source, stack.ndim())?;
    check_axis(destination, stack.ndim())?;

    let mut order: Vec<usize> = (0..stack.ndim()).filter(|&a| a != source).collect();
    order.insert(destination, source);
    transpose(stack, &order)
}

/// Insert a length-1 axis at the given position
///
/// `axis` may equal the current rank to append a trailing axis.
pub fn expand_dims<T: Copy + Default>(stack: &Stack<T>, axis: usize) -> OpsResult<Stack<T>> {
    let ndim = stack.ndim();
    if axis > ndim {
        return Err(OpsError::AxisOutOfRange { axis, ndim });
    }

    let mut dims = stack.shape().dims().to_vec();
    dims.insert(axis, 1);
    let shape = Shape::new(&dims)?;
    Ok(Stack::from_vec(shape, stack.data().to_vec()).expect("same sample count"))
}

/// Remove all length-1 axes
///
/// When every axis has length 1 the last one is kept, so the result is
/// never zero-dimensional.
pub fn squeeze<T: Copy + Default>(stack: &Stack<T>) -> OpsResult<Stack<T>> {
    let mut dims: Vec<usize> = stack
        .shape()
        .dims()
        .iter()
        .copied()
        .filter(|&d| d != 1)
        .collect();
    if dims.is_empty() {
        dims.push(1);
    }
    let shape = Shape::new(&dims)?;
    Ok(Stack::from_vec(shape, stack.data().to_vec()).expect("same sample count"))
}

/// Rearrange axes so output axis `i` reads from input axis `order[i]`
fn transpose<T: Copy + Default>(stack: &Stack<T>, order: &[usize]) -> OpsResult<Stack<T>> {
    let in_shape = stack.shape();
    let out_dims: Vec<usize> = order.iter().map(|&a| in_shape.dims()[a]).collect();
    let out_shape = Shape::new(&out_dims)?;

    let mut out = Stack::new(out_shape.clone());
    let mut source = vec![0usize; order.len()];
    for (off, coord) in out_shape.indices().enumerate() {
        for (i, &a) in order.iter().enumerate() {
            source[a] = coord[i];
        }
        let soff = in_shape
            .offset(&source)
            .expect("permuted coordinate in bounds");
        out.data_mut()[off] = stack.data()[soff];
    }
    Ok(out)
}

fn check_axis(axis: usize, ndim: usize) -> OpsResult<()> {
    if axis >= ndim {
        return Err(OpsError::AxisOutOfRange { axis, ndim });
    }
    Ok(())
}
