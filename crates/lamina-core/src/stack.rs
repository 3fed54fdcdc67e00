//! The n-dimensional stack container
//!
//! A [`Stack`] is the payload of one viewer layer: a dense, row-major
//! n-dimensional array. Intensity layers are `Stack<f64>`
//! ([`ImageStack`]), label layers are `Stack<u32>` ([`LabelStack`]) where
//! each distinct nonzero value identifies one region.

use crate::error::{Error, Result};
use crate::shape::Shape;

/// Dense row-major n-dimensional array
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    shape: Shape,
    data: Vec<T>,
}

/// Intensity image layer payload
pub type ImageStack = Stack<f64>;

/// Label layer payload; each distinct nonzero value is one region
pub type LabelStack = Stack<u32>;

impl<T: Copy + Default> Stack<T> {
    /// Create a zero-filled stack
    pub fn new(shape: Shape) -> Self {
        let len = shape.len();
        Self {
            shape,
            data: vec![T::default(); len],
        }
    }
}

impl<T: Copy> Stack<T> {
    /// Create a stack from existing data in raster order
    ///
    /// # Errors
    ///
    /// Fails when `data.len()` does not equal the number of elements the
    /// shape describes.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(Error::DataLengthMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// The stack's shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A stack always holds at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read one element
    pub fn get(&self, index: &[usize]) -> Result<T> {
        let off = self.shape.offset(index)?;
        Ok(self.data[off])
    }

    /// Write one element
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let off = self.shape.offset(index)?;
        self.data[off] = value;
        Ok(())
    }

    /// Raw data in raster order
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw data in raster order
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the stack, returning shape and data
    pub fn into_parts(self) -> (Shape, Vec<T>) {
        (self.shape, self.data)
    }
}

impl LabelStack {
    /// Largest label value present (0 for an all-background stack)
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[usize]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_new_zero_filled() {
        let s: Stack<f64> = Stack::new(shape(&[2, 3]));
        assert_eq!(s.len(), 6);
        assert!(s.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Stack::from_vec(shape(&[2, 2]), vec![1u32, 2, 3]).is_err());
        assert!(Stack::from_vec(shape(&[2, 2]), vec![1u32, 2, 3, 4]).is_ok());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut s: Stack<u32> = Stack::new(shape(&[3, 3]));
        s.set(&[1, 2], 7).unwrap();
        assert_eq!(s.get(&[1, 2]).unwrap(), 7);
        assert_eq!(s.get(&[2, 1]).unwrap(), 0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let s: Stack<u32> = Stack::new(shape(&[2, 2]));
        assert!(s.get(&[2, 0]).is_err());
        assert!(s.get(&[0]).is_err());
    }

    #[test]
    fn test_max_label() {
        let s = LabelStack::from_vec(shape(&[2, 2]), vec![0, 3, 1, 2]).unwrap();
        assert_eq!(s.max_label(), 3);
        let empty = LabelStack::new(shape(&[2, 2]));
        assert_eq!(empty.max_label(), 0);
    }

    #[test]
    fn test_3d_indexing() {
        let mut s: Stack<f64> = Stack::new(shape(&[2, 2, 2]));
        s.set(&[1, 0, 1], 5.0).unwrap();
        // raster offset: (1*2 + 0)*2 + 1 = 5
        assert_eq!(s.data()[5], 5.0);
    }
}
