//! Shape and coordinate handling for n-dimensional stacks
//!
//! A [`Shape`] is the ordered tuple of positive dimension sizes describing a
//! stack. Offsets are row-major: the last axis varies fastest, matching the
//! layout the host viewer hands over.

use crate::error::{Error, Result};

/// Ordered tuple of positive dimension sizes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a shape from dimension sizes
    ///
    /// # Errors
    ///
    /// Fails when `dims` is empty or any dimension is zero.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::EmptyShape);
        }
        for (axis, &d) in dims.iter().enumerate() {
            if d == 0 {
                return Err(Error::ZeroDimension { axis });
            }
        }
        Ok(Self {
            dims: dims.to_vec(),
        })
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// A shape always describes at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Dimension sizes
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Size of one axis
    #[inline]
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Row-major linear offset of a coordinate
    ///
    /// # Errors
    ///
    /// Fails when the coordinate has the wrong rank or lies outside the shape.
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.dims.len() {
            return Err(Error::RankMismatch {
                expected: self.dims.len(),
                actual: index.len(),
            });
        }
        let mut off = 0usize;
        for (&i, &d) in index.iter().zip(self.dims.iter()) {
            if i >= d {
                return Err(Error::IndexOutOfBounds {
                    index: index.to_vec(),
                    shape: self.dims.clone(),
                });
            }
            off = off * d + i;
        }
        Ok(off)
    }

    /// Iterate over every coordinate in raster order
    pub fn indices(&self) -> IndexIter {
        IndexIter {
            dims: self.dims.clone(),
            next: Some(vec![0; self.dims.len()]),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

/// Odometer iterator over all coordinates of a shape
///
/// Yields coordinates in raster (row-major) order: the last axis varies
/// fastest.
pub struct IndexIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut following = current.clone();
        // Increment from the last axis, carrying over
        for axis in (0..self.dims.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.dims[axis] {
                self.next = Some(following);
                return Some(current);
            }
            following[axis] = 0;
        }
        // Wrapped past the first axis: iteration is done
        Some(current)
    }
}
