// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Array shape descriptors and row-major index arithmetic.

use crate::{ArrayError, ArrayResult};
use std::fmt;

/// Describes the dimensionality of a [`crate::NdArray`].
///
/// Shapes are immutable once created. The buffer layout they describe is
/// always row-major: the last dimension varies fastest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// An empty vector denotes a scalar.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.size(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates a shape, rejecting dimensions whose element count does not
    /// fit in a `usize`.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if the product of `dims`
    /// overflows.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Shape;
    /// assert!(Shape::try_new(vec![2, 3]).is_ok());
    /// assert!(Shape::try_new(vec![usize::MAX, 2]).is_err());
    /// ```
    pub fn try_new(dims: Vec<usize>) -> ArrayResult<Self> {
        let shape = Self { dims };
        shape.checked_size().ok_or_else(|| {
            ArrayError::InvalidArgument(format!("shape {shape} has too many elements"))
        })?;
        Ok(shape)
    }

    /// Creates a shape from a dimension slice.
    pub fn of(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }

    /// Creates a shape from signed sizes, rejecting negative dimensions.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if any size is negative or the
    /// element count overflows.
    pub fn try_from_signed(dims: &[i64]) -> ArrayResult<Self> {
        let dims = dims
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                usize::try_from(d).map_err(|_| {
                    ArrayError::InvalidArgument(format!("dimension {i} has negative size {d}"))
                })
            })
            .collect::<ArrayResult<Vec<_>>>()?;
        Self::try_new(dims)
    }

    /// Creates a scalar shape (rank 0).
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// For a scalar shape (rank 0), returns 1. Saturates at `usize::MAX` when
    /// the count is not representable; see [`Shape::checked_size`].
    pub fn size(&self) -> usize {
        self.checked_size().unwrap_or(usize::MAX)
    }

    /// Returns the total number of elements, or `None` on overflow.
    pub fn checked_size(&self) -> Option<usize> {
        if self.dims.contains(&0) {
            return Some(0);
        }
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Returns `true` for rank 0.
    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Returns `true` for rank 1.
    pub fn is_vector(&self) -> bool {
        self.dims.len() == 1
    }

    /// Returns `true` for rank 2.
    pub fn is_matrix(&self) -> bool {
        self.dims.len() == 2
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// The stride for dimension `i` is the number of elements to skip
    /// in the flat buffer to advance one step along that dimension.
    pub fn strides(&self) -> Vec<usize> {
        let rank = self.dims.len();
        if rank == 0 {
            return vec![];
        }
        let mut strides = vec![0usize; rank];
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1].saturating_mul(self.dims[i + 1]);
        }
        strides
    }

    /// Computes the flat buffer offset of a multi-index.
    ///
    /// # Errors
    /// Returns [`ArrayError::IndexArity`] if `indices.len() != self.rank()`,
    /// or [`ArrayError::IndexOutOfBounds`] if any component is outside its
    /// dimension. A shape whose offsets overflow yields
    /// [`ArrayError::InvalidArgument`].
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.index(&[1, 2, 3]).unwrap(), 23);
    /// ```
    pub fn index(&self, indices: &[usize]) -> ArrayResult<usize> {
        if indices.len() != self.dims.len() {
            return Err(ArrayError::IndexArity {
                expected: self.dims.len(),
                actual: indices.len(),
            });
        }
        for (dim, (&index, &size)) in indices.iter().zip(&self.dims).enumerate() {
            if index >= size {
                return Err(ArrayError::IndexOutOfBounds { dim, index, size });
            }
        }
        let mut offset = 0usize;
        for (&index, &size) in indices.iter().zip(&self.dims) {
            offset = offset
                .checked_mul(size)
                .and_then(|o| o.checked_add(index))
                .ok_or_else(|| {
                    ArrayError::InvalidArgument(format!("offset overflows in shape {self}"))
                })?;
        }
        Ok(offset)
    }

    /// Returns the shape produced by broadcasting `self` against `other`.
    ///
    /// Dimensions are aligned from the right; a missing leading dimension
    /// counts as 1, and a size-1 dimension stretches to match the other side.
    ///
    /// # Errors
    /// Returns [`ArrayError::ShapeMismatch`] if a pair of aligned dimensions
    /// differs and neither is 1, or [`ArrayError::InvalidArgument`] if the
    /// broadcast element count overflows.
    pub fn broadcast_with(&self, other: &Shape) -> ArrayResult<Shape> {
        let rank = self.rank().max(other.rank());
        let mut dims = vec![0usize; rank];
        for i in 0..rank {
            let a = self.dims.len().checked_sub(i + 1).map_or(1, |j| self.dims[j]);
            let b = other.dims.len().checked_sub(i + 1).map_or(1, |j| other.dims[j]);
            dims[rank - 1 - i] = match (a, b) {
                (a, b) if a == b => a,
                (1, b) => b,
                (a, 1) => a,
                _ => {
                    return Err(ArrayError::ShapeMismatch {
                        op: "broadcast",
                        lhs: self.clone(),
                        rhs: other.clone(),
                    })
                }
            };
        }
        Shape::try_new(dims)
    }

    /// Returns `true` if two shapes are broadcast-compatible.
    pub fn is_broadcast_compatible(&self, other: &Shape) -> bool {
        self.broadcast_with(other).is_ok()
    }

    /// Returns a copy of this shape with dimension `axis` removed.
    pub(crate) fn without_axis(&self, axis: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims.remove(axis);
        Shape::new(dims)
    }

    /// Returns a copy of this shape with dimension `axis` replaced by `size`.
    pub(crate) fn with_dim(&self, axis: usize, size: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims[axis] = size;
        Shape::new(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`.
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Convenience: `Shape::from([2, 3])`.
impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}
