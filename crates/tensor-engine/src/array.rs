// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core array type and borrowed view.

use crate::config::Tolerance;
use crate::nested::NestedData;
use crate::{ArrayError, ArrayResult, Shape};

/// An owned, n-dimensional `f32` array stored in contiguous memory.
///
/// `NdArray` is the value every operation in this crate consumes and
/// produces. Derived operations never touch their inputs: each one returns a
/// freshly allocated array, so a caller may keep references to earlier
/// values for as long as it likes.
///
/// # Memory Layout
/// Data is stored in row-major (C) order. The buffer always holds exactly
/// `shape.size()` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Shape,
    data: Vec<f32>,
}

impl NdArray {
    /// Creates a new array filled with zeros.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if the shape holds more
    /// elements than a buffer can address.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::{NdArray, Shape};
    /// let a = NdArray::zeros(Shape::matrix(2, 3)).unwrap();
    /// assert_eq!(a.size(), 6);
    /// ```
    pub fn zeros(shape: impl Into<Shape>) -> ArrayResult<Self> {
        Self::full(shape, 0.0)
    }

    /// Creates a new array filled with ones.
    pub fn ones(shape: impl Into<Shape>) -> ArrayResult<Self> {
        Self::full(shape, 1.0)
    }

    /// Creates a new array with every element set to `value`.
    pub fn full(shape: impl Into<Shape>, value: f32) -> ArrayResult<Self> {
        let shape = shape.into();
        let data = vec![value; buffer_len(&shape)?];
        Ok(Self { shape, data })
    }

    /// Wraps a single value as a rank-0 array.
    pub fn scalar(value: f32) -> Self {
        Self {
            shape: Shape::scalar(),
            data: vec![value],
        }
    }

    /// Creates the vector `[0, 1, ..., len - 1]`.
    pub fn arange(len: usize) -> Self {
        Self {
            shape: Shape::vector(len),
            data: (0..len).map(|i| i as f32).collect(),
        }
    }

    /// Creates an array from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`ArrayError::BufferSizeMismatch`] if `data.len()` differs from
    /// `shape.size()`, or [`ArrayError::InvalidArgument`] if that size
    /// overflows.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::{NdArray, Shape};
    /// let a = NdArray::from_vec(Shape::vector(3), vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_vec(shape: impl Into<Shape>, data: Vec<f32>) -> ArrayResult<Self> {
        let shape = shape.into();
        let expected = buffer_len(&shape)?;
        if data.len() != expected {
            return Err(ArrayError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates an array by copying a flat row-major slice.
    pub fn from_slice(shape: impl Into<Shape>, values: &[f32]) -> ArrayResult<Self> {
        Self::from_vec(shape, values.to_vec())
    }

    /// Creates an array from nested literal data; the shape follows the
    /// nesting depth.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if the nesting is ragged.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::{NdArray, Shape};
    /// let a = NdArray::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(a.shape(), &Shape::matrix(2, 3));
    /// ```
    pub fn from_nested<D: NestedData + ?Sized>(data: &D) -> ArrayResult<Self> {
        let mut dims = Vec::new();
        data.collect_dims(&mut dims);
        let shape = Shape::try_new(dims)?;
        let mut values = Vec::with_capacity(buffer_len(&shape)?);
        data.flatten_into(shape.dims(), &mut values)?;
        Ok(Self {
            shape,
            data: values,
        })
    }

    /// Builds an array from parts already known to be consistent.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.size(), data.len(), "buffer does not match {shape}");
        Self { shape, data }
    }

    /// Returns the array's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the element at a multi-index.
    ///
    /// # Errors
    /// Propagates [`Shape::index`] errors unchanged.
    pub fn get(&self, indices: &[usize]) -> ArrayResult<f32> {
        let offset = self.shape.index(indices)?;
        Ok(self.data[offset])
    }

    /// Overwrites the element at a multi-index.
    ///
    /// This is the only in-place mutation an `NdArray` supports, and it only
    /// ever touches the caller's own array.
    pub fn set(&mut self, indices: &[usize], value: f32) -> ArrayResult<()> {
        let offset = self.shape.index(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Returns the single value of a one-element array.
    pub fn item(&self) -> ArrayResult<f32> {
        match self.data.as_slice() {
            [v] => Ok(*v),
            _ => Err(ArrayError::InvalidArgument(format!(
                "item() requires a single-element array, got shape {}",
                self.shape
            ))),
        }
    }

    /// Returns an immutable view over this array's data.
    pub fn view(&self) -> NdArrayView<'_> {
        NdArrayView {
            shape: &self.shape,
            data: &self.data,
        }
    }

    /// Returns the row-major element slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Copies the elements out into a new vector.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Consumes the array, returning its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Mutable access to the backing buffer, reserved for kernels in this crate.
    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns `true` if both arrays have the same shape and every pair of
    /// elements satisfies `|a - b| <= abs + rel * |b|`.
    pub fn all_close(&self, other: &NdArray, tol: &Tolerance) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| (a - b).abs() <= tol.abs + tol.rel * b.abs())
    }
}

/// Number of elements a buffer for `shape` needs, checked against the
/// largest allocation a `Vec<f32>` supports.
pub(crate) fn buffer_len(shape: &Shape) -> ArrayResult<usize> {
    shape
        .checked_size()
        .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<f32>())
        .ok_or_else(|| {
            ArrayError::InvalidArgument(format!("shape {shape} is too large to allocate"))
        })
}

/// A borrowed, read-only view over an [`NdArray`]'s data.
///
/// Views are zero-copy and tied to the lifetime of the source array,
/// enforced by the borrow checker.
#[derive(Debug, Clone, Copy)]
pub struct NdArrayView<'a> {
    shape: &'a Shape,
    data: &'a [f32],
}

impl<'a> NdArrayView<'a> {
    /// Returns the shape of the viewed array.
    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    /// Returns the viewed elements in row-major order.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the element at a multi-index.
    pub fn get(&self, indices: &[usize]) -> ArrayResult<f32> {
        let offset = self.shape.index(indices)?;
        Ok(self.data[offset])
    }

    /// Copies the view into a new owned array.
    pub fn to_owned(&self) -> NdArray {
        NdArray::from_parts(self.shape.clone(), self.data.to_vec())
    }
}

impl From<f32> for NdArray {
    fn from(value: f32) -> Self {
        NdArray::scalar(value)
    }
}

impl From<Vec<f32>> for NdArray {
    fn from(data: Vec<f32>) -> Self {
        let shape = Shape::vector(data.len());
        NdArray::from_parts(shape, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let a = NdArray::zeros(Shape::matrix(2, 3)).unwrap();
        assert_eq!(a.size(), 6);
        assert_eq!(a.shape(), &Shape::matrix(2, 3));
        assert!(a.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_ones_full_scalar() {
        assert!(NdArray::ones([2, 2]).unwrap().as_slice().iter().all(|&x| x == 1.0));
        assert_eq!(NdArray::full([3], 2.5).unwrap().as_slice(), &[2.5, 2.5, 2.5]);
        let s = NdArray::scalar(7.0);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.item().unwrap(), 7.0);
    }

    #[test]
    fn test_from_vec() {
        let data = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = NdArray::from_vec(Shape::matrix(2, 3), data.clone()).unwrap();
        assert_eq!(a.as_slice(), data.as_slice());
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let result = NdArray::from_vec(Shape::matrix(2, 3), vec![0.0; 5]);
        assert_eq!(
            result,
            Err(ArrayError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let huge = [1usize << 32, 1 << 32];
        assert!(matches!(
            NdArray::zeros(huge),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(NdArray::full([usize::MAX, 2], 1.0).is_err());
        assert!(matches!(
            NdArray::from_vec(huge, vec![]),
            Err(ArrayError::InvalidArgument(_))
        ));
        // Fits in a usize but not in an allocation.
        assert!(NdArray::ones([1usize << 62]).is_err());
    }

    #[test]
    fn test_from_nested_3d() {
        let a = NdArray::from_nested(&[[[1.0, 5.0, 2.0], [9.0, 0.0, 3.0]]]).unwrap();
        assert_eq!(a.shape(), &Shape::new(vec![1, 2, 3]));
        assert_eq!(a.get(&[0, 1, 0]).unwrap(), 9.0);
    }

    #[test]
    fn test_get_set() {
        let mut a = NdArray::zeros([2, 3]).unwrap();
        a.set(&[1, 2], 4.0).unwrap();
        assert_eq!(a.get(&[1, 2]).unwrap(), 4.0);
        assert_eq!(a.as_slice()[5], 4.0);
        assert!(matches!(
            a.get(&[2, 0]),
            Err(ArrayError::IndexOutOfBounds { dim: 0, .. })
        ));
        assert!(matches!(a.set(&[0], 1.0), Err(ArrayError::IndexArity { .. })));
    }

    #[test]
    fn test_view_lifetime() {
        let a = NdArray::from_slice(Shape::vector(4), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let v = a.view();
        assert_eq!(v.shape(), &Shape::vector(4));
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.get(&[2]).unwrap(), 3.0);
        assert_eq!(v.to_owned(), a);
    }

    #[test]
    fn test_clone_is_independent() {
        let a = NdArray::arange(3);
        let mut b = a.clone();
        b.set(&[0], 10.0).unwrap();
        assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_item_requires_single_element() {
        assert!(NdArray::arange(2).item().is_err());
        assert_eq!(NdArray::ones([1, 1]).unwrap().item().unwrap(), 1.0);
    }

    #[test]
    fn test_all_close() {
        let a = NdArray::from(vec![1.0, 2.0]);
        let b = NdArray::from(vec![1.0, 2.000_001]);
        let tol = Tolerance::default();
        assert!(a.all_close(&b, &tol));
        assert!(!a.all_close(&NdArray::from(vec![1.0, 2.1]), &tol));
        assert!(!a.all_close(&NdArray::ones([2, 1]).unwrap(), &tol));
    }
}
