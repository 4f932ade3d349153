// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Structural operations: reshape, gather, slice, tile and axis shuffles.
//!
//! Each one returns a new array with its own buffer; nothing here aliases the
//! source.

use crate::array::buffer_len;
use crate::index::{axis_split, broadcast_strides, check_axis, walk_strided};
use crate::{ArrayError, ArrayResult, NdArray, Shape};

impl NdArray {
    /// Reinterprets the elements under a new shape of equal size.
    ///
    /// # Errors
    /// Returns [`ArrayError::ShapeMismatch`] if the sizes differ.
    pub fn reshape(&self, shape: impl Into<Shape>) -> ArrayResult<NdArray> {
        let shape = shape.into();
        if shape.size() != self.size() {
            return Err(ArrayError::ShapeMismatch {
                op: "reshape",
                lhs: self.shape().clone(),
                rhs: shape,
            });
        }
        Ok(NdArray::from_parts(shape, self.to_vec()))
    }

    /// Gathers the slices at `indices` along `axis`.
    ///
    /// The output's `axis` dimension equals `indices.len()`; indices may
    /// repeat and appear in any order.
    ///
    /// # Errors
    /// Returns [`ArrayError::AxisOutOfRange`] for a bad axis,
    /// [`ArrayError::IndexOutOfBounds`] for an index past the axis extent, or
    /// [`ArrayError::InvalidArgument`] if the result is too large to allocate.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::NdArray;
    /// let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    /// let picked = a.index_select(0, &[2, 0]).unwrap();
    /// assert_eq!(picked.as_slice(), &[5.0, 6.0, 1.0, 2.0]);
    /// ```
    pub fn index_select(&self, axis: usize, indices: &[usize]) -> ArrayResult<NdArray> {
        check_axis(axis, self.rank())?;
        let (outer, len, inner) = axis_split(self.shape(), axis);
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(ArrayError::IndexOutOfBounds {
                dim: axis,
                index,
                size: len,
            });
        }

        let src = self.as_slice();
        let out_shape = self.shape().with_dim(axis, indices.len());
        let mut data = Vec::with_capacity(buffer_len(&out_shape)?);
        for o in 0..outer {
            for &i in indices {
                let start = (o * len + i) * inner;
                data.extend_from_slice(&src[start..start + inner]);
            }
        }
        Ok(NdArray::from_parts(out_shape, data))
    }

    /// Extracts the contiguous range `[start, end)` along `axis`.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if `start > end` and
    /// [`ArrayError::IndexOutOfBounds`] if `end` exceeds the axis extent.
    pub fn slice_range(&self, axis: usize, start: usize, end: usize) -> ArrayResult<NdArray> {
        check_axis(axis, self.rank())?;
        let (outer, len, inner) = axis_split(self.shape(), axis);
        if start > end {
            return Err(ArrayError::InvalidArgument(format!(
                "slice start {start} is past end {end}"
            )));
        }
        if end > len {
            return Err(ArrayError::IndexOutOfBounds {
                dim: axis,
                index: end,
                size: len,
            });
        }

        let src = self.as_slice();
        let out_shape = self.shape().with_dim(axis, end - start);
        let mut data = Vec::with_capacity(out_shape.size());
        for o in 0..outer {
            let base = o * len * inner;
            data.extend_from_slice(&src[base + start * inner..base + end * inner]);
        }
        Ok(NdArray::from_parts(out_shape, data))
    }

    /// Tiles the array `counts[i]` times along each axis `i`.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidArgument`] if `counts.len()` differs from
    /// the rank or the tiled shape is too large to allocate.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::NdArray;
    /// let a = NdArray::from_nested(&[[1.0, 2.0]]).unwrap();
    /// let tiled = a.repeat(&[2, 2]).unwrap();
    /// assert_eq!(tiled.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    /// ```
    pub fn repeat(&self, counts: &[usize]) -> ArrayResult<NdArray> {
        if counts.len() != self.rank() {
            return Err(ArrayError::InvalidArgument(format!(
                "repeat expects {} counts for shape {}, got {}",
                self.rank(),
                self.shape(),
                counts.len()
            )));
        }

        let tiled_dims = self
            .shape()
            .dims()
            .iter()
            .zip(counts)
            .map(|(&d, &c)| d.checked_mul(c))
            .collect::<Option<Vec<_>>>()
            .map(Shape::new)
            .ok_or_else(|| {
                ArrayError::InvalidArgument(format!(
                    "repeating shape {} by {counts:?} overflows",
                    self.shape()
                ))
            })?;
        buffer_len(&tiled_dims)?;

        let mut shape = self.shape().clone();
        let mut data = self.to_vec();
        for (axis, &count) in counts.iter().enumerate() {
            if count == 1 {
                continue;
            }
            let (outer, len, inner) = axis_split(&shape, axis);
            let block = len * inner;
            let mut tiled = Vec::with_capacity(data.len() * count);
            for o in 0..outer {
                let chunk = &data[o * block..(o + 1) * block];
                for _ in 0..count {
                    tiled.extend_from_slice(chunk);
                }
            }
            shape = shape.with_dim(axis, len * count);
            data = tiled;
        }
        Ok(NdArray::from_parts(shape, data))
    }

    /// Removes `axis`, which must have size 1.
    pub fn squeeze(&self, axis: usize) -> ArrayResult<NdArray> {
        check_axis(axis, self.rank())?;
        let size = self.shape().dims()[axis];
        if size != 1 {
            return Err(ArrayError::InvalidArgument(format!(
                "cannot squeeze axis {axis} of size {size}"
            )));
        }
        Ok(NdArray::from_parts(self.shape().without_axis(axis), self.to_vec()))
    }

    /// Inserts a size-1 dimension at `axis` (`0..=rank`).
    pub fn unsqueeze(&self, axis: usize) -> ArrayResult<NdArray> {
        check_axis(axis, self.rank() + 1)?;
        let mut dims = self.shape().dims().to_vec();
        dims.insert(axis, 1);
        Ok(NdArray::from_parts(Shape::new(dims), self.to_vec()))
    }

    /// Swaps the last two axes of a `[..., rows, cols]` array.
    pub fn transpose(&self) -> ArrayResult<NdArray> {
        let rank = self.rank();
        if rank < 2 {
            return Err(ArrayError::InvalidArgument(format!(
                "transpose requires rank >= 2, got shape {}",
                self.shape()
            )));
        }
        let dims = self.shape().dims();
        let (rows, cols) = (dims[rank - 2], dims[rank - 1]);
        // max(1) keeps chunks_exact valid for empty planes.
        let plane = (rows * cols).max(1);
        let src = self.as_slice();
        let mut data = vec![0.0f32; src.len()];
        for (src_plane, dst_plane) in src.chunks_exact(plane).zip(data.chunks_exact_mut(plane)) {
            for r in 0..rows {
                for c in 0..cols {
                    dst_plane[c * rows + r] = src_plane[r * cols + c];
                }
            }
        }
        let mut out_dims = dims.to_vec();
        out_dims.swap(rank - 2, rank - 1);
        Ok(NdArray::from_parts(Shape::new(out_dims), data))
    }

    /// Materialises the broadcast of this array to `shape`.
    ///
    /// # Errors
    /// Returns [`ArrayError::ShapeMismatch`] if this array does not broadcast
    /// to exactly `shape`.
    pub fn broadcast_to(&self, shape: impl Into<Shape>) -> ArrayResult<NdArray> {
        let target = shape.into();
        let mismatch = || ArrayError::ShapeMismatch {
            op: "broadcast_to",
            lhs: self.shape().clone(),
            rhs: target.clone(),
        };
        match self.shape().broadcast_with(&target) {
            Ok(out) if out == target => {}
            _ => return Err(mismatch()),
        }

        let strides = broadcast_strides(self.shape(), &target);
        let unused = vec![0usize; target.rank()];
        let src = self.as_slice();
        let mut data = Vec::with_capacity(buffer_len(&target)?);
        walk_strided(target.dims(), &strides, &unused, |i, _| data.push(src[i]));
        Ok(NdArray::from_parts(target, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NdArray {
        // [[[0, 1, 2], [3, 4, 5]], [[6, 7, 8], [9, 10, 11]]]
        NdArray::arange(12).reshape([2, 2, 3]).unwrap()
    }

    #[test]
    fn test_reshape() {
        let a = NdArray::arange(6);
        let b = a.reshape([2, 3]).unwrap();
        assert_eq!(b.shape(), &Shape::matrix(2, 3));
        assert_eq!(b.get(&[1, 0]).unwrap(), 3.0);
        assert!(matches!(
            a.reshape([4, 2]),
            Err(ArrayError::ShapeMismatch { op: "reshape", .. })
        ));
    }

    #[test]
    fn test_index_select_middle_axis() {
        let a = sample();
        let out = a.index_select(1, &[1, 1, 0]).unwrap();
        assert_eq!(out.shape(), &Shape::new(vec![2, 3, 3]));
        assert_eq!(
            out.as_slice(),
            &[3.0, 4.0, 5.0, 3.0, 4.0, 5.0, 0.0, 1.0, 2.0, 9.0, 10.0, 11.0, 9.0, 10.0, 11.0, 6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn test_index_select_last_axis() {
        let a = sample();
        let out = a.index_select(2, &[2]).unwrap();
        assert_eq!(out.shape(), &Shape::new(vec![2, 2, 1]));
        assert_eq!(out.as_slice(), &[2.0, 5.0, 8.0, 11.0]);
    }

    #[test]
    fn test_index_select_errors() {
        let a = sample();
        assert!(matches!(
            a.index_select(3, &[0]),
            Err(ArrayError::AxisOutOfRange { axis: 3, rank: 3 })
        ));
        assert!(matches!(
            a.index_select(1, &[0, 2]),
            Err(ArrayError::IndexOutOfBounds { dim: 1, index: 2, size: 2 })
        ));
    }

    #[test]
    fn test_slice_range() {
        let a = sample();
        let out = a.slice_range(2, 1, 3).unwrap();
        assert_eq!(out.shape(), &Shape::new(vec![2, 2, 2]));
        assert_eq!(out.as_slice(), &[1.0, 2.0, 4.0, 5.0, 7.0, 8.0, 10.0, 11.0]);

        let first = a.slice_range(0, 0, 1).unwrap();
        assert_eq!(first.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let empty = a.slice_range(1, 1, 1).unwrap();
        assert_eq!(empty.shape(), &Shape::new(vec![2, 0, 3]));
    }

    #[test]
    fn test_slice_range_errors() {
        let a = sample();
        assert!(matches!(
            a.slice_range(0, 2, 1),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(matches!(
            a.slice_range(0, 0, 3),
            Err(ArrayError::IndexOutOfBounds { dim: 0, index: 3, size: 2 })
        ));
    }

    #[test]
    fn test_repeat() {
        let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let out = a.repeat(&[1, 2]).unwrap();
        assert_eq!(out.shape(), &Shape::matrix(2, 4));
        assert_eq!(out.as_slice(), &[1.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 4.0]);

        let out = a.repeat(&[2, 1]).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0]);

        assert!(a.repeat(&[2]).is_err());
        assert_eq!(a.repeat(&[0, 1]).unwrap().shape(), &Shape::matrix(0, 2));
    }

    #[test]
    fn test_oversized_results_rejected() {
        let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(matches!(
            a.repeat(&[usize::MAX, 1]),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(matches!(
            a.repeat(&[1 << 31, 1 << 31]),
            Err(ArrayError::InvalidArgument(_))
        ));
        assert!(NdArray::from(vec![1.0]).broadcast_to([usize::MAX, 2]).is_err());
        // Reshape never wraps an overflowing target around to a small size.
        assert!(NdArray::zeros([0]).unwrap().reshape([1usize << 32, 1 << 32, 0]).is_ok());
        assert!(a.reshape([1usize << 32, 1 << 32, 1 << 32]).is_err());
    }

    #[test]
    fn test_squeeze_unsqueeze() {
        let a = NdArray::zeros([2, 1, 3]).unwrap();
        assert_eq!(a.squeeze(1).unwrap().shape(), &Shape::matrix(2, 3));
        assert!(a.squeeze(0).is_err());
        assert_eq!(
            a.unsqueeze(3).unwrap().shape(),
            &Shape::new(vec![2, 1, 3, 1])
        );
        assert!(a.unsqueeze(4).is_err());
    }

    #[test]
    fn test_transpose_batched() {
        let out = sample().transpose().unwrap();
        assert_eq!(out.shape(), &Shape::new(vec![2, 3, 2]));
        assert_eq!(
            out.as_slice(),
            &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0, 6.0, 9.0, 7.0, 10.0, 8.0, 11.0]
        );
        assert!(NdArray::arange(3).transpose().is_err());
    }

    #[test]
    fn test_broadcast_to() {
        let row = NdArray::from(vec![1.0, 2.0]);
        let out = row.broadcast_to([3, 2]).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert!(row.broadcast_to([2, 3]).is_err());
        // Broadcasting must not shrink the target.
        assert!(NdArray::zeros([3, 2]).unwrap().broadcast_to([2]).is_err());
    }

    #[test]
    fn test_source_untouched() {
        let a = sample();
        let before = a.clone();
        let _ = a.repeat(&[2, 1, 1]).unwrap();
        let _ = a.index_select(0, &[1]).unwrap();
        let _ = a.transpose().unwrap();
        assert_eq!(a, before);
    }
}
