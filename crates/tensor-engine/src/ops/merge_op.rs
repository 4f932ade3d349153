// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Concatenation of arrays along an arbitrary axis, and its inverse.
//!
//! Both directions work in contiguous blocks. With `outer` the product of the
//! dimensions before the axis and `inner` the product of those after it, an
//! input whose axis extent is `n` occupies one run of `n * inner` elements in
//! each of the `outer` slices of the merged buffer. Merging therefore costs
//! `outer * inputs` bulk copies rather than one write per element; for
//! `axis = 0` (`outer = 1`) each input is a single block.

use crate::index::{axis_split, check_axis};
use crate::{ArrayError, ArrayResult, NdArray};

/// Concatenates `arrays` along `axis`.
///
/// A single input is returned as an independent copy.
///
/// # Errors
/// - [`ArrayError::InvalidArgument`] if `arrays` is empty.
/// - [`ArrayError::AxisOutOfRange`] if `axis` is not below the inputs' rank.
/// - [`ArrayError::MergeRankMismatch`] if an input's rank differs from the first.
/// - [`ArrayError::MergeShapeMismatch`] if an input disagrees with the first
///   on any dimension other than `axis`.
///
/// # Examples
/// ```
/// use tensor_engine::{merge, NdArray};
/// let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = NdArray::from_nested(&[[5.0, 6.0]]).unwrap();
/// let m = merge(0, &[&a, &b]).unwrap();
/// assert_eq!(m.shape().dims(), &[3, 2]);
/// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn merge(axis: usize, arrays: &[&NdArray]) -> ArrayResult<NdArray> {
    let (first, rest) = arrays
        .split_first()
        .ok_or_else(|| ArrayError::InvalidArgument("merge requires at least one array".into()))?;
    if rest.is_empty() {
        return Ok((*first).clone());
    }

    let rank = first.rank();
    check_axis(axis, rank)?;
    let reference = first.shape().dims();
    for (index, array) in arrays.iter().enumerate().skip(1) {
        if array.rank() != rank {
            return Err(ArrayError::MergeRankMismatch {
                index,
                expected: rank,
                actual: array.rank(),
            });
        }
        for (dim, (&expected, &actual)) in reference.iter().zip(array.shape().dims()).enumerate() {
            if dim != axis && expected != actual {
                return Err(ArrayError::MergeShapeMismatch {
                    index,
                    dim,
                    expected,
                    actual,
                });
            }
        }
    }

    let merged_len = arrays.iter().map(|a| a.shape().dims()[axis]).sum();
    let out_shape = first.shape().with_dim(axis, merged_len);
    let (outer, _, inner) = axis_split(&out_shape, axis);
    tracing::debug!(
        axis,
        inputs = arrays.len(),
        shape = %out_shape,
        copies = outer * arrays.len(),
        "merge"
    );

    let mut data = vec![0.0f32; out_shape.size()];
    let slice_len = merged_len * inner;
    let mut offset = 0usize;
    for (index, array) in arrays.iter().enumerate() {
        let block = array.shape().dims()[axis] * inner;
        let src = array.as_slice();
        tracing::trace!(index, block, offset, runs = outer, "merge input");
        for o in 0..outer {
            let dst = o * slice_len + offset;
            data[dst..dst + block].copy_from_slice(&src[o * block..(o + 1) * block]);
        }
        offset += block;
    }
    Ok(NdArray::from_parts(out_shape, data))
}

/// Cuts `array` along `axis` into consecutive parts of the given `sizes`.
///
/// # Errors
/// Returns [`ArrayError::AxisOutOfRange`] for a bad axis and
/// [`ArrayError::InvalidArgument`] if `sizes` does not sum to the axis extent.
pub fn split(array: &NdArray, axis: usize, sizes: &[usize]) -> ArrayResult<Vec<NdArray>> {
    check_axis(axis, array.rank())?;
    let (outer, len, inner) = axis_split(array.shape(), axis);
    let total = sizes.iter().try_fold(0usize, |acc, &s| acc.checked_add(s));
    if total != Some(len) {
        return Err(ArrayError::InvalidArgument(format!(
            "split sizes {sizes:?} do not sum to {len}, the size of axis {axis}"
        )));
    }
    tracing::debug!(axis, parts = sizes.len(), shape = %array.shape(), "split");

    let src = array.as_slice();
    let slice_len = len * inner;
    let mut parts = Vec::with_capacity(sizes.len());
    let mut offset = 0usize;
    for (index, &size) in sizes.iter().enumerate() {
        let block = size * inner;
        tracing::trace!(index, block, offset, runs = outer, "split part");
        let mut data = Vec::with_capacity(outer * block);
        for o in 0..outer {
            let start = o * slice_len + offset;
            data.extend_from_slice(&src[start..start + block]);
        }
        parts.push(NdArray::from_parts(array.shape().with_dim(axis, size), data));
        offset += block;
    }
    Ok(parts)
}

impl NdArray {
    /// See [`split`].
    pub fn split(&self, axis: usize, sizes: &[usize]) -> ArrayResult<Vec<NdArray>> {
        split(self, axis, sizes)
    }
}
