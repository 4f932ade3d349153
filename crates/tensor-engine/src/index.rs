// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis validation, index conversion, and small sequence helpers shared by
//! the operation modules.

use crate::{ArrayError, ArrayResult, Shape};

/// Checks that `axis` addresses a dimension of an array of rank `rank`.
///
/// # Errors
/// Returns [`ArrayError::AxisOutOfRange`] if `axis >= rank`.
pub fn check_axis(axis: usize, rank: usize) -> ArrayResult<()> {
    if axis >= rank {
        return Err(ArrayError::AxisOutOfRange { axis, rank });
    }
    Ok(())
}

/// Converts a flat row-major offset back into a multi-index for `shape`.
///
/// This is the inverse of [`Shape::index`].
///
/// # Errors
/// Returns [`ArrayError::IndexOutOfBounds`] if `flat >= shape.size()`.
///
/// # Examples
/// ```
/// use tensor_engine::{unravel_index, Shape};
/// let s = Shape::new(vec![2, 3, 4]);
/// assert_eq!(unravel_index(23, &s).unwrap(), vec![1, 2, 3]);
/// ```
pub fn unravel_index(flat: usize, shape: &Shape) -> ArrayResult<Vec<usize>> {
    let size = shape.size();
    if flat >= size {
        return Err(ArrayError::IndexOutOfBounds {
            dim: 0,
            index: flat,
            size,
        });
    }
    let mut rest = flat;
    let mut indices = vec![0usize; shape.rank()];
    for (slot, &dim) in indices.iter_mut().zip(shape.dims()).rev() {
        *slot = rest % dim;
        rest /= dim;
    }
    Ok(indices)
}

/// Returns an ascending sequence `[0, 1, ..., len - 1]`.
///
/// # Errors
/// Returns [`ArrayError::InvalidArgument`] if `len` is negative.
///
/// # Examples
/// ```
/// use tensor_engine::sequence;
/// assert_eq!(sequence(5).unwrap(), vec![0, 1, 2, 3, 4]);
/// ```
pub fn sequence(len: i64) -> ArrayResult<Vec<usize>> {
    let len = usize::try_from(len).map_err(|_| {
        ArrayError::InvalidArgument(format!("sequence length must be non-negative, got {len}"))
    })?;
    Ok((0..len).collect())
}

/// Converts floating-point values to integers, truncating toward zero.
///
/// Values outside the `i64` range saturate; NaN maps to 0.
///
/// # Examples
/// ```
/// use tensor_engine::to_int;
/// assert_eq!(to_int(&[1.9, -1.9]), vec![1, -1]);
/// ```
pub fn to_int(values: &[f32]) -> Vec<i64> {
    values.iter().map(|&v| v as i64).collect()
}

/// Splits `shape` around `axis` into `(outer, axis_len, inner)`.
///
/// `outer` is the product of the dimensions before `axis` and `inner` the
/// product of those after it, so element `(o, k, i)` lives at flat offset
/// `(o * axis_len + k) * inner + i`.
pub(crate) fn axis_split(shape: &Shape, axis: usize) -> (usize, usize, usize) {
    let dims = shape.dims();
    let outer = dims[..axis].iter().product();
    let inner = dims[axis + 1..].iter().product();
    (outer, dims[axis], inner)
}

/// Row-major strides of `shape` aligned against `target`, with stride 0 for
/// every dimension that is broadcast (size 1 or missing on the left).
///
/// `shape` must already be broadcast-compatible with `target`.
pub(crate) fn broadcast_strides(shape: &Shape, target: &Shape) -> Vec<usize> {
    let own = shape.strides();
    let offset = target.rank() - shape.rank();
    let mut strides = vec![0usize; target.rank()];
    for (i, (&dim, &stride)) in shape.dims().iter().zip(&own).enumerate() {
        if dim != 1 {
            strides[offset + i] = stride;
        }
    }
    strides
}

/// Walks every position of `dims` in row-major order, handing the callback
/// the running offsets into two strided sources.
pub(crate) fn walk_strided(
    dims: &[usize],
    lhs_strides: &[usize],
    rhs_strides: &[usize],
    mut f: impl FnMut(usize, usize),
) {
    let total: usize = dims.iter().product();
    let rank = dims.len();
    let mut counter = vec![0usize; rank];
    let (mut li, mut ri) = (0usize, 0usize);
    for _ in 0..total {
        f(li, ri);
        for d in (0..rank).rev() {
            counter[d] += 1;
            li += lhs_strides[d];
            ri += rhs_strides[d];
            if counter[d] < dims[d] {
                break;
            }
            li -= lhs_strides[d] * dims[d];
            ri -= rhs_strides[d] * dims[d];
            counter[d] = 0;
        }
    }
}
