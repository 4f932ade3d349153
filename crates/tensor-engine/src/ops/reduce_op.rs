// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reductions: sum, mean, variance, max and min, over the whole array or
//! along one axis.
//!
//! Axis reductions remove the reduced dimension from the output shape. The
//! input is split as `(outer, axis, inner)` and each output cell `(o, i)` is
//! produced from the lane `src[(o * axis + k) * inner + i]` for `k` in
//! `0..axis`, so every input element is read once per pass.

use crate::index::{axis_split, check_axis};
use crate::{ArrayResult, NdArray};

/// One line of elements running along the reduced axis.
#[derive(Clone, Copy)]
struct Lane<'a> {
    data: &'a [f32],
    start: usize,
    stride: usize,
    len: usize,
}

impl Lane<'_> {
    fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(move |k| self.data[self.start + k * self.stride])
    }

    fn sum(&self) -> f32 {
        self.iter().sum()
    }

    fn mean(&self) -> f32 {
        self.sum() / self.len as f32
    }
}

fn reduce_lanes(
    op: &'static str,
    array: &NdArray,
    axis: usize,
    f: impl Fn(Lane<'_>) -> f32,
) -> ArrayResult<NdArray> {
    check_axis(axis, array.rank())?;
    tracing::debug!(op, axis, shape = %array.shape(), "axis reduction");

    let (outer, len, inner) = axis_split(array.shape(), axis);
    let src = array.as_slice();
    let mut data = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            data.push(f(Lane {
                data: src,
                start: o * len * inner + i,
                stride: inner,
                len,
            }));
        }
    }
    Ok(NdArray::from_parts(array.shape().without_axis(axis), data))
}

/// Sum of every element.
pub fn sum(array: &NdArray) -> f32 {
    array.as_slice().iter().sum()
}

/// Arithmetic mean of every element (`NaN` for an empty array).
pub fn mean(array: &NdArray) -> f32 {
    sum(array) / array.size() as f32
}

/// Largest element; `-inf` for an empty array.
pub fn max(array: &NdArray) -> f32 {
    array
        .as_slice()
        .iter()
        .fold(f32::NEG_INFINITY, |acc, &x| if x > acc { x } else { acc })
}

/// Smallest element; `+inf` for an empty array.
pub fn min(array: &NdArray) -> f32 {
    array
        .as_slice()
        .iter()
        .fold(f32::INFINITY, |acc, &x| if x < acc { x } else { acc })
}

/// Sums along `axis`, removing it from the shape.
///
/// # Errors
/// Returns [`crate::ArrayError::AxisOutOfRange`] if `axis >= rank`.
///
/// # Examples
/// ```
/// use tensor_engine::{ops::reduce, NdArray};
/// let a = NdArray::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(reduce::sum_axis(&a, 1).unwrap().as_slice(), &[6.0, 15.0]);
/// ```
pub fn sum_axis(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    reduce_lanes("sum", array, axis, |lane| lane.sum())
}

/// Means along `axis`, removing it from the shape.
pub fn mean_axis(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    reduce_lanes("mean", array, axis, |lane| lane.mean())
}

/// Population variance along `axis` (divides by the axis size, not size - 1).
///
/// Each lane is read twice: once for its mean, once for the squared
/// deviations from that mean.
pub fn var_axis(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    reduce_lanes("var", array, axis, |lane| {
        let mean = lane.mean();
        lane.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / lane.len as f32
    })
}

/// Maximum along `axis`, removing it from the shape.
pub fn max_axis(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    reduce_lanes("max", array, axis, |lane| {
        lane.iter()
            .fold(f32::NEG_INFINITY, |acc, x| if x > acc { x } else { acc })
    })
}

/// Minimum along `axis`, removing it from the shape.
pub fn min_axis(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    reduce_lanes("min", array, axis, |lane| {
        lane.iter()
            .fold(f32::INFINITY, |acc, x| if x < acc { x } else { acc })
    })
}

impl NdArray {
    /// See [`sum`].
    pub fn sum(&self) -> f32 {
        sum(self)
    }

    /// See [`mean`].
    pub fn mean(&self) -> f32 {
        mean(self)
    }

    /// See [`max`].
    pub fn max(&self) -> f32 {
        max(self)
    }

    /// See [`min`].
    pub fn min(&self) -> f32 {
        min(self)
    }

    /// See [`sum_axis`].
    pub fn sum_axis(&self, axis: usize) -> ArrayResult<NdArray> {
        sum_axis(self, axis)
    }

    /// See [`mean_axis`].
    pub fn mean_axis(&self, axis: usize) -> ArrayResult<NdArray> {
        mean_axis(self, axis)
    }

    /// See [`var_axis`].
    pub fn var_axis(&self, axis: usize) -> ArrayResult<NdArray> {
        var_axis(self, axis)
    }

    /// See [`max_axis`].
    pub fn max_axis(&self, axis: usize) -> ArrayResult<NdArray> {
        max_axis(self, axis)
    }

    /// See [`min_axis`].
    pub fn min_axis(&self, axis: usize) -> ArrayResult<NdArray> {
        min_axis(self, axis)
    }
}
