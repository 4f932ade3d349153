// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Max/min/argmax/argmin over the last two axes of a batched matrix.
//!
//! The input is read as `[...batch, rows, cols]` with every leading dimension
//! flattened into one batch count. Only two axes are accepted:
//!
//! - `rank - 2` scans down each column (one result per batch and column),
//! - `rank - 1` scans along each row (one result per batch and row).
//!
//! The reduced axis stays in the output with size 1. Comparison is strict,
//! so ties keep the lowest index. Arg results are written as `f32` indices.

use crate::{ArrayError, ArrayResult, NdArray};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

impl Extremum {
    fn initial(self) -> f32 {
        match self {
            Extremum::Max => f32::NEG_INFINITY,
            Extremum::Min => f32::INFINITY,
        }
    }

    fn beats(self, candidate: f32, best: f32) -> bool {
        match self {
            Extremum::Max => candidate > best,
            Extremum::Min => candidate < best,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Value,
    Index,
}

fn scan(array: &NdArray, axis: usize, kind: Extremum, emit: Emit) -> ArrayResult<NdArray> {
    let rank = array.rank();
    if rank < 2 {
        return Err(ArrayError::InvalidArgument(format!(
            "axis extrema need an array of rank >= 2, got shape {}",
            array.shape()
        )));
    }
    let (rows_axis, cols_axis) = (rank - 2, rank - 1);
    if axis != rows_axis && axis != cols_axis {
        return Err(ArrayError::UnsupportedAxis {
            axis,
            rows_axis,
            cols_axis,
        });
    }

    let dims = array.shape().dims();
    let (rows, cols) = (dims[rows_axis], dims[cols_axis]);
    let batch: usize = dims[..rows_axis].iter().product();
    let src = array.as_slice();

    // Scanning rows: `lanes` columns per batch, each `rows` long with stride `cols`.
    // Scanning cols: `lanes` rows per batch, each `cols` long with stride 1.
    let (lanes, len, lane_step, elem_step) = if axis == rows_axis {
        (cols, rows, 1, cols)
    } else {
        (rows, cols, cols, 1)
    };

    let mut data = Vec::with_capacity(batch * lanes);
    for b in 0..batch {
        let base = b * rows * cols;
        for lane in 0..lanes {
            let start = base + lane * lane_step;
            let mut best = kind.initial();
            let mut best_index = 0usize;
            for k in 0..len {
                let v = src[start + k * elem_step];
                if kind.beats(v, best) {
                    best = v;
                    best_index = k;
                }
            }
            data.push(match emit {
                Emit::Value => best,
                Emit::Index => best_index as f32,
            });
        }
    }
    Ok(NdArray::from_parts(array.shape().with_dim(axis, 1), data))
}

/// Maximum over the rows (`axis = rank - 2`) or columns (`axis = rank - 1`).
///
/// # Errors
/// Returns [`ArrayError::UnsupportedAxis`] for any other axis, and
/// [`ArrayError::InvalidArgument`] if the array has rank below 2.
pub fn max(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    scan(array, axis, Extremum::Max, Emit::Value)
}

/// Minimum over the rows or columns; see [`max`].
pub fn min(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    scan(array, axis, Extremum::Min, Emit::Value)
}

/// Index of the first maximum over the rows or columns; see [`max`].
///
/// # Examples
/// ```
/// use tensor_engine::{ops::extrema, NdArray};
/// let a = NdArray::from_nested(&[[[1.0, 5.0, 2.0], [9.0, 0.0, 3.0]]]).unwrap();
/// let idx = extrema::arg_max(&a, 2).unwrap();
/// assert_eq!(idx.shape().dims(), &[1, 2, 1]);
/// assert_eq!(idx.as_slice(), &[1.0, 0.0]);
/// ```
pub fn arg_max(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    scan(array, axis, Extremum::Max, Emit::Index)
}

/// Index of the first minimum over the rows or columns; see [`max`].
pub fn arg_min(array: &NdArray, axis: usize) -> ArrayResult<NdArray> {
    scan(array, axis, Extremum::Min, Emit::Index)
}

impl NdArray {
    /// See [`arg_max`].
    pub fn arg_max(&self, axis: usize) -> ArrayResult<NdArray> {
        arg_max(self, axis)
    }

    /// See [`arg_min`].
    pub fn arg_min(&self, axis: usize) -> ArrayResult<NdArray> {
        arg_min(self, axis)
    }

    /// Row/column maximum keeping the reduced axis at size 1; see [`max`].
    pub fn max_keepdim(&self, axis: usize) -> ArrayResult<NdArray> {
        max(self, axis)
    }

    /// Row/column minimum keeping the reduced axis at size 1; see [`min`].
    pub fn min_keepdim(&self, axis: usize) -> ArrayResult<NdArray> {
        min(self, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn batched() -> NdArray {
        // batch 0: [[1, 5, 2], [9, 0, 3]]
        // batch 1: [[4, 4, 8], [4, 7, 8]]
        NdArray::from_nested(&[
            [[1.0, 5.0, 2.0], [9.0, 0.0, 3.0]],
            [[4.0, 4.0, 8.0], [4.0, 7.0, 8.0]],
        ])
        .unwrap()
    }

    #[test]
    fn test_arg_max_cols() {
        let a = NdArray::from_nested(&[[[1.0, 5.0, 2.0], [9.0, 0.0, 3.0]]]).unwrap();
        let idx = a.arg_max(2).unwrap();
        assert_eq!(idx.shape(), &Shape::new(vec![1, 2, 1]));
        assert_eq!(idx.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_max_cols_batched() {
        let m = batched().max_keepdim(2).unwrap();
        assert_eq!(m.shape(), &Shape::new(vec![2, 2, 1]));
        assert_eq!(m.as_slice(), &[5.0, 9.0, 8.0, 8.0]);
    }

    #[test]
    fn test_rows_axis() {
        let a = batched();
        let m = a.max_keepdim(1).unwrap();
        assert_eq!(m.shape(), &Shape::new(vec![2, 1, 3]));
        assert_eq!(m.as_slice(), &[9.0, 5.0, 3.0, 4.0, 7.0, 8.0]);

        let idx = a.arg_min(1).unwrap();
        assert_eq!(idx.as_slice(), &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        let lo = a.min_keepdim(1).unwrap();
        assert_eq!(lo.as_slice(), &[1.0, 0.0, 2.0, 4.0, 4.0, 8.0]);
    }

    #[test]
    fn test_ties_keep_first_index() {
        let a = batched();
        // Both rows of batch 1 peak at index 2.
        let idx = a.arg_max(2).unwrap();
        assert_eq!(idx.as_slice(), &[1.0, 0.0, 2.0, 2.0]);
        // Column [8, 8] ties: first row wins.
        let idx = a.arg_max(1).unwrap();
        assert_eq!(&idx.as_slice()[3..], &[0.0, 1.0, 0.0]);
        // Row [4, 4, 8]: min 4 first seen at 0.
        let idx = a.arg_min(2).unwrap();
        assert_eq!(&idx.as_slice()[2..], &[0.0, 0.0]);
    }

    #[test]
    fn test_plain_matrix() {
        let a = NdArray::from_nested(&[[3.0, 1.0], [0.0, 2.0]]).unwrap();
        assert_eq!(a.arg_max(0).unwrap().as_slice(), &[0.0, 1.0]);
        assert_eq!(a.arg_max(1).unwrap().as_slice(), &[0.0, 1.0]);
        assert_eq!(a.min_keepdim(1).unwrap().shape(), &Shape::matrix(2, 1));
    }

    #[test]
    fn test_unsupported_axis() {
        let a = batched();
        assert_eq!(
            a.arg_max(0),
            Err(ArrayError::UnsupportedAxis {
                axis: 0,
                rows_axis: 1,
                cols_axis: 2
            })
        );
        assert!(matches!(
            a.max_keepdim(3),
            Err(ArrayError::UnsupportedAxis { axis: 3, .. })
        ));
    }

    #[test]
    fn test_rank_one_rejected() {
        assert!(matches!(
            NdArray::arange(3).arg_max(0),
            Err(ArrayError::InvalidArgument(_))
        ));
    }
}
