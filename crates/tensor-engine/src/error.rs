// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for array operations.

use crate::Shape;

/// Convenience alias used by every fallible operation in this crate.
pub type ArrayResult<T> = Result<T, ArrayError>;

/// Errors that can occur while building or transforming arrays.
///
/// All validation runs before any output is allocated, so an `Err` never
/// leaves a partially written result behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// Malformed construction input (empty merge list, negative length, ragged data).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The provided buffer length does not match the element count of the shape.
    #[error("buffer size mismatch: shape requires {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Two arrays have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// A merge input has a different number of dimensions than the first input.
    #[error("merge: array {index} has {actual} dimensions, expected {expected}")]
    MergeRankMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A merge input disagrees with the first input on a non-merge dimension.
    #[error("merge: array {index} has size {actual} at dimension {dim}, expected {expected}")]
    MergeShapeMismatch {
        index: usize,
        dim: usize,
        expected: usize,
        actual: usize,
    },

    /// The axis argument is outside `[0, rank)`.
    #[error("axis {axis} out of range for array of rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    /// A multi-index has the wrong number of components.
    #[error("index arity mismatch: expected {expected} indices, got {actual}")]
    IndexArity { expected: usize, actual: usize },

    /// A multi-index component lies outside its dimension's extent.
    #[error("index {index} out of bounds for dimension {dim} of size {size}")]
    IndexOutOfBounds {
        dim: usize,
        index: usize,
        size: usize,
    },

    /// The axis-extrema engine only scans the last two axes.
    #[error("unsupported axis {axis}: only axis {rows_axis} (rows) or {cols_axis} (cols) is supported")]
    UnsupportedAxis {
        axis: usize,
        rows_axis: usize,
        cols_axis: usize,
    },

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),
}
