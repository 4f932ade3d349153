// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-engine
//!
//! N-dimensional `f32` arrays and the operations neural-network code is
//! built from.
//!
//! This crate provides:
//! - [`Shape`] — dimension vector with row-major index arithmetic.
//! - [`NdArray`] — an owned array over a contiguous buffer, plus the
//!   borrowed [`NdArrayView`].
//! - Broadcasting elementwise arithmetic and structural operations
//!   (reshape, index-select, slice, repeat) as methods on [`NdArray`].
//! - [`ops::reduce`] — sum/mean/variance/max/min, global or per axis.
//! - [`ops::extrema`] — max/min/argmax/argmin over the last two axes.
//! - [`merge`] / [`split`] — block-copy concatenation along any axis.
//! - [`ArrayConfig`] — print and tolerance settings loadable from TOML.
//!
//! # Design Goals
//! - Values, not buffers: every operation returns a fresh array and leaves
//!   its inputs untouched, so results can be shared freely across threads.
//! - Validation before allocation: a failed call never leaves partial output.
//! - Clean error types via `thiserror`.
//!
//! # Example
//! ```
//! use tensor_engine::{merge, NdArray};
//!
//! let a = NdArray::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!(a.sum_axis(1).unwrap().as_slice(), &[6.0, 15.0]);
//!
//! let b = NdArray::from_nested(&[[7.0, 8.0, 9.0]]).unwrap();
//! let m = merge(0, &[&a, &b]).unwrap();
//! assert_eq!(m.shape().dims(), &[3, 3]);
//! ```

mod array;
mod config;
mod display;
mod error;
mod index;
mod nested;
pub mod ops;
mod shape;

#[cfg(test)]
mod property_tests;

pub use array::{NdArray, NdArrayView};
pub use config::{ArrayConfig, PrintOptions, Tolerance};
pub use display::ArrayDisplay;
pub use error::{ArrayError, ArrayResult};
pub use index::{check_axis, sequence, to_int, unravel_index};
pub use nested::NestedData;
pub use ops::{matmul, merge, softmax, split};
pub use shape::Shape;
