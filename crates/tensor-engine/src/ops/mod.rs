// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Array operations.
//!
//! Every operation reads its inputs and writes a newly allocated result; no
//! input buffer is ever modified. Elementwise and structural operations are
//! exposed as methods on [`crate::NdArray`]; the engines below are also
//! available as free functions.

mod elementwise_op;
mod extrema_op;
mod matmul_op;
mod merge_op;
mod reduce_op;
mod softmax_op;
mod view_op;

pub use elementwise_op::broadcast_binary;
pub use matmul_op::matmul;
pub use merge_op::{merge, split};
pub use softmax_op::softmax;

/// Global and per-axis reductions (sum, mean, variance, max, min).
pub mod reduce {
    pub use super::reduce_op::{
        max, max_axis, mean, mean_axis, min, min_axis, sum, sum_axis, var_axis,
    };
}

/// Max/min/argmax/argmin over the last two axes of a batched matrix.
pub mod extrema {
    pub use super::extrema_op::{arg_max, arg_min, max, min};
}
