// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Softmax along the last axis.

use crate::NdArray;

/// Computes softmax along the last dimension: `out[i] = exp(x[i] - max) / sum(exp(x - max))`.
///
/// Uses the numerically stable variant that subtracts the row maximum
/// before exponentiation to prevent overflow. The softmax of a scalar is 1.
pub fn softmax(input: &NdArray) -> NdArray {
    let mut output = input.clone();
    let last_dim = match input.shape().dims().last() {
        None => {
            output.data_mut()[0] = 1.0;
            return output;
        }
        Some(0) => return output,
        Some(&d) => d,
    };

    for row in output.data_mut().chunks_exact_mut(last_dim) {
        // Find max for numerical stability.
        let max_val = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let mut sum = 0.0f32;
        for x in row.iter_mut() {
            *x = (*x - max_val).exp();
            sum += *x;
        }

        if sum > 0.0 {
            let inv_sum = 1.0 / sum;
            row.iter_mut().for_each(|x| *x *= inv_sum);
        }
    }
    output
}

impl NdArray {
    /// See [`softmax`].
    pub fn softmax(&self) -> NdArray {
        softmax(self)
    }
}
