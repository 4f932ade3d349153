// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication.

use crate::{ArrayError, ArrayResult, NdArray, Shape};

/// Computes `lhs @ rhs` into a freshly allocated array.
///
/// Accepted shapes:
/// - `[M, K] @ [K, N] -> [M, N]`
/// - `[..., M, K] @ [..., K, N] -> [..., M, N]` with identical batch dims
/// - `[..., M, K] @ [K, N] -> [..., M, N]` (the right side is shared)
///
/// # Errors
/// Returns [`ArrayError::ShapeMismatch`] if either side has rank below 2,
/// the inner dimensions differ, or the batch dimensions disagree.
pub fn matmul(lhs: &NdArray, rhs: &NdArray) -> ArrayResult<NdArray> {
    let mismatch = || ArrayError::ShapeMismatch {
        op: "matmul",
        lhs: lhs.shape().clone(),
        rhs: rhs.shape().clone(),
    };

    let (l, r) = (lhs.shape().dims(), rhs.shape().dims());
    if l.len() < 2 || r.len() < 2 {
        return Err(mismatch());
    }
    let (m, k) = (l[l.len() - 2], l[l.len() - 1]);
    let (k2, n) = (r[r.len() - 2], r[r.len() - 1]);
    if k != k2 {
        return Err(mismatch());
    }

    let lhs_batch = &l[..l.len() - 2];
    let rhs_batch = &r[..r.len() - 2];
    let shared_rhs = rhs_batch.is_empty();
    if !shared_rhs && lhs_batch != rhs_batch {
        return Err(mismatch());
    }

    let batch: usize = lhs_batch.iter().product();
    tracing::debug!(batch, m, k, n, shared_rhs, "matmul");

    let (a, b) = (lhs.as_slice(), rhs.as_slice());
    let mut out_dims = lhs_batch.to_vec();
    out_dims.extend([m, n]);
    let mut out = NdArray::zeros(Shape::new(out_dims))?;
    let c = out.data_mut();
    for i in 0..batch {
        let b_off = if shared_rhs { 0 } else { i * k * n };
        matmul_f32_generic(
            &a[i * m * k..(i + 1) * m * k],
            &b[b_off..b_off + k * n],
            &mut c[i * m * n..(i + 1) * m * n],
            m,
            k,
            n,
        );
    }
    Ok(out)
}

/// Portable f32 matrix multiplication into a zeroed `c`.
///
/// Uses ikj loop order so the inner loop is a saxpy on a row of `c`,
/// sequential in memory for both `b` and `c`.
fn matmul_f32_generic(a: &[f32], b: &[f32], c: &mut [f32], m: usize, k: usize, n: usize) {
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (c_ij, &b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

impl NdArray {
    /// See [`matmul`].
    pub fn matmul(&self, other: &NdArray) -> ArrayResult<NdArray> {
        matmul(self, other)
    }
}
