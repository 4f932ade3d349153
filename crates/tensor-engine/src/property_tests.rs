// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for shape arithmetic, reductions, extrema and merge.

use crate::{merge, unravel_index, NdArray, Shape};
use proptest::prelude::*;

/// Shapes of rank 1-4 with small positive dimensions.
fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..6, 1..=4)
}

/// An array of the given shape with values in a modest range.
fn array_strategy(dims: Vec<usize>) -> impl Strategy<Value = NdArray> {
    let size: usize = dims.iter().product();
    prop::collection::vec(-100.0f32..100.0, size)
        .prop_map(move |data| NdArray::from_vec(dims.clone(), data).unwrap())
}

/// An array together with a valid axis.
fn array_and_axis() -> impl Strategy<Value = (NdArray, usize)> {
    shape_strategy().prop_flat_map(|dims| {
        let rank = dims.len();
        (array_strategy(dims), 0..rank)
    })
}

/// A batched matrix (rank >= 2) together with one of its last two axes.
fn matrix_and_axis() -> impl Strategy<Value = (NdArray, usize)> {
    prop::collection::vec(1usize..6, 2..=4).prop_flat_map(|dims| {
        let rank = dims.len();
        (array_strategy(dims), (rank - 2)..rank)
    })
}

/// Small integer-valued data so ties are common.
fn tied_matrix() -> impl Strategy<Value = NdArray> {
    (1usize..5, 1usize..5).prop_flat_map(|(r, c)| {
        prop::collection::vec(0u8..3, r * c)
            .prop_map(move |v| {
                let data = v.into_iter().map(f32::from).collect();
                NdArray::from_vec([r, c], data).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn prop_size_is_product(dims in shape_strategy()) {
        let shape = Shape::new(dims.clone());
        prop_assert_eq!(shape.size(), dims.iter().product::<usize>());
    }

    #[test]
    fn prop_index_is_bijection(dims in shape_strategy()) {
        let shape = Shape::new(dims);
        let mut seen = vec![false; shape.size()];
        for flat in 0..shape.size() {
            let idx = unravel_index(flat, &shape).unwrap();
            let back = shape.index(&idx).unwrap();
            prop_assert_eq!(back, flat);
            prop_assert!(!seen[back]);
            seen[back] = true;
        }
        prop_assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn prop_single_merge_is_independent((a, axis) in array_and_axis()) {
        let mut copy = merge(axis, &[&a]).unwrap();
        prop_assert_eq!(&copy, &a);
        let zero = vec![0; a.rank()];
        let original = a.get(&zero).unwrap();
        copy.set(&zero, original + 1.0).unwrap();
        prop_assert_eq!(a.get(&zero).unwrap(), original);
    }

    #[test]
    fn prop_merge_then_split_roundtrips(
        (a, b) in shape_strategy().prop_flat_map(|dims| {
            let mut other = dims.clone();
            other[0] += 1;
            (array_strategy(dims), array_strategy(other))
        })
    ) {
        let m = merge(0, &[&a, &b]).unwrap();
        let (da, db) = (a.shape().dims()[0], b.shape().dims()[0]);
        prop_assert_eq!(m.shape().dims()[0], da + db);
        let parts = m.split(0, &[da, db]).unwrap();
        prop_assert_eq!(&parts[0], &a);
        prop_assert_eq!(&parts[1], &b);
    }

    #[test]
    fn prop_var_matches_mean((a, axis) in array_and_axis()) {
        let mean = a.mean_axis(axis).unwrap();
        let var = a.var_axis(axis).unwrap();
        let n = a.shape().dims()[axis] as f32;
        // Recompute the variance from the reported mean.
        let centered = a.sub(&mean.unsqueeze(axis).unwrap()).unwrap();
        let expected = centered.powf(2.0).sum_axis(axis).unwrap().div_scalar(n);
        for (&got, &want) in var.as_slice().iter().zip(expected.as_slice()) {
            prop_assert!((got - want).abs() <= 1e-2 + 1e-3 * want.abs(), "{} vs {}", got, want);
        }
    }

    #[test]
    fn prop_max_mean_min_ordering((a, axis) in array_and_axis()) {
        let hi = a.max_axis(axis).unwrap();
        let mid = a.mean_axis(axis).unwrap();
        let lo = a.min_axis(axis).unwrap();
        for ((&h, &m), &l) in hi.as_slice().iter().zip(mid.as_slice()).zip(lo.as_slice()) {
            prop_assert!(h + 1e-3 >= m && m + 1e-3 >= l, "{} {} {}", h, m, l);
        }
    }

    #[test]
    fn prop_arg_max_indexes_max((a, axis) in matrix_and_axis()) {
        let idx = a.arg_max(axis).unwrap();
        let max = a.max_keepdim(axis).unwrap();
        let axis_len = a.shape().dims()[axis];
        for flat in 0..idx.size() {
            let i = idx.as_slice()[flat];
            prop_assert!(i >= 0.0 && (i as usize) < axis_len);
            let mut pos = unravel_index(flat, idx.shape()).unwrap();
            pos[axis] = i as usize;
            prop_assert_eq!(a.get(&pos).unwrap(), max.as_slice()[flat]);
        }
    }

    #[test]
    fn prop_arg_max_prefers_lowest_index(a in tied_matrix(), axis in 0usize..2) {
        let idx = a.arg_max(axis).unwrap();
        let max = a.max_keepdim(axis).unwrap();
        for flat in 0..idx.size() {
            let winner = idx.as_slice()[flat] as usize;
            let mut pos = unravel_index(flat, idx.shape()).unwrap();
            for earlier in 0..winner {
                pos[axis] = earlier;
                prop_assert!(a.get(&pos).unwrap() < max.as_slice()[flat]);
            }
        }
    }

    #[test]
    fn prop_broadcast_add_matches_explicit((a, axis) in array_and_axis()) {
        // Collapsing an axis and broadcasting it back is the same as tiling.
        let row = a.sum_axis(axis).unwrap().unsqueeze(axis).unwrap();
        let mut counts = vec![1; a.rank()];
        counts[axis] = a.shape().dims()[axis];
        let tiled = row.repeat(&counts).unwrap();
        prop_assert_eq!(a.add(&row).unwrap(), a.add(&tiled).unwrap());
    }
}
