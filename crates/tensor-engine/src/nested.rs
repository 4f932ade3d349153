// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Construction of arrays from nested literal data.
//!
//! Any nesting of `f32`, fixed-size arrays, slices and vectors can be fed to
//! [`crate::NdArray::from_nested`]. The shape is read off the first element
//! at each depth; every sibling must then agree with it. An empty sequence has
//! no first element, so the dimensions below it come from the element type:
//! fixed-size arrays contribute their length and open-ended sequences
//! contribute 0. The rank therefore always equals the nesting depth.

use crate::{ArrayError, ArrayResult};

/// Nested data that can be flattened into a row-major buffer.
pub trait NestedData {
    /// Appends the dimensions of this value (outermost first) to `dims`.
    fn collect_dims(&self, dims: &mut Vec<usize>);

    /// Appends the dimensions implied by the type alone, for sequences with
    /// no element to inspect.
    fn type_dims(dims: &mut Vec<usize>);

    /// Appends the elements to `out`, checking that this value matches the
    /// expected remaining dimensions `dims`.
    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()>;
}

impl NestedData for f32 {
    fn collect_dims(&self, _dims: &mut Vec<usize>) {}

    fn type_dims(_dims: &mut Vec<usize>) {}

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
        if !dims.is_empty() {
            return Err(ArrayError::InvalidArgument(format!(
                "ragged nested data: found a scalar where {} more dimension(s) were expected",
                dims.len()
            )));
        }
        out.push(*self);
        Ok(())
    }
}

/// Unsuffixed float literals default to `f64`; they are narrowed on the way in.
impl NestedData for f64 {
    fn collect_dims(&self, _dims: &mut Vec<usize>) {}

    fn type_dims(_dims: &mut Vec<usize>) {}

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
        (*self as f32).flatten_into(dims, out)
    }
}

fn collect_seq<T: NestedData>(items: &[T], dims: &mut Vec<usize>) {
    dims.push(items.len());
    match items.first() {
        Some(first) => first.collect_dims(dims),
        None => T::type_dims(dims),
    }
}

fn flatten_seq<T: NestedData>(items: &[T], dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
    match dims.split_first() {
        Some((&len, rest)) if len == items.len() => {
            for item in items {
                item.flatten_into(rest, out)?;
            }
            Ok(())
        }
        Some((&len, _)) => Err(ArrayError::InvalidArgument(format!(
            "ragged nested data: expected {len} elements, found {}",
            items.len()
        ))),
        None => Err(ArrayError::InvalidArgument(
            "ragged nested data: found a sequence where a scalar was expected".to_string(),
        )),
    }
}

impl<T: NestedData> NestedData for [T] {
    fn collect_dims(&self, dims: &mut Vec<usize>) {
        collect_seq(self, dims);
    }

    fn type_dims(dims: &mut Vec<usize>) {
        dims.push(0);
        T::type_dims(dims);
    }

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
        flatten_seq(self, dims, out)
    }
}

impl<T: NestedData, const N: usize> NestedData for [T; N] {
    fn collect_dims(&self, dims: &mut Vec<usize>) {
        collect_seq(self.as_slice(), dims);
    }

    fn type_dims(dims: &mut Vec<usize>) {
        dims.push(N);
        T::type_dims(dims);
    }

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
        flatten_seq(self.as_slice(), dims, out)
    }
}

impl<T: NestedData> NestedData for Vec<T> {
    fn collect_dims(&self, dims: &mut Vec<usize>) {
        collect_seq(self.as_slice(), dims);
    }

    fn type_dims(dims: &mut Vec<usize>) {
        dims.push(0);
        T::type_dims(dims);
    }

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<f32>) -> ArrayResult<()> {
        flatten_seq(self.as_slice(), dims, out)
    }
}
