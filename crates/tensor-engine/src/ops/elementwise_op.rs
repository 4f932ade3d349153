// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting elementwise arithmetic.
//!
//! Binary operations align shapes from the trailing dimension. A size-1 (or
//! missing leading) dimension on either side is read with stride 0, so it
//! repeats against the other operand's extent.

use crate::array::buffer_len;
use crate::index::{broadcast_strides, walk_strided};
use crate::{ArrayError, ArrayResult, NdArray};

/// Applies `f` pairwise over the broadcast of `lhs` and `rhs`.
///
/// # Errors
/// Returns [`ArrayError::ShapeMismatch`] naming `op` and both input shapes
/// if they cannot be broadcast together.
pub fn broadcast_binary(
    op: &'static str,
    lhs: &NdArray,
    rhs: &NdArray,
    f: impl Fn(f32, f32) -> f32,
) -> ArrayResult<NdArray> {
    let (a, b) = (lhs.as_slice(), rhs.as_slice());

    // Same shape: plain zip, no index bookkeeping.
    if lhs.shape() == rhs.shape() {
        let data = a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect();
        return Ok(NdArray::from_parts(lhs.shape().clone(), data));
    }

    let out_shape = lhs
        .shape()
        .broadcast_with(rhs.shape())
        .map_err(|e| match e {
            ArrayError::ShapeMismatch { .. } => ArrayError::ShapeMismatch {
                op,
                lhs: lhs.shape().clone(),
                rhs: rhs.shape().clone(),
            },
            other => other,
        })?;
    let ls = broadcast_strides(lhs.shape(), &out_shape);
    let rs = broadcast_strides(rhs.shape(), &out_shape);

    let mut data = Vec::with_capacity(buffer_len(&out_shape)?);
    walk_strided(out_shape.dims(), &ls, &rs, |li, ri| data.push(f(a[li], b[ri])));
    Ok(NdArray::from_parts(out_shape, data))
}

impl NdArray {
    /// Elementwise `self + other` with broadcasting.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::NdArray;
    /// let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let row = NdArray::from(vec![10.0, 20.0]);
    /// assert_eq!(a.add(&row).unwrap().as_slice(), &[11.0, 22.0, 13.0, 24.0]);
    /// ```
    pub fn add(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("add", self, other, |x, y| x + y)
    }

    /// Elementwise `self - other` with broadcasting.
    pub fn sub(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("sub", self, other, |x, y| x - y)
    }

    /// Elementwise `self * other` with broadcasting.
    pub fn mul(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("mul", self, other, |x, y| x * y)
    }

    /// Elementwise `self / other` with broadcasting. Division by zero
    /// follows IEEE 754 (`inf` or `NaN`).
    pub fn div(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("div", self, other, |x, y| x / y)
    }

    /// Elementwise maximum with broadcasting.
    pub fn maximum(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("maximum", self, other, f32::max)
    }

    /// Elementwise minimum with broadcasting.
    pub fn minimum(&self, other: &NdArray) -> ArrayResult<NdArray> {
        broadcast_binary("minimum", self, other, f32::min)
    }

    /// Adds `scalar` to every element.
    pub fn add_scalar(&self, scalar: f32) -> NdArray {
        self.map(|x| x + scalar)
    }

    /// Subtracts `scalar` from every element.
    pub fn sub_scalar(&self, scalar: f32) -> NdArray {
        self.map(|x| x - scalar)
    }

    /// Multiplies every element by `scalar`.
    pub fn mul_scalar(&self, scalar: f32) -> NdArray {
        self.map(|x| x * scalar)
    }

    /// Divides every element by `scalar`.
    pub fn div_scalar(&self, scalar: f32) -> NdArray {
        self.map(|x| x / scalar)
    }

    /// Applies `f` to every element, returning a new array of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> NdArray {
        let data = self.as_slice().iter().map(|&x| f(x)).collect();
        NdArray::from_parts(self.shape().clone(), data)
    }

    /// Elementwise negation.
    pub fn neg(&self) -> NdArray {
        self.map(|x| -x)
    }

    /// Elementwise absolute value.
    pub fn abs(&self) -> NdArray {
        self.map(f32::abs)
    }

    /// Elementwise `e^x`.
    pub fn exp(&self) -> NdArray {
        self.map(f32::exp)
    }

    /// Natural logarithm; non-positive inputs yield `-inf` or `NaN`.
    pub fn ln(&self) -> NdArray {
        self.map(f32::ln)
    }

    /// Elementwise square root; negative inputs yield `NaN`.
    pub fn sqrt(&self) -> NdArray {
        self.map(f32::sqrt)
    }

    /// Raises every element to `exponent`.
    pub fn powf(&self, exponent: f32) -> NdArray {
        self.map(|x| x.powf(exponent))
    }
}

impl std::ops::Neg for &NdArray {
    type Output = NdArray;

    fn neg(self) -> NdArray {
        NdArray::neg(self)
    }
}

impl std::ops::Add<f32> for &NdArray {
    type Output = NdArray;

    fn add(self, rhs: f32) -> NdArray {
        self.add_scalar(rhs)
    }
}

impl std::ops::Sub<f32> for &NdArray {
    type Output = NdArray;

    fn sub(self, rhs: f32) -> NdArray {
        self.sub_scalar(rhs)
    }
}

impl std::ops::Mul<f32> for &NdArray {
    type Output = NdArray;

    fn mul(self, rhs: f32) -> NdArray {
        self.mul_scalar(rhs)
    }
}

impl std::ops::Div<f32> for &NdArray {
    type Output = NdArray;

    fn div(self, rhs: f32) -> NdArray {
        self.div_scalar(rhs)
    }
}
