// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Text rendering of arrays.

use crate::config::PrintOptions;
use crate::NdArray;
use std::fmt;

/// Renders an array with explicit [`PrintOptions`].
///
/// Obtained from [`NdArray::display_with`].
pub struct ArrayDisplay<'a> {
    array: &'a NdArray,
    options: &'a PrintOptions,
}

impl NdArray {
    /// Returns a value that formats this array using `options`.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::{NdArray, PrintOptions};
    /// let a = NdArray::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// let opts = PrintOptions { precision: 1, ..Default::default() };
    /// assert_eq!(a.display_with(&opts).to_string(), "[[1.0, 2.0],\n [3.0, 4.0]]");
    /// ```
    pub fn display_with<'a>(&'a self, options: &'a PrintOptions) -> ArrayDisplay<'a> {
        ArrayDisplay {
            array: self,
            options,
        }
    }
}

impl fmt::Display for ArrayDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summarize = self.array.size() > self.options.threshold;
        write_block(
            f,
            self.array.as_slice(),
            self.array.shape().dims(),
            self.options,
            summarize,
            0,
        )
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = PrintOptions::default();
        fmt::Display::fmt(&self.display_with(&options), f)
    }
}

fn write_block(
    f: &mut fmt::Formatter<'_>,
    data: &[f32],
    dims: &[usize],
    opts: &PrintOptions,
    summarize: bool,
    depth: usize,
) -> fmt::Result {
    let Some((&len, rest)) = dims.split_first() else {
        return write!(f, "{:.*}", opts.precision, data[0]);
    };
    let block: usize = rest.iter().product();
    let separator = if rest.is_empty() {
        ", ".to_string()
    } else {
        format!(",\n{}", " ".repeat(depth + 1))
    };

    write!(f, "[")?;
    let elide = summarize && len > 2 * opts.edge_items;
    let mut first = true;
    for i in 0..len {
        if elide && i >= opts.edge_items && i < len - opts.edge_items {
            if i == opts.edge_items {
                write!(f, "{separator}...")?;
            }
            continue;
        }
        if !first {
            write!(f, "{separator}")?;
        }
        first = false;
        write_block(
            f,
            &data[i * block..(i + 1) * block],
            rest,
            opts,
            summarize,
            depth + 1,
        )?;
    }
    write!(f, "]")
}
