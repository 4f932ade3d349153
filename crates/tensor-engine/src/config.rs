// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! [print]
//! precision = 4
//! edge_items = 3
//! threshold = 1000
//!
//! [tolerance]
//! abs = 1e-5
//! rel = 1e-4
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::{ArrayError, ArrayResult};
use std::path::Path;

/// Upper bound on printed decimal places; `f32` carries fewer than this.
const MAX_PRECISION: usize = 16;

/// Top-level configuration for array formatting and comparison.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// How arrays are rendered by `Display`.
    pub print: PrintOptions,
    /// Tolerances used by [`crate::NdArray::all_close`].
    pub tolerance: Tolerance,
}

/// Controls how an [`crate::NdArray`] is rendered as text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Number of leading and trailing entries kept per axis when summarising.
    pub edge_items: usize,
    /// Arrays with more elements than this are summarised with `...`.
    pub threshold: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            edge_items: 3,
            threshold: 1000,
        }
    }
}

/// Absolute and relative tolerance for approximate comparison.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub abs: f32,
    pub rel: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 1e-5,
            rel: 1e-4,
        }
    }
}

impl ArrayConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> ArrayResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ArrayError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> ArrayResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ArrayError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        tracing::debug!(?config, "array config loaded");
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> ArrayResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ArrayError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> ArrayResult<()> {
        if self.print.precision > MAX_PRECISION {
            return Err(ArrayError::Config(format!(
                "print.precision must be at most {MAX_PRECISION}, got {}",
                self.print.precision
            )));
        }
        if self.print.edge_items == 0 {
            return Err(ArrayError::Config(
                "print.edge_items must be at least 1".to_string(),
            ));
        }
        let Tolerance { abs, rel } = self.tolerance;
        if !(abs >= 0.0 && rel >= 0.0) {
            return Err(ArrayError::Config(format!(
                "tolerances must be non-negative, got abs={abs} rel={rel}"
            )));
        }
        Ok(())
    }
}
