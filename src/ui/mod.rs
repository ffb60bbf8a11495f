// SPDX-License-Identifier: MPL-2.0
//! Shared visual helpers.
//!
//! - [`color`] - Hex color parsing and opacity blending
//! - [`design_tokens`] - Design system constants (colors, spacing, typography)

pub mod color;
pub mod design_tokens;
