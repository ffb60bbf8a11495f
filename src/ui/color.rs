// SPDX-License-Identifier: MPL-2.0
//! Hex color strings as used in requests and `settings.toml`.

use crate::error::{Error, Result};
use iced::Color;

/// Parses `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
pub fn parse_hex(input: &str) -> Result<Color> {
    let trimmed = input.trim();
    // iced slices the string by byte offsets and accepts a leading `+`.
    if !trimmed
        .trim_start_matches('#')
        .chars()
        .all(|c| c.is_ascii_hexdigit())
    {
        return Err(Error::InvalidColor(input.to_string()));
    }
    trimmed
        .parse::<Color>()
        .map_err(|_| Error::InvalidColor(input.to_string()))
}

/// Parses `input` if present, falling back to `default` when absent or invalid.
pub fn parse_or(input: Option<&str>, default: Color) -> Color {
    match input.map(parse_hex) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            tracing::debug!(%err, "falling back to default color");
            default
        }
        None => default,
    }
}

/// Returns `color` with its alpha multiplied by `opacity`.
#[must_use]
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity.clamp(0.0, 1.0),
        ..color
    }
}
