// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, loading and saving
//! presenter defaults to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[snackbar]` - Request defaults (position, timing, height, colors) and the
//!   presenter's subscriber id
//! - `[viewport]` - Width used for swipe thresholds before the window reports
//!   its size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_SNACKBAR_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_snackbar::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.snackbar.duration_ms = Some(2500);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::snackbar::{Defaults, Position};
use crate::ui::color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Defaults applied to show requests, and the presenter's identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnackbarConfig {
    /// Subscriber id; the built-in sentinel id when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Edge the snackbar is anchored to.
    #[serde(default = "default_position", skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Visible time before auto-hide (milliseconds).
    #[serde(default = "default_duration_ms", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Slide transition time (milliseconds).
    #[serde(
        default = "default_animation_time_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_time_ms: Option<u64>,

    /// Bar height in pixels.
    #[serde(default = "default_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Message text color, as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    /// Action button color, as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,

    /// Background color, as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            id: None,
            position: default_position(),
            duration_ms: default_duration_ms(),
            animation_time_ms: default_animation_time_ms(),
            height: default_height(),
            text_color: None,
            button_color: None,
            background_color: None,
        }
    }
}

/// Viewport settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Width assumed until the first resize event (pixels).
    #[serde(default = "default_viewport_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub snackbar: SnackbarConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl Config {
    /// Request defaults described by the `[snackbar]` section.
    ///
    /// Unparseable colors are reported and replaced by the built-in palette.
    #[must_use]
    pub fn request_defaults(&self) -> Defaults {
        let section = &self.snackbar;
        let builtin = Defaults::default();

        let color_or = |value: &Option<String>, fallback, key: &str| match value {
            Some(raw) => color::parse_hex(raw).unwrap_or_else(|err| {
                tracing::warn!(%err, key, "invalid color in config; using default");
                fallback
            }),
            None => fallback,
        };

        Defaults {
            position: section.position.unwrap_or(builtin.position),
            duration: section
                .duration_ms
                .map_or(builtin.duration, Duration::from_millis),
            animation_time: section
                .animation_time_ms
                .map_or(builtin.animation_time, Duration::from_millis),
            height: section.height.unwrap_or(builtin.height),
            text_color: color_or(&section.text_color, builtin.text_color, "text_color"),
            button_color: color_or(&section.button_color, builtin.button_color, "button_color"),
            background_color: color_or(
                &section.background_color,
                builtin.background_color,
                "background_color",
            ),
        }
    }

    /// Subscriber id the presenter registers under.
    #[must_use]
    pub fn subscriber_id(&self) -> &str {
        self.snackbar
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SUBSCRIBER_ID)
    }

    /// Viewport width, ignoring non-positive values.
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport
            .width
            .filter(|width| width.is_finite() && *width > 0.0)
            .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_position() -> Option<Position> {
    Some(Position::default())
}

fn default_duration_ms() -> Option<u64> {
    Some(DEFAULT_DURATION_MS)
}

fn default_animation_time_ms() -> Option<u64> {
    Some(DEFAULT_ANIMATION_TIME_MS)
}

fn default_height() -> Option<u32> {
    Some(DEFAULT_HEIGHT)
}

fn default_viewport_width() -> Option<f32> {
    Some(DEFAULT_VIEWPORT_WIDTH)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("failed to load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
