// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::snackbar;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a plain snackbar at the bottom edge.
    ShowBottom,
    /// Show a plain snackbar at the top edge.
    ShowTop,
    /// Show a snackbar with an Undo action.
    ShowUndo,
    /// Show a message long enough to be clamped.
    ShowLong,
    Snackbar(snackbar::Message),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_SNACKBAR_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Subscriber id for the presenter, overriding `[snackbar] id`.
    pub id: Option<String>,
}
