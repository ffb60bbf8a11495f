// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Channel**: Topic name and default subscriber id
//! - **Timing**: Visible duration and slide animation time
//! - **Layout**: Bar height and viewport width
//! - **Palette**: Default snackbar colors
//! - **Spring**: Snap-back physics

use iced::Color;

// ==========================================================================
// Channel Defaults
// ==========================================================================

/// Topic under which show requests are published.
pub const SHOW_TOPIC: &str = "showSnackBar";

/// Subscriber id used by presenters mounted without an explicit id.
pub const DEFAULT_SUBSCRIBER_ID: &str = "123456789";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Time a snackbar stays settled before the exit slide starts (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Duration of each slide transition (in milliseconds).
pub const DEFAULT_ANIMATION_TIME_MS: u64 = 250;

/// Interval between animation frame ticks while a snackbar is visible.
pub const FRAME_INTERVAL_MS: u64 = 16;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Default bar height in pixels; also the hidden resting offset.
pub const DEFAULT_HEIGHT: u32 = 48;

/// Rendered bar height never exceeds this, whatever the requested height.
pub const MAX_RENDER_HEIGHT: f32 = 80.0;

/// Swipe width used until the first window resize event arrives.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 360.0;

/// Lines of message text shown before the message is ellipsized.
pub const MESSAGE_MAX_LINES: usize = 2;

// ==========================================================================
// Palette Defaults
// ==========================================================================

/// Message text color (`#FFFFFF`).
pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;

/// Action button label color (`#03A9F4`).
pub const DEFAULT_BUTTON_COLOR: Color = Color::from_rgb(0.012, 0.663, 0.957);

/// Bar background color (`#323232`).
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::from_rgb(0.196, 0.196, 0.196);

// ==========================================================================
// Spring Defaults
// ==========================================================================

/// Spring stiffness for the swipe snap-back.
pub const SPRING_STIFFNESS: f32 = 230.2;

/// Spring damping for the swipe snap-back.
pub const SPRING_DAMPING: f32 = 22.0;

/// Spring mass for the swipe snap-back.
pub const SPRING_MASS: f32 = 1.0;

/// Below this distance from the target (and speed), the spring is at rest.
pub const SPRING_REST_THRESHOLD: f32 = 0.001;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_HEIGHT > 0);
    assert!(DEFAULT_HEIGHT as f32 <= MAX_RENDER_HEIGHT);
    assert!(DEFAULT_VIEWPORT_WIDTH > 0.0);
    assert!(FRAME_INTERVAL_MS > 0);
    assert!(DEFAULT_ANIMATION_TIME_MS < DEFAULT_DURATION_MS);
    assert!(SPRING_MASS > 0.0);
    assert!(SPRING_STIFFNESS > 0.0);
    assert!(SPRING_DAMPING > 0.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults_are_valid() {
        assert_eq!(DEFAULT_DURATION_MS, 4000);
        assert_eq!(DEFAULT_ANIMATION_TIME_MS, 250);
    }

    #[test]
    fn layout_defaults_are_valid() {
        assert_eq!(DEFAULT_HEIGHT, 48);
        assert!(DEFAULT_HEIGHT as f32 <= MAX_RENDER_HEIGHT);
    }

    #[test]
    fn palette_colors_are_distinct() {
        assert_ne!(DEFAULT_TEXT_COLOR, DEFAULT_BUTTON_COLOR);
        assert_ne!(DEFAULT_TEXT_COLOR, DEFAULT_BACKGROUND_COLOR);
        assert_ne!(DEFAULT_BUTTON_COLOR, DEFAULT_BACKGROUND_COLOR);
    }

    #[test]
    fn spring_is_underdamped_enough_to_settle() {
        // Critical damping is 2 * sqrt(k * m); the snap-back stays below it.
        let critical = 2.0 * (SPRING_STIFFNESS * SPRING_MASS).sqrt();
        assert!(SPRING_DAMPING < critical);
    }
}
