// SPDX-License-Identifier: MPL-2.0
//! Show requests and their normalization.
//!
//! A [`ShowRequest`] is the loosely-filled payload callers publish. The
//! presenter turns it into a [`NotificationRequest`] with every field resolved,
//! or drops it when it carries no message.

use crate::config::{
    DEFAULT_ANIMATION_TIME_MS, DEFAULT_BACKGROUND_COLOR, DEFAULT_BUTTON_COLOR,
    DEFAULT_DURATION_MS, DEFAULT_HEIGHT, DEFAULT_TEXT_COLOR,
};
use crate::error::Result;
use crate::ui::color;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Unique identifier for a normalized request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Viewport edge the snackbar is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Top,
    #[default]
    Bottom,
}

/// Zero-argument action run when the confirm button is pressed.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A callback that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl Default for Callback {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Raw show request as published on the event bus.
///
/// Every field is optional; unknown keys land in `extra` and are carried
/// through normalization untouched. Colors are hex strings.
///
/// # Example
///
/// ```
/// use iced_snackbar::snackbar::{Position, ShowRequest};
///
/// let request = ShowRequest::new("Message archived")
///     .position(Position::Top)
///     .confirm_text("Undo")
///     .duration_ms(2000);
/// assert_eq!(request.message.as_deref(), Some("Message archived"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowRequest {
    pub message: Option<String>,
    pub text_color: Option<String>,
    pub button_color: Option<String>,
    pub background_color: Option<String>,
    pub position: Option<Position>,
    pub confirm_text: Option<String>,
    pub duration_ms: Option<u64>,
    pub animation_time_ms: Option<u64>,
    pub height: Option<u32>,
    #[serde(skip)]
    pub on_confirm: Option<Callback>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl ShowRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Parses a request from a TOML table. The callback cannot be expressed
    /// in TOML and is left unset.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn animation_time_ms(mut self, animation_time_ms: u64) -> Self {
        self.animation_time_ms = Some(animation_time_ms);
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn text_color(mut self, hex: impl Into<String>) -> Self {
        self.text_color = Some(hex.into());
        self
    }

    #[must_use]
    pub fn button_color(mut self, hex: impl Into<String>) -> Self {
        self.button_color = Some(hex.into());
        self
    }

    #[must_use]
    pub fn background_color(mut self, hex: impl Into<String>) -> Self {
        self.background_color = Some(hex.into());
        self
    }

    #[must_use]
    pub fn on_confirm(mut self, f: impl Fn() + 'static) -> Self {
        self.on_confirm = Some(Callback::new(f));
        self
    }

    /// Attaches an extra field that is passed through to the presenter.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns whether the request carries a message worth showing.
    #[must_use]
    pub fn has_message(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.is_empty())
    }
}

/// Values used for every field a request leaves unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub position: Position,
    pub duration: Duration,
    pub animation_time: Duration,
    pub height: u32,
    pub text_color: Color,
    pub button_color: Color,
    pub background_color: Color,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            position: Position::default(),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            animation_time: Duration::from_millis(DEFAULT_ANIMATION_TIME_MS),
            height: DEFAULT_HEIGHT,
            text_color: DEFAULT_TEXT_COLOR,
            button_color: DEFAULT_BUTTON_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

/// A fully resolved request, ready for the presentation state machine.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    id: NotificationId,
    message: String,
    text_color: Color,
    button_color: Color,
    background_color: Color,
    position: Position,
    confirm_text: Option<String>,
    duration: Duration,
    animation_time: Duration,
    on_confirm: Callback,
    height: u32,
    extra: BTreeMap<String, toml::Value>,
}

impl NotificationRequest {
    /// Resolves `raw` against `defaults`.
    ///
    /// Returns `None` when the message is absent or empty. Unparseable colors
    /// fall back to the default color; an empty confirm text means no button.
    #[must_use]
    pub fn normalize(raw: &ShowRequest, defaults: &Defaults) -> Option<Self> {
        let message = raw.message.as_deref().filter(|m| !m.is_empty())?;

        Some(Self {
            id: NotificationId::new(),
            message: message.to_string(),
            text_color: color::parse_or(raw.text_color.as_deref(), defaults.text_color),
            button_color: color::parse_or(raw.button_color.as_deref(), defaults.button_color),
            background_color: color::parse_or(
                raw.background_color.as_deref(),
                defaults.background_color,
            ),
            position: raw.position.unwrap_or(defaults.position),
            confirm_text: raw.confirm_text.clone().filter(|text| !text.is_empty()),
            duration: raw
                .duration_ms
                .map_or(defaults.duration, Duration::from_millis),
            animation_time: raw
                .animation_time_ms
                .map_or(defaults.animation_time, Duration::from_millis),
            on_confirm: raw.on_confirm.clone().unwrap_or_default(),
            height: raw.height.unwrap_or(defaults.height),
            extra: raw.extra.clone(),
        })
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    #[must_use]
    pub fn button_color(&self) -> Color {
        self.button_color
    }

    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn confirm_text(&self) -> Option<&str> {
        self.confirm_text.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn animation_time(&self) -> Duration {
        self.animation_time
    }

    #[must_use]
    pub fn on_confirm(&self) -> &Callback {
        &self.on_confirm
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fields the request carried beyond the known ones.
    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, toml::Value> {
        &self.extra
    }

    /// Vertical offset of the bar when fully hidden.
    #[must_use]
    pub fn hidden_offset(&self) -> f32 {
        -(self.height as f32)
    }

    /// Upper bound from show to hidden: both slides plus the visible time.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.duration + self.animation_time * 2
    }
}
