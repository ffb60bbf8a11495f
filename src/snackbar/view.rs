// SPDX-License-Identifier: MPL-2.0
//! Snackbar rendering.
//!
//! The bar is laid out full-width against its anchor edge and drawn through a
//! [`float`] translation: the vertical slide moves it past that edge and the
//! swipe moves it sideways, so the layout never changes while it animates.
//! Every color is faded with the swipe opacity.

use super::machine::Snapshot;
use super::presenter::Message;
use super::request::Position;
use crate::config::{MAX_RENDER_HEIGHT, MESSAGE_MAX_LINES};
use crate::ui::color::with_opacity;
use crate::ui::design_tokens::{opacity, shadow, spacing, typography};
use iced::widget::{button, container, float, mouse_area, text, Container, Row, Text};
use iced::{
    alignment, Background, Border, Color, Element, Length, Padding, Shadow, Theme, Vector,
};
use std::borrow::Cow;

/// Portion of the row taken by the message; the button gets the rest.
const MESSAGE_PORTION: u16 = 10;
const BUTTON_PORTION: u16 = 2;

/// Renders the snackbar overlay, or an empty placeholder while hidden.
pub(super) fn overlay<'a>(snapshot: Option<Snapshot>, viewport_width: f32) -> Element<'a, Message> {
    let Some(snapshot) = snapshot else {
        return Container::new(text(""))
            .width(Length::Shrink)
            .height(Length::Shrink)
            .into();
    };

    let height = render_height(&snapshot);
    let shift = translation(&snapshot, height);
    let anchor = match snapshot.position {
        Position::Top => alignment::Vertical::Top,
        Position::Bottom => alignment::Vertical::Bottom,
    };

    let gesture_area = mouse_area(bar(&snapshot, height, viewport_width))
        .on_press(Message::GestureStarted);
    let moving = float(gesture_area).translate(move |_bounds, _viewport| shift);

    Container::new(moving)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(anchor)
        .into()
}

fn render_height(snapshot: &Snapshot) -> f32 {
    (snapshot.height as f32).min(MAX_RENDER_HEIGHT)
}

/// Displacement of the bar from its resting place.
///
/// A hidden offset of `-height` puts the bar just past its anchor edge:
/// below the window for [`Position::Bottom`], above it for [`Position::Top`].
fn translation(snapshot: &Snapshot, height: f32) -> Vector {
    let slide = snapshot.offset.clamp(-height, 0.0);
    let y = match snapshot.position {
        Position::Top => slide,
        Position::Bottom => -slide,
    };
    Vector::new(snapshot.drag_offset, y)
}

fn bar<'a>(snapshot: &Snapshot, height: f32, viewport_width: f32) -> Element<'a, Message> {
    let fade = snapshot.opacity;
    let text_color = with_opacity(snapshot.text_color, fade);
    let button_color = with_opacity(snapshot.button_color, fade);
    let background = with_opacity(snapshot.background_color, fade);

    let has_button = snapshot.confirm_label.is_some();
    let max_chars = message_capacity(viewport_width, has_button);
    let message = Text::new(ellipsize(&snapshot.message, max_chars).into_owned())
        .size(typography::BODY)
        .color(text_color)
        .wrapping(text::Wrapping::Word);

    let mut row = Row::new().align_y(alignment::Vertical::Center).push(
        Container::new(message)
            .width(Length::FillPortion(MESSAGE_PORTION))
            .padding([14.0, 0.0]),
    );

    if let Some(label) = &snapshot.confirm_label {
        let action = button(Text::new(label.clone()).size(typography::BODY))
            .on_press(Message::ConfirmPressed)
            .padding(Padding::ZERO)
            .style(move |_theme: &Theme, status| action_button_style(status, button_color));

        row = row.push(
            Container::new(action)
                .width(Length::FillPortion(BUTTON_PORTION))
                .padding(Padding {
                    top: 0.0,
                    right: 0.0,
                    bottom: 0.0,
                    left: spacing::LG,
                }),
        );
    }

    let bar_shadow = Shadow {
        color: with_opacity(shadow::SNACKBAR.color, fade),
        ..shadow::SNACKBAR
    };

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .padding([0.0, spacing::LG])
        .align_y(alignment::Vertical::Center)
        .clip(true)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(background)),
            shadow: bar_shadow,
            text_color: Some(text_color),
            ..Default::default()
        })
        .into()
}

/// Transparent button showing only its colored label.
fn action_button_style(status: button::Status, color: Color) -> button::Style {
    let text_color = match status {
        button::Status::Pressed => with_opacity(color, opacity::PRESSED),
        _ => color,
    };
    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Characters that fit in [`MESSAGE_MAX_LINES`] lines of body text.
///
/// Glyph advance is estimated, so this is an approximation of the real
/// layout.
fn message_capacity(viewport_width: f32, has_button: bool) -> usize {
    let row = (viewport_width - 2.0 * spacing::LG).max(0.0);
    let portions = if has_button {
        MESSAGE_PORTION + BUTTON_PORTION
    } else {
        MESSAGE_PORTION
    };
    let line = row * f32::from(MESSAGE_PORTION) / f32::from(portions);
    let per_line = (line / (typography::BODY * typography::GLYPH_WIDTH_RATIO)).floor() as usize;
    per_line.max(1) * MESSAGE_MAX_LINES
}

/// Truncates `message` to `max_chars` characters, ending in an ellipsis.
fn ellipsize(message: &str, max_chars: usize) -> Cow<'_, str> {
    if message.chars().count() <= max_chars {
        return Cow::Borrowed(message);
    }
    let kept: String = message
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect();
    Cow::Owned(format!("{}…", kept.trim_end()))
}
