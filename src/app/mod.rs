// SPDX-License-Identifier: MPL-2.0
//! Demo application hosting a snackbar presenter.
//!
//! The window holds a few buttons that publish show requests on the bus; the
//! presenter is layered over them and receives those requests like any other
//! subscriber would.

mod message;

pub use message::{Flags, Message};

use crate::channel::EventBus;
use crate::config::{self, paths, Config};
use crate::snackbar::{self, Position, Presenter, PresenterOptions, ShowRequest};
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{button, Column, Container, Stack, Text};
use iced::{alignment, window, Element, Length, Subscription, Task, Theme};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

pub const WINDOW_DEFAULT_HEIGHT: f32 = 640.0;
pub const MIN_WINDOW_WIDTH: f32 = 280.0;
pub const MIN_WINDOW_HEIGHT: f32 = 320.0;

const LONG_MESSAGE: &str = "The connection was interrupted while uploading your files. \
    Everything sent so far has been kept and the rest will be retried automatically \
    once the network is back.";

/// Root Iced application state.
pub struct App {
    bus: EventBus<ShowRequest>,
    snackbar: Presenter,
    /// How many times an Undo action has run.
    undo_count: Rc<Cell<u32>>,
    /// Requests published so far, used to number the demo messages.
    sent: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("snackbar", &self.snackbar.id())
            .field("undo_count", &self.undo_count.get())
            .field("sent", &self.sent)
            .finish()
    }
}

/// Builds the window settings, sized to the configured viewport width.
pub fn window_settings(config: &Config) -> window::Settings {
    window::Settings {
        size: iced::Size::new(config.viewport_width(), WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    paths::init_cli_override(flags.config_dir.clone());
    let (config, config_warning) = config::load();
    if let Some(warning) = &config_warning {
        tracing::warn!(%warning, "using default settings");
    }
    let settings = window_settings(&config);

    // iced 0.14 requires a `Fn` boot; the state is consumed on the first call.
    let boot_state = RefCell::new(Some((flags, config, config_warning)));
    let boot = move || {
        let (flags, config, warning) = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags, &config, warning)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(settings)
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Mounts the presenter and, when the settings file was unusable, says so
    /// in the first snackbar.
    fn new(flags: Flags, config: &Config, config_warning: Option<String>) -> (Self, Task<Message>) {
        let bus = EventBus::new();
        let mut options = PresenterOptions::from_config(config);
        if let Some(id) = flags.id.filter(|id| !id.is_empty()) {
            options = options.id(id);
        }
        let snackbar = Presenter::mount(&bus, options);

        if config_warning.is_some() {
            snackbar::show(
                &bus,
                ShowRequest::new("Settings could not be read; defaults are in use."),
            );
        }

        let app = App {
            bus,
            snackbar,
            undo_count: Rc::new(Cell::new(0)),
            sent: 0,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("Snackbar")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        self.snackbar.subscription().map(Message::Snackbar)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let request = match message {
            Message::Snackbar(message) => {
                self.snackbar.update(message);
                return Task::none();
            }
            Message::ShowBottom => {
                ShowRequest::new(format!("Draft #{} saved", self.sent + 1)).duration_ms(2000)
            }
            Message::ShowTop => ShowRequest::new("Back online")
                .position(Position::Top)
                .background_color("#2E7D32"),
            Message::ShowUndo => {
                let undo_count = Rc::clone(&self.undo_count);
                ShowRequest::new("Conversation archived")
                    .confirm_text("Undo")
                    .on_confirm(move || undo_count.set(undo_count.get() + 1))
            }
            Message::ShowLong => ShowRequest::new(LONG_MESSAGE).confirm_text("Retry"),
        };

        if snackbar::show(&self.bus, request) {
            self.sent += 1;
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let demo_button = |label: &'static str, message: Message| {
            button(Text::new(label).size(typography::BODY))
                .on_press(message)
                .padding([spacing::XS, spacing::MD])
        };

        let controls = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new("Snackbar demo").size(typography::TITLE_MD))
            .push(demo_button("Show at bottom", Message::ShowBottom))
            .push(demo_button("Show at top", Message::ShowTop))
            .push(demo_button("Show with Undo", Message::ShowUndo))
            .push(demo_button("Show long message", Message::ShowLong))
            .push(
                Text::new(format!("Undo pressed {} times", self.undo_count.get()))
                    .size(typography::BODY),
            );

        let content = Container::new(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .padding(spacing::LG);

        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(content)
            .push(self.snackbar.view().map(Message::Snackbar))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snackbar::Phase;

    fn app() -> App {
        App::new(Flags::default(), &Config::default(), None).0
    }

    #[test]
    fn buttons_publish_to_the_presenter() {
        let mut app = app();
        let _ = app.update(Message::ShowBottom);
        assert_eq!(app.snackbar.phase(), Phase::Entering);
        assert_eq!(
            app.snackbar.snapshot().map(|s| s.message),
            Some("Draft #1 saved".to_string())
        );
        assert_eq!(app.sent, 1);
    }

    #[test]
    fn undo_action_runs_the_callback() {
        let mut app = app();
        let _ = app.update(Message::ShowUndo);
        let _ = app.update(Message::Snackbar(snackbar::Message::ConfirmPressed));
        assert_eq!(app.undo_count.get(), 1);
        assert_eq!(app.snackbar.phase(), Phase::Exiting);
    }

    #[test]
    fn config_warning_is_shown_on_start() {
        let (app, _) = App::new(
            Flags::default(),
            &Config::default(),
            Some("broken".to_string()),
        );
        assert!(app.snackbar.is_visible());
    }

    #[test]
    fn flag_id_overrides_config_id() {
        let mut config = Config::default();
        config.snackbar.id = Some("from-config".to_string());
        let flags = Flags {
            id: Some("from-flags".to_string()),
            ..Flags::default()
        };
        let (app, _) = App::new(flags, &config, None);
        assert_eq!(app.snackbar.id(), "from-flags");
    }

    #[test]
    fn window_width_follows_config() {
        let mut config = Config::default();
        config.viewport.width = Some(500.0);
        assert_eq!(window_settings(&config).size.width, 500.0);
    }
}
