// SPDX-License-Identifier: MPL-2.0
//! The mounted snackbar: bus subscription, pointer tracking, frame ticks.
//!
//! A [`Presenter`] listens on [`SHOW_TOPIC`] under its id for as long as it
//! lives. Dropping it removes its own registration (a newer presenter under
//! the same id keeps listening) and freezes the state machine, so nothing
//! scheduled before the drop touches it afterwards.

use super::machine::{Machine, Phase, Snapshot};
use super::request::{Defaults, NotificationRequest, ShowRequest};
use super::swipe::{GestureEvent, Release};
use super::view;
use crate::channel::{EventBus, Registration};
use crate::config::{
    Config, DEFAULT_SUBSCRIBER_ID, DEFAULT_VIEWPORT_WIDTH, FRAME_INTERVAL_MS, SHOW_TOPIC,
};
use iced::{event, mouse, time, window, Element, Event, Point, Size, Subscription};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Source of the current instant.
pub type Clock = Rc<dyn Fn() -> Instant>;

/// Mount-time settings of a presenter.
#[derive(Clone)]
pub struct PresenterOptions {
    pub id: String,
    pub defaults: Defaults,
    pub viewport_width: f32,
    pub clock: Clock,
}

impl PresenterOptions {
    /// Options taken from the `[snackbar]` and `[viewport]` config sections.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            id: config.subscriber_id().to_string(),
            defaults: config.request_defaults(),
            viewport_width: config.viewport_width(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Fn() -> Instant + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }
}

impl Default for PresenterOptions {
    fn default() -> Self {
        Self {
            id: DEFAULT_SUBSCRIBER_ID.to_string(),
            defaults: Defaults::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            clock: Rc::new(Instant::now),
        }
    }
}

impl fmt::Debug for PresenterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterOptions")
            .field("id", &self.id)
            .field("defaults", &self.defaults)
            .field("viewport_width", &self.viewport_width)
            .finish_non_exhaustive()
    }
}

/// Messages the presenter handles.
#[derive(Debug, Clone)]
pub enum Message {
    /// Frame tick while the snackbar is visible.
    Tick(Instant),
    /// The action button was pressed.
    ConfirmPressed,
    /// The left button went down on the bar.
    GestureStarted,
    /// The cursor moved anywhere in the window, visible snackbar or not.
    CursorMoved(Point),
    /// The left button was released anywhere in the window.
    GestureEnded,
    /// The cursor left the window.
    GestureCancelled,
    /// The window was resized.
    ViewportResized(Size),
}

/// Horizontal pointer positions feeding the swipe gesture.
#[derive(Debug, Clone, Copy, Default)]
struct Pointer {
    /// Cursor x when the gesture started.
    origin: Option<f32>,
    cursor: Option<f32>,
}

impl Pointer {
    fn distance(&self) -> Option<f32> {
        Some(self.cursor? - self.origin?)
    }
}

/// A snackbar subscribed to a bus.
pub struct Presenter {
    bus: EventBus<ShowRequest>,
    id: String,
    registration: Registration,
    machine: Rc<RefCell<Machine>>,
    detached: Rc<Cell<bool>>,
    clock: Clock,
    pointer: Pointer,
}

impl Presenter {
    /// Subscribes a new presenter to [`SHOW_TOPIC`] on `bus`.
    ///
    /// A presenter already mounted under the same id stops receiving requests,
    /// and dropping it later leaves this one subscribed.
    pub fn mount(bus: &EventBus<ShowRequest>, options: PresenterOptions) -> Self {
        let PresenterOptions {
            id,
            defaults,
            viewport_width,
            clock,
        } = options;

        let machine = Rc::new(RefCell::new(Machine::new(viewport_width)));
        let detached = machine.borrow().detach_flag();
        let weak = Rc::downgrade(&machine);
        let handler_clock = Rc::clone(&clock);
        let registration = bus.subscribe(SHOW_TOPIC, &id, move |raw: &ShowRequest| {
            receive(&weak, raw, &defaults, handler_clock());
        });

        tracing::debug!(id = %id, "snackbar presenter mounted");
        Self {
            bus: bus.clone(),
            id,
            registration,
            machine,
            detached,
            clock,
            pointer: Pointer::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.borrow().phase()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.machine.borrow().is_visible()
    }

    /// Render state of the current frame, `None` while hidden.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.machine.borrow().snapshot()
    }

    /// Shared handle to the state machine, for listeners and inspection.
    #[must_use]
    pub fn machine(&self) -> Rc<RefCell<Machine>> {
        Rc::clone(&self.machine)
    }

    pub fn update(&mut self, message: Message) {
        let now = (self.clock)();
        match message {
            Message::Tick(_) => self.machine.borrow_mut().tick(now),
            Message::ConfirmPressed => {
                self.confirm();
            }
            Message::GestureStarted => {
                if !self.is_visible() {
                    return;
                }
                // Without a known cursor there is nothing to measure from.
                let Some(origin) = self.pointer.cursor else {
                    tracing::debug!(id = %self.id, "press before any cursor position; ignored");
                    return;
                };
                self.pointer.origin = Some(origin);
                self.machine
                    .borrow_mut()
                    .gesture(GestureEvent::Start, now);
            }
            Message::CursorMoved(position) => {
                self.pointer.cursor = Some(position.x);
                if !self.is_visible() {
                    self.pointer.origin = None;
                    return;
                }
                if let Some(dx) = self.pointer.distance() {
                    self.machine
                        .borrow_mut()
                        .gesture(GestureEvent::Move(dx), now);
                }
            }
            Message::GestureEnded => {
                if let Some(dx) = self.pointer.distance() {
                    self.pointer.origin = None;
                    self.release(GestureEvent::End(dx), now);
                }
            }
            Message::GestureCancelled => {
                self.pointer.cursor = None;
                if self.pointer.origin.take().is_some() {
                    self.release(GestureEvent::Cancel, now);
                }
            }
            Message::ViewportResized(size) => {
                self.machine.borrow_mut().set_viewport_width(size.width);
            }
        }
    }

    /// Runs the confirm action of the request on screen, then slides it out.
    ///
    /// The callback runs without the state machine borrowed, so it may
    /// publish a new request; that request then stays on screen.
    pub fn confirm(&mut self) -> bool {
        let action = self.machine.borrow().confirm_action();
        let Some((id, callback)) = action else {
            return false;
        };
        callback.call();
        let now = (self.clock)();
        let exiting = self.machine.borrow_mut().exit_if_current(id, now);
        if !exiting {
            tracing::debug!("confirm callback replaced the snackbar");
        }
        true
    }

    /// Window and pointer events, plus frame ticks while visible.
    ///
    /// The cursor is tracked while hidden too, so a press on a freshly shown
    /// bar is measured from where the pointer really is.
    pub fn subscription(&self) -> Subscription<Message> {
        let events = Subscription::batch([
            event::listen_with(window_event),
            event::listen_with(pointer_event),
        ]);
        if !self.is_visible() {
            return events;
        }
        Subscription::batch([
            events,
            time::every(Duration::from_millis(FRAME_INTERVAL_MS)).map(Message::Tick),
        ])
    }

    pub fn view(&self) -> Element<'_, Message> {
        let machine = self.machine.borrow();
        view::overlay(machine.snapshot(), machine.viewport_width())
    }

    fn release(&mut self, event: GestureEvent, now: Instant) {
        let release = self.machine.borrow_mut().gesture(event, now);
        if release == Some(Release::Dismiss) {
            tracing::debug!(id = %self.id, "snackbar dismissed by swipe");
        }
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        if !self.bus.cancel(&self.registration) {
            tracing::debug!(id = %self.id, "subscription already taken over");
        }
        // The machine is borrowed when a listener of its own drops us; the
        // flag then freezes it as soon as that call returns.
        self.detached.set(true);
        if let Ok(mut machine) = self.machine.try_borrow_mut() {
            machine.cancel_pending();
        }
        tracing::debug!(id = %self.id, "snackbar presenter unmounted");
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("id", &self.id)
            .field("machine", &self.machine)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

/// Bus handler body: normalize and show.
fn receive(machine: &Weak<RefCell<Machine>>, raw: &ShowRequest, defaults: &Defaults, now: Instant) {
    let Some(machine) = machine.upgrade() else {
        return;
    };
    let Some(request) = NotificationRequest::normalize(raw, defaults) else {
        tracing::debug!("ignoring snackbar request without a message");
        return;
    };
    let result = machine.try_borrow_mut().map(|mut machine| machine.show(request, now));
    if result.is_err() {
        // Published from inside an offset listener; the machine is mid-update.
        tracing::warn!("snackbar busy; request dropped");
    }
}

fn window_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::ViewportResized(size)),
        _ => None,
    }
}

fn pointer_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Mouse(mouse::Event::CursorMoved { position }) => Some(Message::CursorMoved(position)),
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::GestureEnded)
        }
        Event::Mouse(mouse::Event::CursorLeft) => Some(Message::GestureCancelled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snackbar::{show, Position};
    use std::cell::Cell;

    struct Harness {
        bus: EventBus<ShowRequest>,
        now: Rc<Cell<Instant>>,
        t0: Instant,
    }

    impl Harness {
        fn new() -> Self {
            let t0 = Instant::now();
            Self {
                bus: EventBus::new(),
                now: Rc::new(Cell::new(t0)),
                t0,
            }
        }

        fn options(&self) -> PresenterOptions {
            let now = Rc::clone(&self.now);
            PresenterOptions::default().clock(move || now.get())
        }

        fn advance_to(&self, presenter: &mut Presenter, ms: u64) {
            let at = self.t0 + Duration::from_millis(ms);
            self.now.set(at);
            presenter.update(Message::Tick(at));
        }
    }

    #[test]
    fn published_request_is_shown() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());

        assert!(show(&h.bus, ShowRequest::new("Saved").duration_ms(2000)));
        assert_eq!(presenter.phase(), Phase::Entering);

        h.advance_to(&mut presenter, 250);
        assert_eq!(presenter.phase(), Phase::Settled);
        h.advance_to(&mut presenter, 2250);
        assert_eq!(presenter.phase(), Phase::Exiting);
        h.advance_to(&mut presenter, 2500);
        assert_eq!(presenter.phase(), Phase::Hidden);
    }

    #[test]
    fn presenters_with_distinct_ids_both_receive() {
        let h = Harness::new();
        let sidebar = Presenter::mount(&h.bus, h.options().id("sidebar"));
        let main = Presenter::mount(&h.bus, h.options());

        h.bus.publish(SHOW_TOPIC, &ShowRequest::new("Both"));
        assert!(sidebar.is_visible());
        assert!(main.is_visible());
        assert_eq!(h.bus.subscriber_count(SHOW_TOPIC), 2);
    }

    #[test]
    fn drop_unsubscribes() {
        let h = Harness::new();
        let presenter = Presenter::mount(&h.bus, h.options());
        let machine = presenter.machine();
        drop(presenter);

        assert_eq!(h.bus.subscriber_count(SHOW_TOPIC), 0);
        assert_eq!(h.bus.publish(SHOW_TOPIC, &ShowRequest::new("Late")), 0);
        assert_eq!(machine.borrow().phase(), Phase::Hidden);
    }

    #[test]
    fn dropping_a_replaced_presenter_keeps_the_new_one_subscribed() {
        let h = Harness::new();
        let old = Presenter::mount(&h.bus, h.options());
        let new = Presenter::mount(&h.bus, h.options());
        drop(old);

        assert_eq!(h.bus.subscriber_count(SHOW_TOPIC), 1);
        assert!(show(&h.bus, ShowRequest::new("Still listening")));
        assert!(new.is_visible());
    }

    #[test]
    fn unmount_from_an_offset_listener_freezes_the_machine() {
        let h = Harness::new();
        let presenter = Presenter::mount(&h.bus, h.options());
        let machine = presenter.machine();
        let slot = Rc::new(RefCell::new(Some(presenter)));
        let holder = Rc::clone(&slot);
        machine
            .borrow_mut()
            .subscribe_to_offset(Position::Bottom, move |_| {
                holder.borrow_mut().take();
            });

        show(&h.bus, ShowRequest::new("Saved").duration_ms(2000));
        machine.borrow_mut().tick(h.t0 + Duration::from_millis(100));
        assert!(slot.borrow().is_none());
        assert_eq!(h.bus.subscriber_count(SHOW_TOPIC), 0);

        machine.borrow_mut().tick(h.t0 + Duration::from_secs(60));
        assert_eq!(machine.borrow().phase(), Phase::Entering);
        assert!(!machine.borrow().has_pending_timer());
    }

    #[test]
    fn confirm_callback_may_publish_replacement() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        let bus = h.bus.clone();
        show(
            &h.bus,
            ShowRequest::new("Deleted")
                .confirm_text("Undo")
                .on_confirm(move || {
                    show(&bus, ShowRequest::new("Restored").position(Position::Top));
                }),
        );
        h.advance_to(&mut presenter, 300);

        assert!(presenter.confirm());
        assert_eq!(presenter.phase(), Phase::Entering);
        assert_eq!(
            presenter.snapshot().map(|s| s.message),
            Some("Restored".to_string())
        );
    }

    #[test]
    fn pointer_drag_past_half_width_dismisses() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        show(&h.bus, ShowRequest::new("Saved"));
        h.advance_to(&mut presenter, 250);

        presenter.update(Message::CursorMoved(Point::new(100.0, 10.0)));
        presenter.update(Message::GestureStarted);
        presenter.update(Message::CursorMoved(Point::new(200.0, 10.0)));
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(100.0));

        presenter.update(Message::CursorMoved(Point::new(300.0, 10.0)));
        presenter.update(Message::GestureEnded);
        assert_eq!(presenter.phase(), Phase::Hidden);
    }

    #[test]
    fn cursor_moves_without_press_do_not_drag() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        show(&h.bus, ShowRequest::new("Saved"));

        presenter.update(Message::CursorMoved(Point::new(10.0, 0.0)));
        presenter.update(Message::CursorMoved(Point::new(340.0, 0.0)));
        presenter.update(Message::GestureEnded);
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(0.0));
        assert!(presenter.is_visible());
    }

    #[test]
    fn press_before_any_cursor_position_is_ignored() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        show(&h.bus, ShowRequest::new("Saved").duration_ms(10_000));
        h.advance_to(&mut presenter, 250);

        presenter.update(Message::GestureStarted);
        presenter.update(Message::CursorMoved(Point::new(250.0, 0.0)));
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(0.0));

        presenter.update(Message::GestureEnded);
        assert_eq!(presenter.phase(), Phase::Settled);
    }

    #[test]
    fn cursor_tracked_while_hidden_anchors_the_next_press() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        show(&h.bus, ShowRequest::new("One").duration_ms(500));
        presenter.update(Message::CursorMoved(Point::new(10.0, 0.0)));
        h.advance_to(&mut presenter, 250);
        h.advance_to(&mut presenter, 750);
        h.advance_to(&mut presenter, 1000);
        assert_eq!(presenter.phase(), Phase::Hidden);

        presenter.update(Message::CursorMoved(Point::new(300.0, 0.0)));
        show(&h.bus, ShowRequest::new("Two").duration_ms(10_000));
        h.advance_to(&mut presenter, 1250);

        presenter.update(Message::GestureStarted);
        presenter.update(Message::CursorMoved(Point::new(305.0, 0.0)));
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(5.0));

        presenter.update(Message::GestureEnded);
        h.advance_to(&mut presenter, 4000);
        assert_eq!(presenter.phase(), Phase::Settled);
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(0.0));
    }

    #[test]
    fn cursor_leaving_window_resolves_the_drag() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        show(&h.bus, ShowRequest::new("Saved").duration_ms(10_000));
        h.advance_to(&mut presenter, 250);

        presenter.update(Message::CursorMoved(Point::new(50.0, 0.0)));
        presenter.update(Message::GestureStarted);
        presenter.update(Message::CursorMoved(Point::new(80.0, 0.0)));
        presenter.update(Message::GestureCancelled);

        h.advance_to(&mut presenter, 3000);
        assert_eq!(presenter.phase(), Phase::Settled);
        assert_eq!(presenter.snapshot().map(|s| s.drag_offset), Some(0.0));
    }

    #[test]
    fn resize_changes_swipe_threshold() {
        let h = Harness::new();
        let mut presenter = Presenter::mount(&h.bus, h.options());
        presenter.update(Message::ViewportResized(Size::new(1200.0, 800.0)));
        show(&h.bus, ShowRequest::new("Saved"));
        h.advance_to(&mut presenter, 250);

        presenter.update(Message::CursorMoved(Point::new(0.0, 0.0)));
        presenter.update(Message::GestureStarted);
        presenter.update(Message::CursorMoved(Point::new(400.0, 0.0)));
        presenter.update(Message::GestureEnded);
        assert!(presenter.is_visible());
    }

    #[test]
    fn options_from_config_use_sections() {
        let mut config = Config::default();
        config.snackbar.id = Some("editor".to_string());
        config.snackbar.position = Some(Position::Top);
        config.viewport.width = Some(800.0);

        let options = PresenterOptions::from_config(&config);
        assert_eq!(options.id, "editor");
        assert_eq!(options.defaults.position, Position::Top);
        assert_eq!(options.viewport_width, 800.0);
    }
}
