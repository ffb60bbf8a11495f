// SPDX-License-Identifier: MPL-2.0
//! Presentation state machine.
//!
//! Owns everything that changes while a snackbar is on screen: the phase,
//! the current request, the two vertical slide offsets (one per anchor edge),
//! the horizontal swipe offset, and the single pending timer.
//!
//! ```text
//! Hidden --show--> Entering --slide done--> Settled --timer--> Exiting --slide done--> Hidden
//!                     ^                        |  confirm ------^
//!                     +------- show (any visible phase pre-empts) ----+
//! ```
//!
//! Time is always passed in, so the machine never reads a clock itself.
//! Deadlines are chained from scheduled instants rather than from the tick
//! that observed them, which keeps the total lifetime independent of the
//! frame rate.

use super::animation::{AnimatedValue, Easing, ListenerId};
use super::request::{Callback, NotificationId, NotificationRequest, Position};
use super::swipe::{self, GestureEvent, Release, SwipeState};
use crate::config::DEFAULT_HEIGHT;
use iced::Color;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Lifecycle phase of the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Hidden,
    /// Sliding in from the anchor edge.
    Entering,
    /// Fully shown, waiting for the auto-hide timer.
    Settled,
    /// Sliding back out.
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Ends `Settled`.
    AutoHide,
    /// Forces `Hidden` if the exit slide has not completed by then.
    HideFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    kind: TimerKind,
    deadline: Instant,
}

/// Everything a renderer needs to draw the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub message: String,
    /// Upper-cased confirm label; `None` when no button is shown.
    pub confirm_label: Option<String>,
    pub position: Position,
    /// Vertical offset from the anchor edge: `-height` hidden, `0` shown.
    pub offset: f32,
    pub drag_offset: f32,
    pub opacity: f32,
    pub height: u32,
    pub text_color: Color,
    pub button_color: Color,
    pub background_color: Color,
}

/// The snackbar presentation state.
#[derive(Debug)]
pub struct Machine {
    phase: Phase,
    current: Option<NotificationRequest>,
    top: AnimatedValue,
    bottom: AnimatedValue,
    drag: AnimatedValue,
    swipe: SwipeState,
    pending_timer: Option<Timer>,
    shown_at: Option<Instant>,
    viewport_width: f32,
    /// Set once the owner is gone; the next tick cancels everything pending.
    detached: Rc<Cell<bool>>,
}

impl Machine {
    #[must_use]
    pub fn new(viewport_width: f32) -> Self {
        let hidden = -(DEFAULT_HEIGHT as f32);
        Self {
            phase: Phase::Hidden,
            current: None,
            top: AnimatedValue::new(hidden),
            bottom: AnimatedValue::new(hidden),
            drag: AnimatedValue::new(0.0),
            swipe: SwipeState::default(),
            pending_timer: None,
            shown_at: None,
            viewport_width,
            detached: Rc::new(Cell::new(false)),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    #[must_use]
    pub fn current(&self) -> Option<&NotificationRequest> {
        self.current.as_ref()
    }

    /// Vertical offset of the bar anchored at `position`.
    #[must_use]
    pub fn offset(&self, position: Position) -> f32 {
        self.axis(position).get()
    }

    #[must_use]
    pub fn drag_offset(&self) -> f32 {
        self.drag.get()
    }

    /// Opacity derived from the horizontal swipe offset.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        swipe::opacity(self.drag.get(), self.viewport_width)
    }

    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if width.is_finite() && width >= 0.0 {
            self.viewport_width = width;
        }
    }

    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.pending_timer.is_some()
    }

    /// When the pending timer fires, if one is armed.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending_timer.map(|timer| timer.deadline)
    }

    /// Observes the vertical offset of the bar anchored at `position`.
    pub fn subscribe_to_offset(
        &mut self,
        position: Position,
        listener: impl FnMut(f32) + 'static,
    ) -> ListenerId {
        self.axis_mut(position).subscribe_to_changes(listener)
    }

    /// Observes the horizontal swipe offset.
    pub fn subscribe_to_drag(&mut self, listener: impl FnMut(f32) + 'static) -> ListenerId {
        self.drag.subscribe_to_changes(listener)
    }

    /// Flag that, once set, makes the next [`tick`](Self::tick) behave like
    /// [`cancel_pending`](Self::cancel_pending). Lets an owner that cannot
    /// borrow the machine right now freeze it anyway.
    #[must_use]
    pub fn detach_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.detached)
    }

    /// Starts showing `request`, abandoning whatever was on screen.
    pub fn show(&mut self, request: NotificationRequest, now: Instant) {
        if let Some(previous) = &self.current {
            tracing::debug!(
                previous = ?previous.id(),
                phase = ?self.phase,
                "pre-empting snackbar"
            );
        }

        self.pending_timer = None;
        let hidden = request.hidden_offset();
        self.top.set(hidden);
        self.bottom.set(hidden);
        self.reset_drag();

        let animation_time = request.animation_time();
        self.axis_mut(request.position())
            .animate_to(0.0, animation_time, Easing::EaseInOut, now);

        tracing::debug!(id = ?request.id(), position = ?request.position(), "snackbar entering");
        self.current = Some(request);
        self.shown_at = Some(now);
        self.phase = Phase::Entering;
    }

    /// Advances animations and timers to `now`, running every transition
    /// that became due since the previous tick.
    pub fn tick(&mut self, now: Instant) {
        if self.detached.get() {
            self.cancel_pending();
            return;
        }
        self.drag.tick(now);

        loop {
            let Some(position) = self.current.as_ref().map(NotificationRequest::position) else {
                return;
            };

            match self.phase {
                Phase::Hidden => return,
                Phase::Entering => match self.axis_mut(position).tick(now) {
                    Some(done) => self.settle(done),
                    None => return,
                },
                Phase::Settled => match self.pending_timer {
                    Some(timer) if timer.kind == TimerKind::AutoHide && timer.deadline <= now => {
                        self.begin_exit(timer.deadline);
                    }
                    _ => return,
                },
                Phase::Exiting => {
                    let slid_out = self.axis_mut(position).tick(now).is_some();
                    let timed_out = self
                        .pending_timer
                        .is_some_and(|timer| timer.deadline <= now);
                    if slid_out || timed_out {
                        self.finish();
                    }
                    return;
                }
            }
        }
    }

    /// The confirm callback and the request it belongs to, while the confirm
    /// action is accepted (entering or settled).
    #[must_use]
    pub fn confirm_action(&self) -> Option<(NotificationId, Callback)> {
        match self.phase {
            Phase::Entering | Phase::Settled => self
                .current
                .as_ref()
                .map(|request| (request.id(), request.on_confirm().clone())),
            Phase::Hidden | Phase::Exiting => None,
        }
    }

    /// Starts the exit slide if `id` is still the request on screen.
    ///
    /// Returns `false` when the request was replaced or is already leaving.
    pub fn exit_if_current(&mut self, id: NotificationId, now: Instant) -> bool {
        let is_current = self.current.as_ref().is_some_and(|r| r.id() == id);
        if !is_current || !matches!(self.phase, Phase::Entering | Phase::Settled) {
            return false;
        }
        self.begin_exit(now);
        true
    }

    /// Runs the confirm callback, then starts the exit slide.
    ///
    /// Returns `false` (and runs nothing) outside the entering/settled phases.
    pub fn confirm(&mut self, now: Instant) -> bool {
        let Some((id, callback)) = self.confirm_action() else {
            return false;
        };
        callback.call();
        self.exit_if_current(id, now)
    }

    /// Feeds a swipe gesture event.
    ///
    /// Ignored while hidden. Crossing the threshold on release hides the
    /// snackbar at once; otherwise the offset springs back to zero.
    pub fn gesture(&mut self, event: GestureEvent, now: Instant) -> Option<Release> {
        if !self.is_visible() {
            return None;
        }

        if event == GestureEvent::Start {
            self.drag.stop();
            self.swipe = SwipeState::at(self.drag.get());
        }

        let (swipe, release) = swipe::reduce(self.swipe, event, self.viewport_width);
        self.swipe = swipe;
        self.drag.set(swipe.offset());

        match release {
            Some(Release::SnapBack) => self.drag.spring_to(0.0, now),
            Some(Release::Dismiss) => {
                tracing::debug!(offset = swipe.offset(), "snackbar swiped away");
                self.finish();
            }
            None => {}
        }
        release
    }

    /// Disarms the pending timer and freezes every animation.
    ///
    /// Used on teardown: no later tick changes anything.
    pub fn cancel_pending(&mut self) {
        self.pending_timer = None;
        self.top.stop();
        self.bottom.stop();
        self.drag.stop();
    }

    /// Render state for the current frame, `None` while hidden.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        if !self.is_visible() {
            return None;
        }
        let request = self.current.as_ref()?;
        Some(Snapshot {
            message: request.message().to_string(),
            confirm_label: request.confirm_text().map(str::to_uppercase),
            position: request.position(),
            offset: self.offset(request.position()),
            drag_offset: self.drag.get(),
            opacity: self.opacity(),
            height: request.height(),
            text_color: request.text_color(),
            button_color: request.button_color(),
            background_color: request.background_color(),
        })
    }

    fn settle(&mut self, at: Instant) {
        let Some(request) = &self.current else {
            return;
        };
        self.pending_timer = Some(Timer {
            kind: TimerKind::AutoHide,
            deadline: at + request.duration(),
        });
        self.phase = Phase::Settled;
    }

    fn begin_exit(&mut self, at: Instant) {
        let Some(request) = &self.current else {
            return;
        };
        let id = request.id();
        let position = request.position();
        let hidden = request.hidden_offset();
        let animation_time = request.animation_time();
        let deadline = self
            .shown_at
            .map_or(at + animation_time, |shown| shown + request.lifetime())
            .max(at + animation_time);

        self.pending_timer = Some(Timer {
            kind: TimerKind::HideFallback,
            deadline,
        });
        self.axis_mut(position)
            .animate_to(hidden, animation_time, Easing::EaseInOut, at);

        tracing::debug!(?id, "snackbar exiting");
        self.phase = Phase::Exiting;
    }

    fn finish(&mut self) {
        let hidden = self
            .current
            .take()
            .map_or(-(DEFAULT_HEIGHT as f32), |request| request.hidden_offset());
        self.top.set(hidden);
        self.bottom.set(hidden);
        self.reset_drag();
        self.pending_timer = None;
        self.shown_at = None;
        self.phase = Phase::Hidden;
        tracing::debug!("snackbar hidden");
    }

    fn reset_drag(&mut self) {
        self.drag.set(0.0);
        self.swipe = SwipeState::default();
    }

    fn axis(&self, position: Position) -> &AnimatedValue {
        match position {
            Position::Top => &self.top,
            Position::Bottom => &self.bottom,
        }
    }

    fn axis_mut(&mut self, position: Position) -> &mut AnimatedValue {
        match position {
            Position::Top => &mut self.top,
            Position::Bottom => &mut self.bottom,
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_VIEWPORT_WIDTH)
    }
}
