// SPDX-License-Identifier: MPL-2.0
//! Snackbar notifications.
//!
//! A snackbar is a single bar anchored to the top or bottom edge of the
//! window. It slides in, stays for a configurable time, and slides out. It
//! may carry one action button and can be swiped away horizontally.
//!
//! # Components
//!
//! - [`request`] - Raw show requests and their normalization
//! - [`animation`] - Tick-driven animated scalars
//! - [`swipe`] - Swipe gesture reducer and opacity mapping
//! - [`machine`] - Presentation state machine
//! - [`presenter`] - Bus subscription and iced plumbing around the machine
//! - [`view`] - Rendering
//!
//! # Usage
//!
//! ```ignore
//! use iced_snackbar::channel::EventBus;
//! use iced_snackbar::snackbar::{self, Presenter, PresenterOptions, ShowRequest};
//!
//! let bus = EventBus::new();
//! let presenter = Presenter::mount(&bus, PresenterOptions::default());
//!
//! // Anywhere holding the bus:
//! snackbar::show(&bus, ShowRequest::new("Saved").duration_ms(2000));
//!
//! // In the application's view:
//! let overlay = presenter.view().map(Message::Snackbar);
//! ```

pub mod animation;
pub mod machine;
pub mod presenter;
pub mod request;
pub mod swipe;
mod view;

pub use animation::{AnimatedValue, Easing, ListenerId};
pub use machine::{Machine, Phase, Snapshot};
pub use presenter::{Clock, Message, Presenter, PresenterOptions};
pub use request::{Callback, Defaults, NotificationId, NotificationRequest, Position, ShowRequest};
pub use swipe::{GestureEvent, Release};

use crate::channel::EventBus;
use crate::config::SHOW_TOPIC;

/// Publishes `request` to every mounted presenter.
///
/// Requests without a message are dropped here. Returns whether at least one
/// presenter received the request.
pub fn show(bus: &EventBus<ShowRequest>, request: ShowRequest) -> bool {
    if !request.has_message() {
        tracing::debug!("not publishing snackbar request without a message");
        return false;
    }
    bus.publish(SHOW_TOPIC, &request) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn show_skips_empty_messages() {
        let bus = EventBus::new();
        let received = Rc::new(Cell::new(0));
        let sink = Rc::clone(&received);
        bus.subscribe(SHOW_TOPIC, "counter", move |_: &ShowRequest| {
            sink.set(sink.get() + 1)
        });

        assert!(!show(&bus, ShowRequest::new("")));
        assert!(!show(&bus, ShowRequest::default()));
        assert!(show(&bus, ShowRequest::new("Saved")));
        assert_eq!(received.get(), 1);
    }

    #[test]
    fn show_without_presenter_reports_no_delivery() {
        let bus = EventBus::new();
        assert!(!show(&bus, ShowRequest::new("Saved")));
    }
}
