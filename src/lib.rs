// SPDX-License-Identifier: MPL-2.0
//! `iced_snackbar` is a snackbar notification widget for the Iced GUI framework.
//!
//! Any part of an application holding the [`channel::EventBus`] can publish a
//! show request; a mounted [`snackbar::Presenter`] slides the message in from
//! the top or bottom edge, hides it after a while, and lets the user swipe it
//! away or press its action button.

#![doc(html_root_url = "https://docs.rs/iced_snackbar/0.1.0")]

pub mod app;
pub mod channel;
pub mod config;
pub mod error;
pub mod snackbar;
pub mod ui;
