// SPDX-License-Identifier: MPL-2.0
use iced_snackbar::channel::EventBus;
use iced_snackbar::config::{self, Config, SHOW_TOPIC};
use iced_snackbar::snackbar::{
    self, Message, Phase, Position, Presenter, PresenterOptions, ShowRequest,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

/// A bus, a controllable clock, and a mounted presenter.
struct Fixture {
    bus: EventBus<ShowRequest>,
    now: Rc<Cell<Instant>>,
    t0: Instant,
    presenter: Presenter,
}

impl Fixture {
    fn mount(options: PresenterOptions) -> Self {
        let t0 = Instant::now();
        let now = Rc::new(Cell::new(t0));
        let bus = EventBus::new();
        let clock = Rc::clone(&now);
        let presenter = Presenter::mount(&bus, options.clock(move || clock.get()));
        Self {
            bus,
            now,
            t0,
            presenter,
        }
    }

    fn at(&mut self, ms: u64) {
        let instant = self.t0 + Duration::from_millis(ms);
        self.now.set(instant);
        self.presenter.update(Message::Tick(instant));
    }
}

#[test]
fn saved_request_runs_the_whole_lifecycle() {
    let mut fx = Fixture::mount(PresenterOptions::default());
    let trace = Rc::new(RefCell::new(vec![]));
    let sink = Rc::clone(&trace);
    fx.presenter
        .machine()
        .borrow_mut()
        .subscribe_to_offset(Position::Bottom, move |v| sink.borrow_mut().push(v));

    snackbar::show(
        &fx.bus,
        ShowRequest::new("Saved")
            .duration_ms(2000)
            .animation_time_ms(250),
    );
    assert_eq!(fx.presenter.phase(), Phase::Entering);

    let mut phases = vec![fx.presenter.phase()];
    for ms in (16..=2600).step_by(16) {
        fx.at(ms);
        if phases.last() != Some(&fx.presenter.phase()) {
            phases.push(fx.presenter.phase());
        }
    }

    assert_eq!(
        phases,
        vec![Phase::Entering, Phase::Settled, Phase::Exiting, Phase::Hidden]
    );
    let trace = trace.borrow();
    assert_eq!(trace.first().map(|v| *v > -48.0), Some(true));
    assert!(trace.contains(&0.0));
    assert_eq!(trace.last(), Some(&-48.0));
}

#[test]
fn lifecycle_totals_two_and_a_half_seconds() {
    let mut fx = Fixture::mount(PresenterOptions::default());
    snackbar::show(&fx.bus, ShowRequest::new("Saved").duration_ms(2000));

    fx.at(2499);
    assert_eq!(fx.presenter.phase(), Phase::Exiting);
    fx.at(2500);
    assert_eq!(fx.presenter.phase(), Phase::Hidden);
}

#[test]
fn empty_message_leaves_presenter_hidden() {
    let fx = Fixture::mount(PresenterOptions::default());

    // Published directly so the presenter's own normalization is exercised.
    fx.bus
        .publish(SHOW_TOPIC, &ShowRequest::new("").confirm_text("Undo"));
    assert_eq!(fx.presenter.phase(), Phase::Hidden);
    assert!(fx.presenter.snapshot().is_none());
}

#[test]
fn confirm_runs_callback_once_and_skips_auto_hide() {
    let mut fx = Fixture::mount(PresenterOptions::default());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    snackbar::show(
        &fx.bus,
        ShowRequest::new("Sent")
            .confirm_text("Undo")
            .on_confirm(move || counter.set(counter.get() + 1)),
    );
    fx.at(250);
    assert_eq!(fx.presenter.phase(), Phase::Settled);

    fx.presenter.update(Message::ConfirmPressed);
    fx.presenter.update(Message::ConfirmPressed);
    assert_eq!(calls.get(), 1);
    assert_eq!(fx.presenter.phase(), Phase::Exiting);

    fx.at(500);
    assert_eq!(fx.presenter.phase(), Phase::Hidden);
    // Far past the original auto-hide deadline: nothing left to fire.
    fx.at(10_000);
    assert_eq!(fx.presenter.phase(), Phase::Hidden);
    assert_eq!(calls.get(), 1);
}

#[test]
fn later_request_pre_empts_the_visible_one() {
    let mut fx = Fixture::mount(PresenterOptions::default());
    snackbar::show(&fx.bus, ShowRequest::new("First"));
    fx.at(1000);

    snackbar::show(
        &fx.bus,
        ShowRequest::new("Second").position(Position::Top),
    );
    let snapshot = fx.presenter.snapshot().expect("visible");
    assert_eq!(snapshot.message, "Second");
    assert_eq!(snapshot.position, Position::Top);
    assert_eq!(fx.presenter.phase(), Phase::Entering);

    let machine = fx.presenter.machine();
    assert_eq!(machine.borrow().offset(Position::Bottom), -48.0);
}

#[test]
fn unmounted_presenter_receives_nothing() {
    let fx = Fixture::mount(PresenterOptions::default());
    snackbar::show(&fx.bus, ShowRequest::new("Saved"));
    let machine = fx.presenter.machine();
    let Fixture { bus, presenter, .. } = fx;

    drop(presenter);
    assert_eq!(bus.subscriber_count(SHOW_TOPIC), 0);
    assert!(!snackbar::show(&bus, ShowRequest::new("Late")));

    let frozen = machine.borrow().offset(Position::Bottom);
    machine
        .borrow_mut()
        .tick(Instant::now() + Duration::from_secs(60));
    assert_eq!(machine.borrow().offset(Position::Bottom), frozen);
    assert!(!machine.borrow().has_pending_timer());
}

#[test]
fn config_file_drives_presenter_defaults() {
    let dir = tempdir().expect("failed to create temp dir");
    let mut config = Config::default();
    config.snackbar.position = Some(Position::Top);
    config.snackbar.height = Some(64);
    config.snackbar.background_color = Some("#000000".to_string());
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("failed to save config");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let fx = Fixture::mount(PresenterOptions::from_config(&loaded));
    snackbar::show(&fx.bus, ShowRequest::new("Saved"));

    let snapshot = fx.presenter.snapshot().expect("visible");
    assert_eq!(snapshot.position, Position::Top);
    assert_eq!(snapshot.height, 64);
    assert_eq!(snapshot.offset, -64.0);
    assert_eq!(snapshot.background_color, iced::Color::BLACK);
}

#[test]
fn request_from_toml_is_presented() {
    let fx = Fixture::mount(PresenterOptions::default());
    let request = ShowRequest::from_toml(
        r##"
        message = "Upload finished"
        confirm_text = "open"
        text_color = "#FFEB3B"
        "##,
    )
    .expect("valid request");

    assert!(snackbar::show(&fx.bus, request));
    let snapshot = fx.presenter.snapshot().expect("visible");
    assert_eq!(snapshot.confirm_label.as_deref(), Some("OPEN"));
}
