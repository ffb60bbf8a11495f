// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_snackbar::snackbar::{
    Defaults, GestureEvent, Machine, NotificationRequest, ShowRequest,
};
use std::hint::black_box;
use std::time::{Duration, Instant};

fn request() -> NotificationRequest {
    NotificationRequest::normalize(
        &ShowRequest::new("Saved").confirm_text("Undo"),
        &Defaults::default(),
    )
    .expect("request has a message")
}

fn presenter_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("presenter_tick");

    group.bench_function("full_lifecycle_at_60fps", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut machine = Machine::default();
            machine.show(request(), t0);
            for frame in 0..300u64 {
                machine.tick(t0 + Duration::from_millis(frame * 16));
            }
            black_box(machine.phase())
        });
    });

    group.bench_function("snap_back_spring", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut machine = Machine::default();
            machine.show(request(), t0);
            machine.gesture(GestureEvent::Start, t0);
            machine.gesture(GestureEvent::End(120.0), t0);
            machine.tick(t0 + Duration::from_secs(2));
            black_box(machine.drag_offset())
        });
    });

    group.finish();
}

criterion_group!(benches, presenter_tick_benchmark);
criterion_main!(benches);
