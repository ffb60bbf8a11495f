// SPDX-License-Identifier: MPL-2.0
//! Horizontal swipe-to-dismiss.
//!
//! The gesture itself is a pure reducer over [`GestureEvent`]s so it can be
//! exercised without a pointer device. The horizontal offset it produces also
//! drives the bar's opacity through [`opacity`].

/// Pointer gesture on the snackbar, horizontal component only.
///
/// `Move` and `End` carry the horizontal distance from where the gesture
/// started, not an absolute position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start,
    Move(f32),
    End(f32),
    /// The gesture was taken away (pointer left the window, capture lost).
    /// Resolved like a release at the last known distance.
    Cancel,
}

/// What the owner should do once a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Spring the offset back to zero.
    SnapBack,
    /// The dismiss threshold was crossed; remove the snackbar.
    Dismiss,
}

/// Swipe gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeState {
    /// Offset captured when the gesture started.
    base: f32,
    /// Current horizontal offset.
    offset: f32,
    /// Last distance reported by the gesture.
    last_dx: f32,
    dragging: bool,
}

impl SwipeState {
    /// A resting state at `offset`, e.g. mid-way through a snap-back spring.
    #[must_use]
    pub fn at(offset: f32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Applies `event` to `state` for a viewport `width` pixels wide.
///
/// Returns the new state and, when the gesture ended, the release decision.
#[must_use]
pub fn reduce(state: SwipeState, event: GestureEvent, width: f32) -> (SwipeState, Option<Release>) {
    match event {
        GestureEvent::Start => (
            SwipeState {
                base: state.offset,
                offset: state.offset,
                last_dx: 0.0,
                dragging: true,
            },
            None,
        ),
        GestureEvent::Move(dx) => {
            if !state.dragging {
                return (state, None);
            }
            let dx = sanitize(dx);
            (
                SwipeState {
                    offset: state.base + dx,
                    last_dx: dx,
                    ..state
                },
                None,
            )
        }
        GestureEvent::End(dx) => release(state, sanitize(dx), width),
        GestureEvent::Cancel => release(state, state.last_dx, width),
    }
}

fn release(state: SwipeState, dx: f32, width: f32) -> (SwipeState, Option<Release>) {
    if !state.dragging {
        return (state, None);
    }
    let offset = state.base + dx;
    let decision = if is_past_threshold(offset, width) {
        Release::Dismiss
    } else {
        Release::SnapBack
    };
    (SwipeState::at(offset), Some(decision))
}

fn sanitize(dx: f32) -> f32 {
    if dx.is_finite() {
        dx
    } else {
        0.0
    }
}

/// Whether an offset of `x` crosses the dismiss threshold (half the width).
#[must_use]
pub fn is_past_threshold(x: f32, width: f32) -> bool {
    x.abs() > width.max(0.0) / 2.0
}

/// Opacity for a horizontal offset of `x`.
///
/// Linear over `[-W/2, 0, W/2] -> [0, 1, 0]`, clamped outside that range.
#[must_use]
pub fn opacity(x: f32, width: f32) -> f32 {
    let half = width / 2.0;
    if half <= 0.0 || !half.is_finite() {
        return if x == 0.0 { 1.0 } else { 0.0 };
    }
    interpolate(sanitize(x), &[-half, 0.0, half], &[0.0, 1.0, 0.0])
}

/// Piecewise-linear interpolation with clamped extrapolation.
///
/// `inputs` must be increasing and the same length as `outputs`.
fn interpolate(x: f32, inputs: &[f32], outputs: &[f32]) -> f32 {
    debug_assert_eq!(inputs.len(), outputs.len());
    let (Some(&first), Some(&last)) = (inputs.first(), inputs.last()) else {
        return 0.0;
    };
    if x <= first {
        return outputs[0];
    }
    if x >= last {
        return outputs[outputs.len() - 1];
    }
    for i in 1..inputs.len() {
        if x <= inputs[i] {
            let (x0, x1) = (inputs[i - 1], inputs[i]);
            let (y0, y1) = (outputs[i - 1], outputs[i]);
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    outputs[outputs.len() - 1]
}
