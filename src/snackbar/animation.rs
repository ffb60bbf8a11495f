// SPDX-License-Identifier: MPL-2.0
//! Animated scalar values driven by explicit ticks.
//!
//! An [`AnimatedValue`] holds a single `f32` and at most one running
//! animation (a timed tween or a spring). Nothing advances on its own: the
//! owner calls [`AnimatedValue::tick`] with the current instant, typically
//! from a frame subscription. Listeners registered with
//! [`AnimatedValue::subscribe_to_changes`] observe every change.

use crate::config::{SPRING_DAMPING, SPRING_MASS, SPRING_REST_THRESHOLD, SPRING_STIFFNESS};
use std::fmt;
use std::time::{Duration, Instant};

/// Spring integration step.
const SPRING_STEP: Duration = Duration::from_millis(1);

/// Progress curve of a timed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Identifies a change listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Timing {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

#[derive(Debug, Clone, Copy)]
struct Spring {
    to: f32,
    velocity: f32,
    last: Instant,
}

#[derive(Debug, Clone, Copy)]
enum Animation {
    Timing(Timing),
    Spring(Spring),
}

/// A scalar that can jump or animate towards a target.
pub struct AnimatedValue {
    value: f32,
    animation: Option<Animation>,
    listeners: Vec<(ListenerId, Box<dyn FnMut(f32)>)>,
    next_listener: u64,
}

impl AnimatedValue {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            value,
            animation: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Jumps to `value`, stopping any running animation.
    pub fn set(&mut self, value: f32) {
        self.animation = None;
        self.update(value);
    }

    /// Starts a timed animation from the current value to `to`.
    ///
    /// `start` may lie in the past: the next tick catches up.
    pub fn animate_to(&mut self, to: f32, duration: Duration, easing: Easing, start: Instant) {
        self.animation = Some(Animation::Timing(Timing {
            from: self.value,
            to,
            start,
            duration,
            easing,
        }));
    }

    /// Starts a spring towards `to`, at rest initially.
    pub fn spring_to(&mut self, to: f32, start: Instant) {
        self.animation = Some(Animation::Spring(Spring {
            to,
            velocity: 0.0,
            last: start,
        }));
    }

    /// Stops the running animation, keeping the current value.
    pub fn stop(&mut self) {
        self.animation = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the running animation, if any.
    #[must_use]
    pub fn target(&self) -> Option<f32> {
        self.animation.map(|animation| match animation {
            Animation::Timing(timing) => timing.to,
            Animation::Spring(spring) => spring.to,
        })
    }

    /// Advances the running animation to `now`.
    ///
    /// Returns the instant the animation finished at when it completed during
    /// this tick. For timed animations that is the scheduled end, not `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Instant> {
        let animation = self.animation?;
        match animation {
            Animation::Timing(timing) => {
                let elapsed = now.saturating_duration_since(timing.start);
                if timing.duration.is_zero() || elapsed >= timing.duration {
                    self.animation = None;
                    self.update(timing.to);
                    Some(timing.start + timing.duration)
                } else {
                    let progress = elapsed.as_secs_f32() / timing.duration.as_secs_f32();
                    let eased = timing.easing.apply(progress);
                    self.update(timing.from + (timing.to - timing.from) * eased);
                    None
                }
            }
            Animation::Spring(mut spring) => {
                let mut value = self.value;
                let mut finished = None;
                let dt = SPRING_STEP.as_secs_f32();

                while spring.last + SPRING_STEP <= now {
                    spring.last += SPRING_STEP;

                    let displacement = value - spring.to;
                    let force = -SPRING_STIFFNESS * displacement - SPRING_DAMPING * spring.velocity;
                    spring.velocity += force / SPRING_MASS * dt;
                    value += spring.velocity * dt;

                    if spring.velocity.abs() <= SPRING_REST_THRESHOLD
                        && (value - spring.to).abs() <= SPRING_REST_THRESHOLD
                    {
                        value = spring.to;
                        finished = Some(spring.last);
                        break;
                    }
                }

                self.animation = match finished {
                    Some(_) => None,
                    None => Some(Animation::Spring(spring)),
                };
                self.update(value);
                finished
            }
        }
    }

    /// Registers `listener`, called with the new value after every change.
    pub fn subscribe_to_changes(&mut self, listener: impl FnMut(f32) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn update(&mut self, value: f32) {
        if value == self.value {
            return;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("animation", &self.animation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
