#![forbid(unsafe_code)]

//! Animation primitives.
//!
//! Everything here is driven by explicit `tick(dt)` calls; nothing reads a
//! wall clock except [`FrameClock`], which only converts timestamps into
//! deltas. This keeps every animation deterministic under test.
//!
//! - [`Animation`]: the common tick/complete/value/reset contract.
//! - Easing curves: plain `fn(f32) -> f32` values ([`EasingFn`]).
//! - [`Fade`]: normalized 0→1 progress over a fixed duration.
//! - [`HeightMotion`]: a retargetable height value (tween or spring).

use std::time::Duration;

pub mod clock;
pub mod motion;

pub use clock::FrameClock;
pub use motion::{HeightMotion, Motion, SpringParams};

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// An easing curve mapping linear progress to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// No easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in (accelerating).
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out (decelerating).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic S-curve.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Cubic ease-in.
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Normalized progress over a fixed duration.
///
/// `value()` runs 0.0 → 1.0 through the easing curve. A zero duration
/// completes on the first tick.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Fade in over `duration` with linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Linear (uneased) progress in [0.0, 1.0].
    #[must_use]
    pub fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return if self.elapsed.is_zero() { 0.0 } else { 1.0 };
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        if self.duration.is_zero() {
            // Any tick (even a zero one) finishes a zero-length fade.
            self.elapsed = Duration::from_nanos(1);
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        if self.duration.is_zero() {
            return !self.elapsed.is_zero();
        }
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
