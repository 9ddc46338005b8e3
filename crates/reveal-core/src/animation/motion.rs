#![forbid(unsafe_code)]

//! Retargetable height motion.
//!
//! [`HeightMotion`] moves one `f64` height toward a target using either a
//! timed tween (duration + easing) or a damped spring:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Invariants
//!
//! 1. A motion at rest reports `height() == target()` exactly.
//! 2. `retarget()` always starts from the current height, never from the
//!    previous origin, so a superseded motion hands off without a jump.
//! 3. Spring velocity survives a retarget; tween progress restarts at zero.
//! 4. Stiffness and damping are clamped to [`MIN_STIFFNESS`] and
//!    [`MIN_DAMPING`], so every spring eventually rests.
//!
//! # Failure Modes
//!
//! - Very large dt: spring integration is subdivided into 4ms steps.
//! - Zero tween duration: the motion lands on the first `advance`.

use std::time::Duration;

use super::{
    Animation, EasingFn, ease_in, ease_in_cubic, ease_in_out, ease_out, ease_out_cubic, linear,
};

/// Maximum dt per spring integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Distance from target below which a spring may come to rest (in height units).
const DEFAULT_REST_THRESHOLD: f64 = 0.01;

/// Speed below which (combined with distance) a spring may come to rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.1;

/// Minimum stiffness to prevent degenerate springs.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Minimum damping. An undamped spring oscillates forever and never rests.
pub const MIN_DAMPING: f64 = 0.1;

/// Named easing curves, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
}

impl Easing {
    /// The curve function for this easing.
    #[must_use]
    pub fn curve(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseIn => ease_in,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }

    /// Apply the curve to linear progress `t`.
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.curve())(t)
    }
}

/// Damped spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringParams {
    /// Critically damped at stiffness 170: no overshoot past the target.
    fn default() -> Self {
        let stiffness: f64 = 170.0;
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
        }
    }
}

impl SpringParams {
    /// Damping coefficient at which the spring converges fastest without
    /// oscillating.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }
}

/// How a height travels to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Motion {
    /// Fixed-duration interpolation through an easing curve.
    Timed { duration_ms: u64, easing: Easing },
    /// Physically-based damped spring.
    Spring(SpringParams),
}

impl Default for Motion {
    fn default() -> Self {
        Self::Timed {
            duration_ms: 300,
            easing: Easing::EaseInOut,
        }
    }
}

impl Motion {
    /// Timed motion with the given duration and easing.
    #[must_use]
    pub fn timed(duration: Duration, easing: Easing) -> Self {
        Self::Timed {
            duration_ms: duration.as_millis().min(u64::MAX as u128) as u64,
            easing,
        }
    }

    /// Spring motion with the given stiffness and damping.
    #[must_use]
    pub fn spring(stiffness: f64, damping: f64) -> Self {
        Self::Spring(SpringParams {
            stiffness,
            damping,
        })
    }
}

/// A single height value in motion toward a target.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use reveal_core::animation::{HeightMotion, Motion};
///
/// let mut motion = HeightMotion::new(0.0, Motion::default());
/// motion.retarget(120.0);
/// while !motion.is_at_rest() {
///     motion.advance(Duration::from_millis(16));
/// }
/// assert_eq!(motion.height(), 120.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeightMotion {
    motion: Motion,
    position: f64,
    velocity: f64,
    origin: f64,
    target: f64,
    elapsed: Duration,
    at_rest: bool,
}

impl HeightMotion {
    /// Create a motion resting at `initial`.
    #[must_use]
    pub fn new(initial: f64, motion: Motion) -> Self {
        let motion = match motion {
            Motion::Spring(params) => Motion::Spring(SpringParams {
                stiffness: params.stiffness.max(MIN_STIFFNESS),
                damping: params.damping.max(MIN_DAMPING),
            }),
            timed => timed,
        };
        Self {
            motion,
            position: initial,
            velocity: 0.0,
            origin: initial,
            target: initial,
            elapsed: Duration::ZERO,
            at_rest: true,
        }
    }

    /// Current (unclamped) height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.position
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current velocity (spring motion only; zero for tweens).
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// The motion model in use.
    #[inline]
    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Whether the height has settled on its target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Head toward a new target from wherever the height is now.
    pub fn retarget(&mut self, target: f64) {
        self.origin = self.position;
        self.target = target;
        self.elapsed = Duration::ZERO;
        self.at_rest = false;
        if matches!(self.motion, Motion::Timed { .. }) {
            self.velocity = 0.0;
        }
    }

    /// Advance by `dt`. Returns `true` only on the call that brings the
    /// motion to rest.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return false;
        }
        match self.motion {
            Motion::Timed {
                duration_ms,
                easing,
            } => self.advance_timed(dt, Duration::from_millis(duration_ms), easing),
            Motion::Spring(params) => self.advance_spring(dt, params),
        }
        self.at_rest
    }

    fn advance_timed(&mut self, dt: Duration, duration: Duration, easing: Easing) {
        self.elapsed = self.elapsed.saturating_add(dt);
        if duration.is_zero() || self.elapsed >= duration {
            self.settle();
            return;
        }
        let t = (self.elapsed.as_secs_f64() / duration.as_secs_f64()) as f32;
        let eased = f64::from(easing.apply(t));
        self.position = self.origin + (self.target - self.origin) * eased;
    }

    fn advance_spring(&mut self, dt: Duration, params: SpringParams) {
        let total_secs = dt.as_secs_f64();
        if total_secs <= 0.0 {
            return;
        }

        let mut remaining = total_secs;
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            // Semi-implicit Euler: velocity first, then position from the new velocity.
            let displacement = self.position - self.target;
            let acceleration = -params.stiffness * displacement - params.damping * self.velocity;
            self.velocity += acceleration * step_dt;
            self.position += self.velocity * step_dt;
            remaining -= step_dt;
        }

        let distance = (self.position - self.target).abs();
        if distance < DEFAULT_REST_THRESHOLD && self.velocity.abs() < DEFAULT_VELOCITY_THRESHOLD {
            self.settle();
        }
    }

    fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }
}

impl Animation for HeightMotion {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Fraction of the distance from origin to target covered so far.
    fn value(&self) -> f32 {
        let span = self.target - self.origin;
        if self.at_rest || span.abs() < f64::EPSILON {
            return 1.0;
        }
        (((self.position - self.origin) / span) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.origin;
        self.velocity = 0.0;
        self.elapsed = Duration::ZERO;
        self.at_rest = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn run_to_rest(motion: &mut HeightMotion, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if motion.advance(MS_16) {
                return frame + 1;
            }
        }
        panic!("motion did not settle within {max_frames} frames");
    }

    #[test]
    fn new_motion_rests_at_initial() {
        let motion = HeightMotion::new(40.0, Motion::default());
        assert!(motion.is_at_rest());
        assert_eq!(motion.height(), 40.0);
        assert_eq!(motion.target(), 40.0);
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let mut motion = HeightMotion::new(0.0, Motion::timed(Duration::from_millis(160), Easing::Linear));
        motion.retarget(120.0);
        motion.advance(Duration::from_millis(80));
        assert!((motion.height() - 60.0).abs() < 1e-6);
        assert!(motion.advance(Duration::from_millis(80)));
        assert_eq!(motion.height(), 120.0);
        assert!(!motion.advance(MS_16), "rest is reported only once");
    }

    #[test]
    fn zero_duration_tween_lands_on_first_advance() {
        let mut motion = HeightMotion::new(10.0, Motion::timed(Duration::ZERO, Easing::EaseOut));
        motion.retarget(0.0);
        assert!(motion.advance(Duration::ZERO));
        assert_eq!(motion.height(), 0.0);
    }

    #[test]
    fn retarget_starts_from_current_height() {
        let mut motion = HeightMotion::new(0.0, Motion::timed(Duration::from_millis(100), Easing::Linear));
        motion.retarget(100.0);
        motion.advance(Duration::from_millis(50));
        let midway = motion.height();
        motion.retarget(0.0);
        assert_eq!(motion.height(), midway);
        motion.advance(Duration::from_millis(50));
        assert!((motion.height() - midway / 2.0).abs() < 1e-6);
    }

    #[test]
    fn spring_reaches_target() {
        let mut motion = HeightMotion::new(0.0, Motion::spring(170.0, 26.0));
        motion.retarget(100.0);
        run_to_rest(&mut motion, 400);
        assert_eq!(motion.height(), 100.0);
        assert_eq!(motion.velocity(), 0.0);
    }

    #[test]
    fn critical_spring_does_not_overshoot() {
        let mut motion = HeightMotion::new(0.0, Motion::Spring(SpringParams::default()));
        motion.retarget(100.0);
        let mut max_height = 0.0_f64;
        for _ in 0..400 {
            motion.advance(MS_16);
            max_height = max_height.max(motion.height());
        }
        assert!(max_height <= 100.5, "overshoot: {max_height}");
    }

    #[test]
    fn spring_large_dt_is_stable() {
        let mut motion = HeightMotion::new(0.0, Motion::spring(400.0, 38.0));
        motion.retarget(50.0);
        motion.advance(Duration::from_secs(5));
        assert!(motion.height().is_finite());
        assert!((motion.height() - 50.0).abs() < 1.0);
    }

    #[test]
    fn spring_parameters_are_clamped() {
        let motion = HeightMotion::new(0.0, Motion::spring(0.0, -4.0));
        match motion.motion() {
            Motion::Spring(params) => {
                assert_eq!(params.stiffness, MIN_STIFFNESS);
                assert_eq!(params.damping, MIN_DAMPING);
            }
            other => panic!("unexpected motion {other:?}"),
        }
    }

    #[test]
    fn animation_value_tracks_fraction_of_distance() {
        let mut motion = HeightMotion::new(0.0, Motion::timed(Duration::from_millis(100), Easing::Linear));
        motion.retarget(200.0);
        motion.tick(Duration::from_millis(25));
        assert!((motion.value() - 0.25).abs() < 1e-3);
        motion.tick(Duration::from_millis(100));
        assert!(motion.is_complete());
        assert_eq!(motion.value(), 1.0);
    }

    #[test]
    fn easing_names_map_to_curves() {
        assert_eq!(Easing::Linear.apply(0.3), linear(0.3));
        assert_eq!(Easing::EaseOutCubic.apply(0.3), ease_out_cubic(0.3));
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
