#![forbid(unsafe_code)]

//! The seam between the controller and whatever actually moves the height.
//!
//! [`AnimateHeight`](super::AnimateHeight) decides *when* and *where* to
//! animate; a [`HeightDriver`] does the moving and reports back with
//! [`Settlement`] events. [`MotionDriver`] is the built-in driver over
//! `reveal-core` motion primitives. A host with its own animation runtime
//! implements [`HeightDriver`] directly, returns nothing from `advance`, and
//! forwards its completion events to `AnimateHeight::settle`.
//!
//! # Invariants
//!
//! - A driver reports at most one finished `Height` settlement per
//!   [`AnimationId`].
//! - Retargeting before settlement reports the superseded id as
//!   *interrupted* (`finished == false`) on the next `advance`.
//! - Decoration settlements carry the id of the height animation that
//!   started them but a non-`Height` property.

use std::time::Duration;

use reveal_core::animation::{Animation, Fade, HeightMotion, Motion, ease_out};

use super::props::Decorations;

/// Scale applied to content while fully hidden (with [`Decorations::SCALE`]).
pub const HIDDEN_SCALE: f64 = 0.95;

/// Duration of decoration passes when the height itself uses a spring.
const SPRING_DECORATION_DURATION: Duration = Duration::from_millis(200);

/// Identity of one issued height animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id issued after this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Which animated property a settlement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// The container height. The only property that completes an animation.
    Height,
    /// Decorative content opacity.
    Opacity,
    /// Decorative content scale.
    Scale,
}

/// An animation reaching (or abandoning) its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub id: AnimationId,
    pub property: AnimatedProperty,
    /// Value the property rests at.
    pub value: f64,
    /// `false` when the animation was superseded before it arrived.
    pub finished: bool,
}

impl Settlement {
    /// An animation that arrived at `value`.
    #[must_use]
    pub const fn finished(id: AnimationId, property: AnimatedProperty, value: f64) -> Self {
        Self {
            id,
            property,
            value,
            finished: true,
        }
    }

    /// An animation abandoned at `value` by a retarget.
    #[must_use]
    pub const fn interrupted(id: AnimationId, property: AnimatedProperty, value: f64) -> Self {
        Self {
            id,
            property,
            value,
            finished: false,
        }
    }
}

/// A request to move the height toward a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retarget {
    pub id: AnimationId,
    /// Animated height at the moment of the request.
    pub from: f64,
    pub to: f64,
    /// Whether the target is the hidden height.
    pub hidden: bool,
}

/// An animation runtime that can move a height.
pub trait HeightDriver {
    /// Start moving toward `request.to` from the current height, superseding
    /// anything in flight.
    fn animate_to(&mut self, request: Retarget);

    /// Current animated height.
    fn height(&self) -> f64;

    /// Current decorative opacity in [0.0, 1.0].
    fn opacity(&self) -> f64 {
        1.0
    }

    /// Current decorative scale.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Whether anything (height or decoration) is still moving.
    fn is_animating(&self) -> bool;

    /// Switch motion model for subsequent requests.
    fn set_motion(&mut self, _motion: Motion) {}

    /// Step the runtime by `dt` and report settlements in the order they
    /// happened.
    fn advance(&mut self, dt: Duration) -> Vec<Settlement>;
}

/// One running decoration pass.
#[derive(Debug, Clone)]
struct DecorationPass {
    id: AnimationId,
    from: f64,
    to: f64,
    fade: Fade,
}

impl DecorationPass {
    fn value(&self) -> f64 {
        self.from + (self.to - self.from) * f64::from(self.fade.value())
    }
}

/// A decorated property: its resting value plus an optional pass in flight.
#[derive(Debug, Clone)]
struct DecorationTrack {
    property: AnimatedProperty,
    rest: f64,
    pass: Option<DecorationPass>,
}

impl DecorationTrack {
    fn new(property: AnimatedProperty, rest: f64) -> Self {
        Self {
            property,
            rest,
            pass: None,
        }
    }

    fn value(&self) -> f64 {
        self.pass.as_ref().map_or(self.rest, DecorationPass::value)
    }

    fn target(&self) -> f64 {
        self.pass.as_ref().map_or(self.rest, |pass| pass.to)
    }

    fn start(&mut self, id: AnimationId, to: f64, duration: Duration) {
        if (self.target() - to).abs() < f64::EPSILON {
            return;
        }
        let from = self.value();
        self.pass = Some(DecorationPass {
            id,
            from,
            to,
            fade: Fade::new(duration).easing(ease_out),
        });
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Settlement>) {
        let Some(pass) = self.pass.as_mut() else {
            return;
        };
        pass.fade.tick(dt);
        if pass.fade.is_complete() {
            self.rest = pass.to;
            out.push(Settlement::finished(pass.id, self.property, pass.to));
            self.pass = None;
        }
    }
}

/// Built-in driver over [`HeightMotion`] and [`Fade`] decoration passes.
#[derive(Debug, Clone)]
pub struct MotionDriver {
    height: HeightMotion,
    in_flight: Option<AnimationId>,
    opacity: Option<DecorationTrack>,
    scale: Option<DecorationTrack>,
    pending: Vec<Settlement>,
}

impl MotionDriver {
    /// A driver resting at `initial_height`. Decorations start in their
    /// hidden or shown state according to `hidden`.
    #[must_use]
    pub fn new(initial_height: f64, motion: Motion, decorations: Decorations, hidden: bool) -> Self {
        let opacity = decorations
            .contains(Decorations::OPACITY)
            .then(|| DecorationTrack::new(AnimatedProperty::Opacity, if hidden { 0.0 } else { 1.0 }));
        let scale = decorations
            .contains(Decorations::SCALE)
            .then(|| DecorationTrack::new(AnimatedProperty::Scale, if hidden { HIDDEN_SCALE } else { 1.0 }));
        Self {
            height: HeightMotion::new(initial_height, motion),
            in_flight: None,
            opacity,
            scale,
            pending: Vec::new(),
        }
    }

    /// The underlying height motion.
    #[must_use]
    pub fn motion(&self) -> &HeightMotion {
        &self.height
    }

    /// Id of the height animation still moving, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<AnimationId> {
        self.in_flight
    }

    fn decoration_duration(&self) -> Duration {
        match self.height.motion() {
            Motion::Timed { duration_ms, .. } => Duration::from_millis(duration_ms),
            Motion::Spring(_) => SPRING_DECORATION_DURATION,
        }
    }
}

impl HeightDriver for MotionDriver {
    fn animate_to(&mut self, request: Retarget) {
        if let Some(superseded) = self.in_flight.take() {
            self.pending.push(Settlement::interrupted(
                superseded,
                AnimatedProperty::Height,
                self.height.height(),
            ));
        }
        self.height.retarget(request.to);
        self.in_flight = Some(request.id);

        let duration = self.decoration_duration();
        if let Some(track) = self.opacity.as_mut() {
            track.start(request.id, if request.hidden { 0.0 } else { 1.0 }, duration);
        }
        if let Some(track) = self.scale.as_mut() {
            let to = if request.hidden { HIDDEN_SCALE } else { 1.0 };
            track.start(request.id, to, duration);
        }
    }

    fn height(&self) -> f64 {
        self.height.height()
    }

    fn opacity(&self) -> f64 {
        self.opacity.as_ref().map_or(1.0, DecorationTrack::value)
    }

    fn scale(&self) -> f64 {
        self.scale.as_ref().map_or(1.0, DecorationTrack::value)
    }

    fn is_animating(&self) -> bool {
        !self.height.is_at_rest()
            || self.opacity.as_ref().is_some_and(|t| t.pass.is_some())
            || self.scale.as_ref().is_some_and(|t| t.pass.is_some())
    }

    fn set_motion(&mut self, motion: Motion) {
        if self.height.motion() == motion {
            return;
        }
        let mut next = HeightMotion::new(self.height.height(), motion);
        if !self.height.is_at_rest() {
            next.retarget(self.height.target());
        }
        self.height = next;
    }

    fn advance(&mut self, dt: Duration) -> Vec<Settlement> {
        let mut out = std::mem::take(&mut self.pending);
        if self.height.advance(dt)
            && let Some(id) = self.in_flight.take()
        {
            out.push(Settlement::finished(
                id,
                AnimatedProperty::Height,
                self.height.target(),
            ));
        }
        if let Some(track) = self.opacity.as_mut() {
            track.advance(dt, &mut out);
        }
        if let Some(track) = self.scale.as_mut() {
            track.advance(dt, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::animation::motion::Easing;

    const MS_16: Duration = Duration::from_millis(16);

    fn timed(ms: u64) -> Motion {
        Motion::timed(Duration::from_millis(ms), Easing::Linear)
    }

    fn request(id: u64, from: f64, to: f64) -> Retarget {
        Retarget {
            id: AnimationId::new(id),
            from,
            to,
            hidden: false,
        }
    }

    fn run(driver: &mut MotionDriver, frames: usize) -> Vec<Settlement> {
        let mut all = Vec::new();
        for _ in 0..frames {
            all.extend(driver.advance(MS_16));
        }
        all
    }

    #[test]
    fn reports_one_finished_height_settlement() {
        let mut driver = MotionDriver::new(0.0, timed(100), Decorations::empty(), false);
        driver.animate_to(request(1, 0.0, 120.0));
        assert!(driver.is_animating());

        let settlements = run(&mut driver, 20);
        assert_eq!(
            settlements,
            vec![Settlement::finished(
                AnimationId::new(1),
                AnimatedProperty::Height,
                120.0
            )]
        );
        assert!(!driver.is_animating());
        assert_eq!(driver.height(), 120.0);
    }

    #[test]
    fn retarget_reports_superseded_as_interrupted() {
        let mut driver = MotionDriver::new(0.0, timed(100), Decorations::empty(), false);
        driver.animate_to(request(1, 0.0, 120.0));
        driver.advance(Duration::from_millis(50));
        driver.animate_to(request(2, 60.0, 0.0));

        let settlements = run(&mut driver, 20);
        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0].id, AnimationId::new(1));
        assert!(!settlements[0].finished);
        assert!((settlements[0].value - 60.0).abs() < 1e-6);
        assert_eq!(
            settlements[1],
            Settlement::finished(AnimationId::new(2), AnimatedProperty::Height, 0.0)
        );
    }

    #[test]
    fn decorations_follow_hidden_intent() {
        let mut driver = MotionDriver::new(
            80.0,
            timed(100),
            Decorations::OPACITY | Decorations::SCALE,
            false,
        );
        assert_eq!(driver.opacity(), 1.0);
        assert_eq!(driver.scale(), 1.0);

        driver.animate_to(Retarget {
            id: AnimationId::new(7),
            from: 80.0,
            to: 0.0,
            hidden: true,
        });
        let settlements = run(&mut driver, 10);

        assert_eq!(driver.opacity(), 0.0);
        assert_eq!(driver.scale(), HIDDEN_SCALE);
        let properties: Vec<_> = settlements.iter().map(|s| s.property).collect();
        assert!(properties.contains(&AnimatedProperty::Height));
        assert!(properties.contains(&AnimatedProperty::Opacity));
        assert!(properties.contains(&AnimatedProperty::Scale));
        assert!(settlements.iter().all(|s| s.id == AnimationId::new(7)));
    }

    #[test]
    fn decoration_not_restarted_for_same_intent() {
        let mut driver = MotionDriver::new(0.0, timed(100), Decorations::OPACITY, false);
        driver.animate_to(request(1, 0.0, 50.0));
        driver.animate_to(request(2, 0.0, 90.0));
        let settlements = run(&mut driver, 10);
        assert!(
            settlements
                .iter()
                .all(|s| s.property == AnimatedProperty::Height),
            "opacity already at 1.0 never animates"
        );
    }

    #[test]
    fn set_motion_keeps_height_and_target() {
        let mut driver = MotionDriver::new(0.0, timed(100), Decorations::empty(), false);
        driver.animate_to(request(1, 0.0, 100.0));
        driver.advance(Duration::from_millis(50));
        let before = driver.height();

        driver.set_motion(Motion::spring(300.0, 30.0));
        assert_eq!(driver.height(), before);
        assert_eq!(driver.motion().target(), 100.0);

        let settlements = run(&mut driver, 200);
        assert_eq!(settlements.len(), 1);
        assert_eq!(driver.height(), 100.0);
    }

    #[test]
    fn animation_ids_increment() {
        let id = AnimationId::new(41);
        assert_eq!(id.next().get(), 42);
        assert!(id < id.next());
    }
}
