#![forbid(unsafe_code)]

//! Layout-driven height animation.
//!
//! [`AnimateHeight`] reconciles three things: the natural height of its
//! content (reported by layout passes), the owner's hide/show intent, and a
//! single in-flight height animation. It renders a clip container whose
//! height follows that animation.
//!
//! # Example
//!
//! ```ignore
//! let mut panel = AnimateHeight::new(AnimateHeightProps::new())
//!     .on_height_did_animate(|h| println!("settled at {h}"));
//!
//! panel.measure(120.0);           // layout pass: retargets to 120
//! panel.tick(Duration::from_millis(16));
//! panel.set_hide(true);           // retargets to hide_height
//! let layout = panel.layout();    // clip container for this frame
//! ```
//!
//! # Invariants
//!
//! - At most one height animation is in flight. A new one is issued only
//!   when the desired height differs from the target *issued* last (not the
//!   one settled last), so re-renders with an unchanged desired height never
//!   restart the animation.
//! - `on_height_did_animate` fires once per issued target, with that target,
//!   and only for the `Height` property of the animation currently in
//!   flight. Superseded, interrupted, and decorative settlements are ignored.
//! - After [`AnimateHeight::unmount`], every inbound event is discarded
//!   without touching state.
//! - While disabled nothing is measured or retargeted, the driver is paused,
//!   and the container is laid out at natural size, unclipped. Re-enabling
//!   resumes a paused animation, which then settles normally.
//! - `hide` and `disabled` are strict booleans by construction ([`Flag`]).
//!
//! # Failure Modes
//!
//! - Non-finite measurements are discarded; negative ones clamp to zero.
//! - Events queued before unmount and delivered after are dropped.

mod driver;
mod layout;
mod props;

use std::fmt;
use std::time::Duration;

use reveal_core::Flag;
use reveal_core::animation::FrameClock;
use reveal_core::{debug, debug_span, trace};
use web_time::Instant;

pub use driver::{
    AnimatedProperty, AnimationId, HIDDEN_SCALE, HeightDriver, MotionDriver, Retarget, Settlement,
};
pub use layout::{Anchor, ContainerLayout, ContentPlacement, Overflow};
pub use props::{AnimateHeightProps, Decorations, EnterFrom, ParseEnterFromError, PropsError};

/// A layout pass reporting the natural height of the content subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEvent {
    pub height: f64,
}

impl LayoutEvent {
    #[must_use]
    pub const fn new(height: f64) -> Self {
        Self { height }
    }
}

/// Outcome of reconciling the desired height with the in-flight target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recompute {
    /// The controller is unmounted (or the event was unusable); nothing changed.
    Discarded,
    /// Disabled: natural presentation, no animation.
    Natural,
    /// Desired height equals the in-flight target; nothing issued.
    Unchanged,
    /// A new animation was issued.
    Retargeted(Retarget),
}

impl Recompute {
    /// Whether a new animation was issued.
    #[inline]
    #[must_use]
    pub fn is_retarget(&self) -> bool {
        matches!(self, Self::Retargeted(_))
    }
}

/// Counters for observing the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimateHeightStats {
    /// Animations issued.
    pub retargets: u64,
    /// Height settlements that fired the completion callback.
    pub settled: u64,
    /// Measurements dropped while disabled or because they were not finite.
    pub discarded_events: u64,
    /// Settlements ignored as superseded, interrupted, decorative, or duplicate.
    pub ignored_settlements: u64,
}

/// The target most recently issued to the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
struct InFlight {
    id: Option<AnimationId>,
    target: f64,
    settled: bool,
}

/// Height-animation controller for a clip container.
///
/// Generic over the [`HeightDriver`] that moves the height; defaults to the
/// built-in [`MotionDriver`].
pub struct AnimateHeight<D: HeightDriver = MotionDriver> {
    props: AnimateHeightProps,
    measured: f64,
    in_flight: InFlight,
    next_id: AnimationId,
    live: bool,
    driver: D,
    clock: FrameClock,
    on_height_did_animate: Option<Box<dyn FnMut(f64)>>,
    stats: AnimateHeightStats,
}

impl<D: HeightDriver + fmt::Debug> fmt::Debug for AnimateHeight<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimateHeight")
            .field("props", &self.props)
            .field("measured", &self.measured)
            .field("in_flight", &self.in_flight)
            .field("live", &self.live)
            .field("driver", &self.driver)
            .field("has_callback", &self.on_height_did_animate.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl AnimateHeight<MotionDriver> {
    /// Mount a controller driven by the built-in [`MotionDriver`].
    #[must_use]
    pub fn new(props: AnimateHeightProps) -> Self {
        let driver = MotionDriver::new(
            sanitize_height(props.initial_height),
            props.motion,
            props.decorations,
            props.hide.get(),
        );
        Self::with_driver(props, driver)
    }
}

impl<D: HeightDriver> AnimateHeight<D> {
    /// Mount a controller over a custom driver.
    ///
    /// The driver should already rest at `props.initial_height`. Mounting
    /// runs the first recompute, so a controller mounted hidden with a
    /// `hide_height` different from its initial height starts animating
    /// immediately.
    pub fn with_driver(props: AnimateHeightProps, driver: D) -> Self {
        let initial = sanitize_height(props.initial_height);
        let mut this = Self {
            props,
            measured: initial,
            in_flight: InFlight {
                id: None,
                target: initial,
                settled: true,
            },
            next_id: AnimationId::new(1),
            live: true,
            driver,
            clock: FrameClock::new(),
            on_height_did_animate: None,
            stats: AnimateHeightStats::default(),
        };
        this.recompute();
        this
    }

    /// Register the settled-height callback (builder pattern).
    #[must_use]
    pub fn on_height_did_animate<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        self.on_height_did_animate = Some(Box::new(callback));
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current props.
    #[must_use]
    pub fn props(&self) -> &AnimateHeightProps {
        &self.props
    }

    /// Last natural content height recorded.
    #[must_use]
    pub fn measured_height(&self) -> f64 {
        self.measured
    }

    /// Height the controller wants right now: `hide_height` while hidden,
    /// the measured content height otherwise.
    #[must_use]
    pub fn desired_height(&self) -> f64 {
        if self.props.hide.get() {
            sanitize_height(self.props.hide_height)
        } else {
            self.measured
        }
    }

    /// Target most recently issued (or the initial height before any).
    #[must_use]
    pub fn current_target(&self) -> f64 {
        self.in_flight.target
    }

    /// Id of the most recently issued animation.
    #[must_use]
    pub fn current_animation(&self) -> Option<AnimationId> {
        self.in_flight.id
    }

    /// Whether the most recently issued animation has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.in_flight.settled
    }

    /// Height the container is drawn at this frame.
    #[must_use]
    pub fn animated_height(&self) -> f64 {
        self.driver.height()
    }

    /// Whether the controller is still mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.live
    }

    /// Observation counters.
    #[must_use]
    pub fn stats(&self) -> AnimateHeightStats {
        self.stats
    }

    /// The driver moving the height.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    // -----------------------------------------------------------------------
    // Inbound events
    // -----------------------------------------------------------------------

    /// Record a layout pass of the content subtree and reconcile.
    pub fn on_layout(&mut self, event: LayoutEvent) -> Recompute {
        self.measure(event.height)
    }

    /// Record the content's natural height and reconcile.
    pub fn measure(&mut self, height: f64) -> Recompute {
        if !self.live {
            trace!(height, "measurement after unmount discarded");
            return Recompute::Discarded;
        }
        if self.props.disabled.get() || !height.is_finite() {
            self.stats.discarded_events += 1;
            trace!(height, disabled = self.props.disabled.get(), "measurement discarded");
            return Recompute::Discarded;
        }
        self.measured = height.max(0.0);
        self.recompute()
    }

    /// Update the visibility intent and reconcile.
    pub fn set_hide(&mut self, hide: impl Into<Flag>) -> Recompute {
        if !self.live {
            return Recompute::Discarded;
        }
        self.props.hide = hide.into();
        self.recompute()
    }

    /// Enable or disable animation and reconcile.
    pub fn set_disabled(&mut self, disabled: impl Into<Flag>) -> Recompute {
        if !self.live {
            return Recompute::Discarded;
        }
        self.props.disabled = disabled.into();
        self.recompute()
    }

    /// Change the hidden height and reconcile.
    pub fn set_hide_height(&mut self, hide_height: f64) -> Recompute {
        if !self.live {
            return Recompute::Discarded;
        }
        self.props.hide_height = hide_height;
        self.recompute()
    }

    /// Replace all props (an owner re-render) and reconcile.
    ///
    /// `initial_height` only matters at mount and is ignored here. A changed
    /// motion applies from the current height onward; decorations are fixed
    /// at mount.
    pub fn set_props(&mut self, props: AnimateHeightProps) -> Recompute {
        if !self.live {
            return Recompute::Discarded;
        }
        if props.motion != self.props.motion {
            self.driver.set_motion(props.motion);
        }
        self.props = props;
        self.recompute()
    }

    /// Reconcile the desired height with the in-flight target.
    pub fn recompute(&mut self) -> Recompute {
        if !self.live {
            return Recompute::Discarded;
        }
        if self.props.disabled.get() {
            return Recompute::Natural;
        }

        let desired = self.desired_height();
        // Compared against the last issued target, not the last settled one.
        if desired == self.in_flight.target {
            return Recompute::Unchanged;
        }

        let request = Retarget {
            id: self.next_id,
            from: self.driver.height(),
            to: desired,
            hidden: self.props.hide.get(),
        };
        self.next_id = self.next_id.next();
        self.in_flight = InFlight {
            id: Some(request.id),
            target: desired,
            settled: false,
        };
        self.stats.retargets += 1;
        debug!(
            id = request.id.get(),
            from = request.from,
            to = request.to,
            hidden = request.hidden,
            "height retarget"
        );
        self.driver.animate_to(request);
        Recompute::Retargeted(request)
    }

    /// Deliver a settlement from the animation runtime.
    ///
    /// Returns `true` when it completed the in-flight height animation and
    /// the callback (if any) was invoked.
    pub fn settle(&mut self, settlement: Settlement) -> bool {
        if !self.live {
            trace!(id = settlement.id.get(), "settlement after unmount discarded");
            return false;
        }
        let current = self.in_flight.id == Some(settlement.id) && !self.in_flight.settled;
        if settlement.property != AnimatedProperty::Height || !settlement.finished || !current {
            self.stats.ignored_settlements += 1;
            trace!(
                id = settlement.id.get(),
                finished = settlement.finished,
                current,
                "settlement ignored"
            );
            return false;
        }

        self.in_flight.settled = true;
        self.stats.settled += 1;
        let height = self.in_flight.target;
        debug!(id = settlement.id.get(), height, "height settled");
        if let Some(callback) = self.on_height_did_animate.as_mut() {
            callback(height);
        }
        true
    }

    /// Advance the driver by `dt` and dispatch its settlements.
    ///
    /// The driver is paused while disabled; an animation cut short by
    /// disabling resumes (and settles) once re-enabled.
    ///
    /// Returns how many completed the in-flight height animation (0 or 1).
    pub fn tick(&mut self, dt: Duration) -> usize {
        if !self.live || self.props.disabled.get() {
            return 0;
        }
        self.driver
            .advance(dt)
            .into_iter()
            .filter(|settlement| self.settle(*settlement))
            .count()
    }

    /// Advance to the frame at `now` using the internal frame clock.
    pub fn tick_at(&mut self, now: Instant) -> usize {
        if !self.live {
            return 0;
        }
        let dt = self.clock.delta(now);
        self.tick(dt)
    }

    /// Tear down. Every later event is discarded.
    pub fn unmount(&mut self) {
        if self.live {
            debug!(retargets = self.stats.retargets, "animate height unmounted");
        }
        self.live = false;
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// The clip container for the current frame.
    #[must_use]
    pub fn layout(&self) -> ContainerLayout {
        let _span = debug_span!(
            "animate_height_layout",
            height = self.driver.height(),
            hide = self.props.hide.get(),
            disabled = self.props.disabled.get()
        )
        .entered();

        if self.props.disabled.get() {
            return ContainerLayout::natural();
        }

        let height = self.driver.height();
        let overflow = if height != 0.0 || self.props.hide.get() {
            Overflow::Hidden
        } else {
            Overflow::Visible
        };
        ContainerLayout {
            height: Some(height),
            overflow,
            content: ContentPlacement::Pinned(self.props.enter_from.into()),
            opacity: self.driver.opacity(),
            scale: self.driver.scale(),
        }
    }
}

/// Clamp configured heights into something animatable.
fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() { height.max(0.0) } else { 0.0 }
}
