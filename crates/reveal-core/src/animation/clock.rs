#![forbid(unsafe_code)]

//! Frame timestamps to animation deltas.

use std::time::Duration;

use web_time::Instant;

#[cfg(feature = "tracing")]
use crate::logging::trace;
#[cfg(not(feature = "tracing"))]
use crate::trace;

/// Longest delta handed to animations in one frame. A stalled event loop
/// resumes the animation instead of teleporting it to the end.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Converts successive frame timestamps into capped deltas.
///
/// The first frame after construction (or [`FrameClock::reset`]) yields
/// `Duration::ZERO`.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock capped at [`MAX_FRAME_DELTA`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: None,
            max_delta: MAX_FRAME_DELTA,
        }
    }

    /// Override the per-frame cap (builder pattern).
    #[must_use]
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Record a frame at `now` and return the capped delta since the last one.
    ///
    /// Timestamps that go backwards yield `Duration::ZERO`.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        if dt > self.max_delta {
            trace!(
                dt_ms = dt.as_millis() as u64,
                cap_ms = self.max_delta.as_millis() as u64,
                "frame delta capped"
            );
            return self.max_delta;
        }
        dt
    }

    /// Forget the last frame; the next delta is zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
