#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` macros.
//! Without it, the same macro names expand to nothing, so call sites compile
//! identically in both configurations:
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use reveal_core::logging::debug;
//! #[cfg(not(feature = "tracing"))]
//! use reveal_core::debug;
//! ```
//!
//! Downstream crates can simply `use reveal_core::{debug, trace};` and pick up
//! whichever variant the feature set selects.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

/// Span stand-in returned by the no-op `debug_span!` macro.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

impl NoopSpan {
    /// Mirrors `tracing::Span::entered`.
    #[inline]
    #[must_use]
    pub fn entered(self) -> Self {
        self
    }
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug_span {
    ($($arg:tt)*) => {
        $crate::logging::NoopSpan
    };
}
