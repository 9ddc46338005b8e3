#![forbid(unsafe_code)]

//! Core: animation primitives, boolean coercion, and geometry for reveal.
//!
//! # Role in reveal
//! `reveal-core` is the motion layer. It owns the [`animation::Animation`]
//! trait, the easing curves, the height motion models (timed tween and
//! damped spring), and the frame clock that turns timestamps into deltas.
//!
//! # Primary responsibilities
//! - **HeightMotion**: a single retargetable height value in motion.
//! - **Fade**: normalized progress for decorative opacity/scale passes.
//! - **Flag**: strict booleans coerced from loosely-typed owner input.
//! - **Rect**: terminal-cell geometry for clip projection.
//!
//! # How it fits in the system
//! `reveal-widgets` builds the `AnimateHeight` controller on top of these
//! primitives. Nothing here knows about measurement, visibility intent, or
//! completion callbacks.

pub mod animation;
pub mod flag;
pub mod geometry;
pub mod logging;

pub use flag::Flag;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace};
