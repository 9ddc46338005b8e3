#![forbid(unsafe_code)]

//! Widgets for reveal.
//!
//! The one widget here is [`AnimateHeight`]: a clip container whose height
//! follows the measured height of its content, collapsing to a fixed height
//! while hidden.

pub mod animate_height;

pub use animate_height::{
    AnimateHeight, AnimateHeightProps, AnimateHeightStats, ContainerLayout, EnterFrom,
    LayoutEvent, Recompute, Retarget,
};
