#![forbid(unsafe_code)]

//! Owner-supplied configuration for [`AnimateHeight`](super::AnimateHeight).
//!
//! Props can be built in code or, with the `props-config` feature, loaded
//! from TOML or JSON:
//!
//! ```toml
//! initial_height = 0
//! hide_height = 0
//! hide = "false"          # boolean-like values are coerced
//! enter_from = "bottom"
//! decorations = "OPACITY"
//!
//! [motion]
//! kind = "spring"
//! stiffness = 170.0
//! damping = 26.0
//! ```
//!
//! Keys also accept their camelCase spellings (`hideHeight`, `enterFrom`, ...)
//! so payloads from a JavaScript bridge load unchanged.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "props-config")]
use std::path::Path;

#[cfg(feature = "props-config")]
use serde::{Deserialize, Serialize};

use bitflags::bitflags;
use reveal_core::Flag;
use reveal_core::animation::Motion;
use reveal_core::animation::motion::{MIN_DAMPING, MIN_STIFFNESS};

/// Which edge of the clip container the content is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "props-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "props-config", serde(rename_all = "lowercase"))]
pub enum EnterFrom {
    /// Content hangs from the top edge; the bottom edge floats.
    #[default]
    Top,
    /// Content stands on the bottom edge; the top edge floats.
    Bottom,
}

impl EnterFrom {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for EnterFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `"top"` nor `"bottom"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnterFromError {
    input: String,
}

impl fmt::Display for ParseEnterFromError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid enter_from {:?}: expected \"top\" or \"bottom\"",
            self.input
        )
    }
}

impl std::error::Error for ParseEnterFromError {}

impl FromStr for EnterFrom {
    type Err = ParseEnterFromError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("top") {
            Ok(Self::Top)
        } else if trimmed.eq_ignore_ascii_case("bottom") {
            Ok(Self::Bottom)
        } else {
            Err(ParseEnterFromError {
                input: s.to_string(),
            })
        }
    }
}

bitflags! {
    /// Decorative sub-animations that run alongside the height.
    ///
    /// Their settlements never reach `on_height_did_animate`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "props-config", derive(Serialize, Deserialize))]
    pub struct Decorations: u8 {
        /// Fade content out while hidden, in while shown.
        const OPACITY = 0b01;
        /// Shrink content slightly while hidden.
        const SCALE = 0b10;
    }
}

/// Configuration for an [`AnimateHeight`](super::AnimateHeight) instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "props-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "props-config", serde(default))]
pub struct AnimateHeightProps {
    /// Animated height before any measurement arrives.
    #[cfg_attr(feature = "props-config", serde(alias = "initialHeight"))]
    pub initial_height: f64,
    /// Target height while hidden.
    #[cfg_attr(feature = "props-config", serde(alias = "hideHeight"))]
    pub hide_height: f64,
    /// Visibility intent.
    pub hide: Flag,
    /// Which edge of the measurement wrapper is pinned.
    #[cfg_attr(feature = "props-config", serde(alias = "enterFrom"))]
    pub enter_from: EnterFrom,
    /// Bypass animation entirely: natural size, unclipped, no measurement.
    pub disabled: Flag,
    /// How the height travels.
    pub motion: Motion,
    /// Decorative opacity/scale passes.
    pub decorations: Decorations,
}

impl Default for AnimateHeightProps {
    fn default() -> Self {
        Self {
            initial_height: 0.0,
            hide_height: 0.0,
            hide: Flag::OFF,
            enter_from: EnterFrom::Top,
            disabled: Flag::OFF,
            motion: Motion::default(),
            decorations: Decorations::empty(),
        }
    }
}

impl AnimateHeightProps {
    /// Default props: visible, enabled, entering from the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting height (builder pattern).
    #[must_use]
    pub fn initial_height(mut self, height: f64) -> Self {
        self.initial_height = height;
        self
    }

    /// Set the hidden height (builder pattern).
    #[must_use]
    pub fn hide_height(mut self, height: f64) -> Self {
        self.hide_height = height;
        self
    }

    /// Set the visibility intent (builder pattern). Accepts anything boolean-like.
    #[must_use]
    pub fn hide(mut self, hide: impl Into<Flag>) -> Self {
        self.hide = hide.into();
        self
    }

    /// Set the pinned edge (builder pattern).
    #[must_use]
    pub fn enter_from(mut self, enter_from: EnterFrom) -> Self {
        self.enter_from = enter_from;
        self
    }

    /// Disable animation (builder pattern). Accepts anything boolean-like.
    #[must_use]
    pub fn disabled(mut self, disabled: impl Into<Flag>) -> Self {
        self.disabled = disabled.into();
        self
    }

    /// Set the motion model (builder pattern).
    #[must_use]
    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    /// Set decorative sub-animations (builder pattern).
    #[must_use]
    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the props
    /// are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("initial_height", self.initial_height),
            ("hide_height", self.hide_height),
        ] {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            } else if value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }

        match self.motion {
            Motion::Timed { duration_ms: 0, .. } => {
                errors.push("motion.duration_ms must be > 0".into());
            }
            Motion::Spring(params) => {
                if !(params.stiffness.is_finite() && params.stiffness >= MIN_STIFFNESS) {
                    errors.push(format!(
                        "motion.stiffness must be >= {MIN_STIFFNESS}, got {}",
                        params.stiffness
                    ));
                }
                if !(params.damping.is_finite() && params.damping >= MIN_DAMPING) {
                    errors.push(format!(
                        "motion.damping must be >= {MIN_DAMPING}, got {}",
                        params.damping
                    ));
                }
            }
            Motion::Timed { .. } => {}
        }

        errors
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "props-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PropsError> {
        let props: Self = toml::from_str(s).map_err(PropsError::Toml)?;
        props.validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "props-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PropsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PropsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "props-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PropsError> {
        let props: Self = serde_json::from_str(s).map_err(PropsError::Json)?;
        props.validated()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "props-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PropsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PropsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "props-config")]
    pub fn to_toml_string(&self) -> Result<String, PropsError> {
        toml::to_string(self).map_err(PropsError::TomlSer)
    }

    #[cfg(feature = "props-config")]
    fn validated(self) -> Result<Self, PropsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PropsError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading props.
#[derive(Debug)]
pub enum PropsError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "props-config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "props-config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "props-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for PropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "props-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "props-config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "props-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PropsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "props-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "props-config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "props-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
