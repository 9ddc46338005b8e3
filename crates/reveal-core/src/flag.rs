#![forbid(unsafe_code)]

//! Strict booleans coerced from loosely-typed owner input.
//!
//! Props such as `hide` and `disabled` may arrive from a dynamically-typed
//! boundary (config files, bridge payloads, query strings) as strings or
//! numbers. [`Flag`] normalizes them to a real `bool` once, at the boundary,
//! so no branch downstream ever compares against a stringly-typed value.
//!
//! # Coercion rules
//!
//! | Input | Result |
//! |-------|--------|
//! | `true` / `false` | itself |
//! | `None` / JSON `null` | `false` |
//! | integers | `!= 0` |
//! | floats | `!= 0.0 && !NaN` |
//! | `"true"`, `"1"`, `"yes"`, `"on"` | `true` |
//! | `""`, `"false"`, `"0"`, `"no"`, `"off"`, `"null"`, `"undefined"` | `false` |
//! | any other non-empty string | `true` |
//!
//! String matching trims surrounding whitespace and ignores ASCII case.
//! Coercion never fails.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Spellings that coerce to `false`. Everything else non-empty is truthy.
const FALSY_WORDS: &[&str] = &["false", "0", "no", "off", "null", "undefined"];

/// A boolean that has already been coerced at the component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flag(bool);

impl Flag {
    /// The `true` flag.
    pub const ON: Flag = Flag(true);
    /// The `false` flag.
    pub const OFF: Flag = Flag(false);

    /// Wrap an already-strict boolean.
    #[inline]
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// The strict boolean value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }

    /// Coerce a string using the rules in the module docs.
    #[must_use]
    pub fn coerce_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::OFF;
        }
        let falsy = FALSY_WORDS
            .iter()
            .any(|word| trimmed.eq_ignore_ascii_case(word));
        Self(!falsy)
    }

    /// Coerce a float: zero and NaN are false.
    #[inline]
    #[must_use]
    pub fn coerce_f64(raw: f64) -> Self {
        Self(raw != 0.0 && !raw.is_nan())
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        Self(value.unwrap_or(false))
    }
}

impl From<&str> for Flag {
    fn from(value: &str) -> Self {
        Self::coerce_str(value)
    }
}

impl From<String> for Flag {
    fn from(value: String) -> Self {
        Self::coerce_str(&value)
    }
}

impl From<i64> for Flag {
    fn from(value: i64) -> Self {
        Self(value != 0)
    }
}

impl From<i32> for Flag {
    fn from(value: i32) -> Self {
        Self(value != 0)
    }
}

impl From<u64> for Flag {
    fn from(value: u64) -> Self {
        Self(value != 0)
    }
}

impl From<f64> for Flag {
    fn from(value: f64) -> Self {
        Self::coerce_f64(value)
    }
}

impl FromStr for Flag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::coerce_str(s))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Flag;
    use serde::de::{self, Deserializer, Visitor};
    use serde::{Deserialize, Serialize, Serializer};
    use std::fmt;

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = Flag;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean-like value (bool, number, string, or null)")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
            Ok(Flag::new(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Flag, E> {
            Ok(Flag::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Flag, E> {
            Ok(Flag::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Flag, E> {
            Ok(Flag::coerce_f64(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
            Ok(Flag::coerce_str(v))
        }

        fn visit_none<E: de::Error>(self) -> Result<Flag, E> {
            Ok(Flag::OFF)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Flag, E> {
            Ok(Flag::OFF)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Flag, D::Error> {
            deserializer.deserialize_any(FlagVisitor)
        }
    }

    impl<'de> Deserialize<'de> for Flag {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(FlagVisitor)
        }
    }

    // Always written back out as a strict bool.
    impl Serialize for Flag {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bool(self.get())
        }
    }
}
