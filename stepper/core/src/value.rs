//! Progress Value
//!
//! The single scalar every indicator exposes. All constructors clamp, so a
//! `ProgressValue` held anywhere in the crate is always inside `[0, MAX]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of every indicator (the `max` attribute)
pub const MAX: f64 = 100.0;

/// Overall completion in `[0, MAX]`
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ProgressValue(f64);

impl ProgressValue {
    /// Empty indicator
    pub const ZERO: Self = Self(0.0);

    /// Full indicator
    pub const FULL: Self = Self(MAX);

    /// Create a value, clamping into `[0, MAX]`
    ///
    /// NaN is treated as zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, MAX))
    }

    /// Raw value
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Portion of the indicator that is filled (0.0 to 1.0)
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / MAX
    }

    /// Add a (possibly negative) delta, clamping the result
    #[must_use]
    pub fn offset(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl From<f64> for ProgressValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<ProgressValue> for f64 {
    fn from(value: ProgressValue) -> Self {
        value.0
    }
}

impl fmt::Display for ProgressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}
