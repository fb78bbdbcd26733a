//! Update Events
//!
//! Messages external producers publish to drive every progress widget.
//! Widgets don't care who sent an event; they interpret it and move.
//!
//! # Precedence
//!
//! Exactly one part of an event is acted on:
//!
//! 1. `reset` (all other fields ignored)
//! 2. `progress` + `steps` (step-relative move)
//! 3. `value` (absolute override)
//! 4. nothing (ignored)

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::animation::Direction;
use crate::value::ProgressValue;

/// Errors decoding an event from an external producer
#[derive(Debug, Error)]
pub enum EventError {
    /// Payload was not a valid update event
    #[error("Malformed update event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// An externally published progress update
///
/// Absent JSON fields deserialize to `false` / `None`, so producers only
/// send what they mean: `{"progress": true, "steps": 1}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateEvent {
    /// Return to the first step and its value
    pub reset: bool,
    /// `true` to advance, `false` to retreat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
    /// Number of steps to move
    ///
    /// Anything other than a non-negative integer decodes as absent, so a
    /// bad count makes the event fall through rather than fail.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_steps"
    )]
    pub steps: Option<u32>,
    /// Absolute value override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl UpdateEvent {
    /// Reset to the first step
    #[must_use]
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    /// Advance by `steps`
    #[must_use]
    pub fn advance(steps: u32) -> Self {
        Self {
            progress: Some(true),
            steps: Some(steps),
            ..Self::default()
        }
    }

    /// Retreat by `steps`
    #[must_use]
    pub fn retreat(steps: u32) -> Self {
        Self {
            progress: Some(false),
            steps: Some(steps),
            ..Self::default()
        }
    }

    /// Set the value directly
    #[must_use]
    pub fn value(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Decode an event from JSON
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Malformed`] if the payload is not a JSON object
    /// or `reset`, `progress` or `value` has the wrong type. A bad `steps`
    /// is not an error; see [`UpdateEvent::steps`].
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Which part of this event is meaningful
    ///
    /// A zero step count is not a move; such an event falls through to the
    /// `value` check.
    #[must_use]
    pub fn kind(&self) -> UpdateKind {
        if self.reset {
            return UpdateKind::Reset;
        }

        if let (Some(progress), Some(steps)) = (self.progress, self.steps) {
            if steps > 0 {
                return UpdateKind::Step {
                    direction: Direction::from_progress(progress),
                    steps: steps as usize,
                };
            }
        }

        match self.value {
            Some(value) => UpdateKind::Absolute(ProgressValue::new(value)),
            None => UpdateKind::Ignored,
        }
    }
}

/// Decode `steps`, treating negative, fractional, oversized or non-numeric
/// counts as absent
fn lenient_steps<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let steps = raw
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok());
    if raw.is_some() && steps.is_none() {
        tracing::trace!(?raw, "Unusable step count, treating as absent");
    }
    Ok(steps)
}

/// The interpreted meaning of an [`UpdateEvent`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateKind {
    /// Back to step 0 and its value
    Reset,
    /// Move `steps` steps in `direction`, animating the value
    Step {
        /// Direction of travel
        direction: Direction,
        /// Number of steps to traverse (at least 1)
        steps: usize,
    },
    /// Snap to an absolute value
    Absolute(ProgressValue),
    /// Nothing meaningful in the event
    Ignored,
}
