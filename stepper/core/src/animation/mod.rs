//! Animation
//!
//! Moves the indicator toward a target value over time instead of jumping.
//!
//! # Architecture
//!
//! ```text
//! ProgressAnimator (owns the indicator, one animation at a time)
//!     │
//!     ├─→ Transition  (what each tick commits: ±1, snap at target)
//!     └─→ TickTask    (when ticks happen: cancellable tokio interval)
//! ```

mod animator;
mod schedule;
mod transition;

pub use animator::{ProgressAnimator, DEFAULT_TICK_INTERVAL};
pub use schedule::{TickControl, TickTask};
pub use transition::{Transition, TransitionTick};

use serde::{Deserialize, Serialize};

/// Direction of a step-relative move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the last step / `MAX`
    Advance,
    /// Toward the first step / zero
    Retreat,
}

impl Direction {
    /// Map the event's `progress` flag onto a direction
    #[must_use]
    pub fn from_progress(progress: bool) -> Self {
        if progress {
            Self::Advance
        } else {
            Self::Retreat
        }
    }

    /// `+1.0` when advancing, `-1.0` when retreating
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Advance => 1.0,
            Self::Retreat => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_progress() {
        assert_eq!(Direction::from_progress(true), Direction::Advance);
        assert_eq!(Direction::from_progress(false), Direction::Retreat);
        assert!(Direction::Retreat.sign() < 0.0);
    }
}
