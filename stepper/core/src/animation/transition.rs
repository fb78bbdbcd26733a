//! Unit-Step Transitions
//!
//! Clock-free stepping from a start value toward a target. The scheduler
//! decides *when* to tick; this decides *what* each tick commits.

use crate::value::ProgressValue;

use super::Direction;

/// Result of a single transition tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTick {
    /// Value to commit to the indicator
    pub value: ProgressValue,
    /// Whether the transition has reached its target
    pub finished: bool,
}

/// A running move toward a target, one unit per tick
#[derive(Clone, Debug)]
pub struct Transition {
    running: f64,
    target: ProgressValue,
    direction: Direction,
}

impl Transition {
    /// Start a transition at `start`
    #[must_use]
    pub fn new(start: ProgressValue, target: ProgressValue, direction: Direction) -> Self {
        Self {
            running: start.get(),
            target,
            direction,
        }
    }

    /// Target the transition will snap to
    #[must_use]
    pub fn target(&self) -> ProgressValue {
        self.target
    }

    /// Direction of travel
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one unit in the direction of travel
    ///
    /// Once the running value reaches or passes the target, the tick commits
    /// the target exactly and reports the transition finished. A non-integral
    /// start therefore never overshoots.
    pub fn tick(&mut self) -> TransitionTick {
        self.running += self.direction.sign();

        let target = self.target.get();
        let reached = match self.direction {
            Direction::Advance => self.running >= target,
            Direction::Retreat => self.running <= target,
        };

        if reached {
            self.running = target;
            TransitionTick {
                value: self.target,
                finished: true,
            }
        } else {
            TransitionTick {
                value: ProgressValue::new(self.running),
                finished: false,
            }
        }
    }
}
