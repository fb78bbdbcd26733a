//! Step Tracking
//!
//! Owns the ordered list of steps and which one is "current". Pure state,
//! no I/O and no timing.
//!
//! Membership and order are fixed when the list is built; only the current
//! marker moves. A move that lands outside `0..len` is dropped and the step
//! that was current keeps its mark, so advancing past the last step (or
//! retreating past the first) leaves the markers where they were even though
//! the indicator value may still animate.

use crate::animation::Direction;
use crate::value::MAX;

/// Attribute value carried by the current step for assistive technology
pub const ARIA_CURRENT_STEP: &str = "step";

/// One discrete milestone in a stepped sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    index: usize,
    label: String,
    current: bool,
}

impl Step {
    /// Position in the list
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display label taken from the host content
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this step carries the current marker
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current
    }

    /// The `aria-current` attribute for this step, if any
    #[must_use]
    pub fn aria_current(&self) -> Option<&'static str> {
        self.current.then_some(ARIA_CURRENT_STEP)
    }
}

/// Ordered, fixed-membership sequence of steps
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepList {
    steps: Vec<Step>,
}

impl StepList {
    /// Build a list from labels, in order. No step starts out current.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| Step {
                index,
                label: label.into(),
                current: false,
            })
            .collect();
        Self { steps }
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the list has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Iterate steps in order
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Value-scale contribution of one step (`MAX / N`)
    ///
    /// `None` for an empty list.
    #[must_use]
    pub fn step_weight(&self) -> Option<f64> {
        if self.steps.is_empty() {
            None
        } else {
            Some(MAX / self.steps.len() as f64)
        }
    }

    fn mark(&mut self, index: usize, current: bool) {
        if let Some(step) = self.steps.get_mut(index) {
            step.current = current;
        }
    }
}

/// Tracks which step of a [`StepList`] is current
#[derive(Clone, Debug, Default)]
pub struct StepTracker {
    steps: StepList,
    current: Option<usize>,
}

impl StepTracker {
    /// Wrap a step list. Call [`initialize`](Self::initialize) to mark step 0.
    #[must_use]
    pub fn new(steps: StepList) -> Self {
        Self {
            steps,
            current: None,
        }
    }

    /// Mark step 0 as current (no-op on an empty list)
    pub fn initialize(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.set_current(0);
    }

    /// Index of the current step, if one is marked
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current step, if one is marked
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.current.and_then(|i| self.steps.get(i))
    }

    /// The tracked steps
    #[must_use]
    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    /// Number of tracked steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps to track
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Move the current marker to `index`
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn move_to(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            tracing::debug!(
                index,
                len = self.steps.len(),
                current = ?self.current,
                "Step move out of range, dropped"
            );
            return false;
        }
        self.set_current(index);
        true
    }

    /// Return the marker to step 0
    pub fn reset(&mut self) {
        if let Some(previous) = self.current.take() {
            self.steps.mark(previous, false);
        }
        self.initialize();
    }

    /// Starting index to assume when no step is marked
    ///
    /// First step when advancing, last step when retreating.
    #[must_use]
    pub fn infer_directional_default(&self, direction: Direction) -> usize {
        match direction {
            Direction::Advance => 0,
            Direction::Retreat => self.steps.len().saturating_sub(1),
        }
    }

    fn set_current(&mut self, index: usize) {
        if let Some(previous) = self.current.replace(index) {
            self.steps.mark(previous, false);
        }
        self.steps.mark(index, true);
    }
}
