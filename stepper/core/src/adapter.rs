//! Progress Event Adapter
//!
//! Translates bus events into step-tracker moves and animator targets.
//! The adapter holds nothing but its subscription; all state it touches
//! lives in [`ProgressState`], owned by the widget.

use crate::animation::{Direction, ProgressAnimator};
use crate::bus::{ProgressBus, Subscription};
use crate::events::{UpdateEvent, UpdateKind};
use crate::steps::StepTracker;
use crate::value::ProgressValue;

/// Mutable state behind one widget
#[derive(Debug)]
pub struct ProgressState {
    /// Step tracker (stepped mode only)
    pub tracker: Option<StepTracker>,
    /// Value delta for one step
    pub step_weight: f64,
    /// Value a reset snaps back to
    pub reset_value: ProgressValue,
    /// The animated indicator
    pub animator: ProgressAnimator,
}

/// Listens on the bus and applies each event to a [`ProgressState`]
#[derive(Debug)]
pub struct ProgressEventAdapter {
    subscription: Subscription,
}

impl ProgressEventAdapter {
    /// Attach a listener to `bus`
    #[must_use]
    pub fn attach(bus: &ProgressBus) -> Self {
        Self {
            subscription: bus.subscribe(),
        }
    }

    /// The underlying subscription
    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Apply every queued event, returning how many were processed
    pub fn drain(&mut self, state: &mut ProgressState) -> usize {
        let mut processed = 0;
        while let Some(event) = self.subscription.try_recv() {
            Self::apply(&event, state);
            processed += 1;
        }
        processed
    }

    /// Wait for the next event and apply it
    ///
    /// Returns `None` once the bus has gone away.
    pub async fn next(&mut self, state: &mut ProgressState) -> Option<UpdateKind> {
        let event = self.subscription.recv().await?;
        Some(Self::apply(&event, state))
    }

    /// Apply one event
    ///
    /// Returns the part of the event that was acted on.
    pub fn apply(event: &UpdateEvent, state: &mut ProgressState) -> UpdateKind {
        let kind = event.kind();
        match kind {
            UpdateKind::Reset => {
                if let Some(tracker) = state.tracker.as_mut() {
                    tracker.reset();
                }
                state.animator.set_immediate(state.reset_value);
                tracing::debug!(value = state.reset_value.get(), "Progress reset");
            }
            UpdateKind::Step { direction, steps } => {
                Self::apply_step(state, direction, steps);
            }
            UpdateKind::Absolute(value) => {
                state.animator.set_immediate(value);
                tracing::debug!(value = value.get(), "Progress value set");
            }
            UpdateKind::Ignored => {
                tracing::trace!(?event, "Ignoring update event with nothing to apply");
            }
        }
        kind
    }

    fn apply_step(state: &mut ProgressState, direction: Direction, steps: usize) {
        let delta = steps as f64 * state.step_weight * direction.sign();
        let target = state.animator.value().offset(delta);
        state.animator.animate_to(target, direction);

        let Some(tracker) = state.tracker.as_mut() else {
            tracing::debug!(?direction, steps, target = target.get(), "Plain progress move");
            return;
        };

        let current = tracker
            .current_index()
            .unwrap_or_else(|| tracker.infer_directional_default(direction));

        let moved = match direction {
            Direction::Advance => current.checked_add(steps),
            Direction::Retreat => current.checked_sub(steps),
        }
        .is_some_and(|index| tracker.move_to(index));

        tracing::debug!(
            ?direction,
            steps,
            from = current,
            moved,
            target = target.get(),
            "Step progress move"
        );
    }
}
