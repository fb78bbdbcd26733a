//! Progress Animator
//!
//! Owns the indicator value and moves it toward a target one unit per tick.
//!
//! # Supersession
//!
//! Only one animation is ever in flight. Starting a new one (or snapping the
//! value with [`ProgressAnimator::set_immediate`]) cancels the running task
//! and bumps a generation counter. Every commit checks the generation under
//! the same lock that bumps it, so a superseded task can never write a stale
//! value, even on a multi-threaded runtime.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::value::ProgressValue;

use super::schedule::{TickControl, TickTask};
use super::transition::Transition;
use super::Direction;

/// Reference cadence: one unit every 10ms
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Observable indicator shared with the animation task
#[derive(Debug)]
struct Indicator {
    generation: Mutex<u64>,
    tx: watch::Sender<ProgressValue>,
}

impl Indicator {
    fn new(initial: ProgressValue) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            generation: Mutex::new(0),
            tx,
        }
    }

    /// Write `value` if `generation` is still the live one
    fn commit(&self, generation: u64, value: ProgressValue) -> bool {
        let live = self.generation.lock();
        if *live != generation {
            return false;
        }
        self.tx.send_replace(value);
        true
    }

    /// Invalidate every outstanding writer, returning the new generation
    fn supersede(&self) -> u64 {
        let mut live = self.generation.lock();
        *live = live.wrapping_add(1);
        *live
    }

    fn value(&self) -> ProgressValue {
        *self.tx.borrow()
    }
}

/// Animates a [`ProgressValue`] at a fixed tick cadence
#[derive(Debug)]
pub struct ProgressAnimator {
    indicator: Arc<Indicator>,
    tick_interval: Duration,
    task: Option<TickTask>,
}

impl ProgressAnimator {
    /// Create an animator showing `initial`
    #[must_use]
    pub fn new(initial: ProgressValue, tick_interval: Duration) -> Self {
        Self {
            indicator: Arc::new(Indicator::new(initial)),
            tick_interval,
            task: None,
        }
    }

    /// Last committed value
    #[must_use]
    pub fn value(&self) -> ProgressValue {
        self.indicator.value()
    }

    /// Observe every committed value
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressValue> {
        self.indicator.tx.subscribe()
    }

    /// Time between animation ticks
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Whether an animation is still running
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Set the value directly, without animation
    ///
    /// Cancels any animation in flight so it cannot overwrite the new value.
    pub fn set_immediate(&mut self, value: impl Into<ProgressValue>) {
        let value = value.into();
        let generation = self.supersede();
        self.indicator.commit(generation, value);
        tracing::trace!(value = value.get(), "Indicator set");
    }

    /// Animate toward `target` in unit steps
    ///
    /// `target` is already clamped by construction. Outside a tokio runtime
    /// there is nothing to drive the ticks, so the value snaps to the target.
    pub fn animate_to(&mut self, target: ProgressValue, direction: Direction) {
        let generation = self.supersede();
        let start = self.value();

        if tokio::runtime::Handle::try_current().is_err() {
            tracing::warn!(
                target = target.get(),
                "No async runtime for animation, snapping to target"
            );
            self.indicator.commit(generation, target);
            return;
        }

        tracing::debug!(
            from = start.get(),
            to = target.get(),
            ?direction,
            "Starting progress animation"
        );

        let mut transition = Transition::new(start, target, direction);
        let indicator = Arc::clone(&self.indicator);
        self.task = Some(TickTask::spawn(self.tick_interval, move || {
            let tick = transition.tick();
            if !indicator.commit(generation, tick.value) {
                return TickControl::Stop;
            }
            tracing::trace!(value = tick.value.get(), "Animation tick");
            if tick.finished {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        }));
    }

    /// Stop any running animation, leaving the value where it is
    pub fn stop(&mut self) {
        self.supersede();
    }

    fn supersede(&mut self) -> u64 {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("Superseding in-flight animation");
            }
            task.cancel();
        }
        self.indicator.supersede()
    }
}
