//! Cancellable Repeating Task
//!
//! Runs a callback on a fixed cadence until the callback asks to stop or the
//! task is cancelled. Cancellation is explicit ([`TickTask::cancel`]) and also
//! happens when the handle is dropped, so a task never outlives its owner.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// What a tick callback wants to happen next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    /// Keep ticking
    Continue,
    /// Stop after this tick
    Stop,
}

/// Handle to a repeating task on the tokio runtime
#[derive(Debug)]
pub struct TickTask {
    handle: JoinHandle<()>,
}

impl TickTask {
    /// Spawn a task that calls `on_tick` every `period`
    ///
    /// The first call happens one full period after spawning.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if on_tick() == TickControl::Stop {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Stop the task; the callback will not run again
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the task has stopped (finished or cancelled)
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
