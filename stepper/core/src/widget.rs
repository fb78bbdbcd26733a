//! Progress Widget
//!
//! [`WidgetBuilder`] turns raw host content into a [`ProgressWidget`]:
//!
//! - **Stepped** when the content holds a step list. The list replaces the
//!   host block, step 0 is current and the indicator starts at half a step.
//! - **Plain** otherwise. The host text is kept, the indicator starts at zero
//!   and step-relative events only move the value.
//!
//! Either way the widget listens on the bus it was built with, so every
//! widget built from the same bus sees every event.

use std::sync::Arc;

use tokio::sync::watch;

use crate::adapter::{ProgressEventAdapter, ProgressState};
use crate::animation::ProgressAnimator;
use crate::bus::ProgressBus;
use crate::config::ProgressConfig;
use crate::content::HostContent;
use crate::events::{UpdateEvent, UpdateKind};
use crate::icons::{IconRenderer, NoIcons, CURRENT_STEP_ICON};
use crate::steps::{StepList, StepTracker};
use crate::value::{ProgressValue, MAX};

/// How a widget presents progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetMode {
    /// Step navigation above the indicator
    Stepped,
    /// Host text followed by the indicator
    Plain,
}

/// Assembles [`ProgressWidget`]s
#[derive(Clone)]
pub struct WidgetBuilder {
    bus: ProgressBus,
    config: ProgressConfig,
    icons: Arc<dyn IconRenderer>,
}

impl WidgetBuilder {
    /// Builder for widgets listening on `bus`
    #[must_use]
    pub fn new(bus: &ProgressBus) -> Self {
        Self {
            bus: bus.clone(),
            config: ProgressConfig::default(),
            icons: Arc::new(NoIcons),
        }
    }

    /// Use `config` for tick cadence and plain-mode step weight
    #[must_use]
    pub fn config(mut self, config: ProgressConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `icons` for the current-step marker
    #[must_use]
    pub fn icons(mut self, icons: Arc<dyn IconRenderer>) -> Self {
        self.icons = icons;
        self
    }

    /// Build a widget from raw host content
    #[must_use]
    pub fn build(&self, content: &str) -> ProgressWidget {
        let host = HostContent::parse(content);
        let tick = self.config.tick_interval;

        let (mode, state, text) = match host.step_labels() {
            Some(labels) => {
                let list = StepList::from_labels(labels.iter().cloned());
                let step_weight = list.step_weight().unwrap_or(MAX);
                let mut tracker = StepTracker::new(list);
                tracker.initialize();

                let initial = ProgressValue::new(step_weight / 2.0);
                let state = ProgressState {
                    tracker: Some(tracker),
                    step_weight,
                    reset_value: initial,
                    animator: ProgressAnimator::new(initial, tick),
                };
                (WidgetMode::Stepped, state, Vec::new())
            }
            None => {
                let state = ProgressState {
                    tracker: None,
                    step_weight: self.config.plain_step_weight,
                    reset_value: ProgressValue::ZERO,
                    animator: ProgressAnimator::new(ProgressValue::ZERO, tick),
                };
                (WidgetMode::Plain, state, host.text().to_vec())
            }
        };

        let marker = match mode {
            WidgetMode::Stepped => self.icons.render_icon(CURRENT_STEP_ICON),
            WidgetMode::Plain => None,
        };

        let adapter = ProgressEventAdapter::attach(&self.bus);
        tracing::debug!(
            ?mode,
            steps = state.tracker.as_ref().map_or(0, StepTracker::len),
            subscriber = %adapter.subscription().id(),
            "Built progress widget"
        );

        ProgressWidget {
            mode,
            state,
            adapter,
            marker,
            text,
        }
    }
}

impl std::fmt::Debug for WidgetBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBuilder")
            .field("bus", &self.bus)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A built progress widget
///
/// Dropping the widget detaches it from the bus and stops its animation.
#[derive(Debug)]
pub struct ProgressWidget {
    mode: WidgetMode,
    state: ProgressState,
    adapter: ProgressEventAdapter,
    marker: Option<String>,
    text: Vec<String>,
}

impl ProgressWidget {
    /// Stepped or plain
    #[must_use]
    pub fn mode(&self) -> WidgetMode {
        self.mode
    }

    /// Current indicator value
    #[must_use]
    pub fn value(&self) -> ProgressValue {
        self.state.animator.value()
    }

    /// Indicator maximum (always [`MAX`])
    #[must_use]
    pub fn max(&self) -> f64 {
        MAX
    }

    /// Observe the indicator as it animates
    #[must_use]
    pub fn subscribe_value(&self) -> watch::Receiver<ProgressValue> {
        self.state.animator.subscribe()
    }

    /// Step list (stepped mode only)
    #[must_use]
    pub fn steps(&self) -> Option<&StepList> {
        self.state.tracker.as_ref().map(StepTracker::steps)
    }

    /// Index of the current step (stepped mode only)
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.tracker.as_ref().and_then(StepTracker::current_index)
    }

    /// Value delta for one step
    #[must_use]
    pub fn step_weight(&self) -> f64 {
        self.state.step_weight
    }

    /// Decorative marker for the current step, if the icon set has one
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Host text shown above the indicator (plain mode only)
    #[must_use]
    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Whether the indicator is still animating
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.animator.is_animating()
    }

    /// Apply one event directly, bypassing the bus
    pub fn apply(&mut self, event: &UpdateEvent) -> UpdateKind {
        ProgressEventAdapter::apply(event, &mut self.state)
    }

    /// Apply every event queued on the bus
    pub fn process_pending(&mut self) -> usize {
        self.adapter.drain(&mut self.state)
    }

    /// Wait for the next bus event and apply it
    ///
    /// Returns `None` once the bus has gone away.
    pub async fn next_event(&mut self) -> Option<UpdateKind> {
        self.adapter.next(&mut self.state).await
    }
}
