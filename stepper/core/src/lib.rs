//! Stepper Core - Headless Stepped Progress Indicator
//!
//! This crate tracks completion through an ordered sequence of steps and
//! exposes a single animated value in `[0, 100]`, driven entirely by events
//! published on a shared bus. It knows nothing about how the widget is drawn;
//! a terminal, web or test surface reads the state and renders it.
//!
//! # Architecture
//!
//! ```text
//!  producers (keys, jobs, scripts)
//!        │  UpdateEvent
//!        ▼
//! ┌──────────────┐  every event to every subscriber
//! │ ProgressBus  │──────────────┬───────────────────┐
//! └──────────────┘              │                   │
//!                ┌──────────────▼─────────┐  ┌──────▼───────┐
//!                │ ProgressWidget         │  │ widget #2 …  │
//!                │  ProgressEventAdapter  │  └──────────────┘
//!                │    ├─→ StepTracker     │
//!                │    └─→ ProgressAnimator│──→ watch::Receiver<ProgressValue>
//!                └────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use stepper_core::{ProgressBus, UpdateEvent, WidgetBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let bus = ProgressBus::global();
//!     let mut widget = WidgetBuilder::new(bus).build("1. Cart\n2. Shipping\n3. Pay\n4. Done");
//!     assert_eq!(widget.value().get(), 12.5);
//!
//!     bus.publish(UpdateEvent::advance(1));
//!     widget.process_pending();
//!
//!     let mut value = widget.subscribe_value();
//!     while value.changed().await.is_ok() {
//!         println!("{}%", *value.borrow());
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`value`]: The clamped indicator value
//! - [`steps`]: Step list and current-step tracking
//! - [`animation`]: Unit-step animation on a cancellable tick task
//! - [`events`]: Update events and their precedence
//! - [`bus`]: Broadcast bus the widgets listen on
//! - [`adapter`]: Event-to-state translation
//! - [`content`]: Step list discovery in host content
//! - [`icons`]: Icon rendering capability
//! - [`widget`]: Widget builder and built widget
//! - [`config`]: TOML/env/CLI configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod animation;
pub mod bus;
pub mod config;
pub mod content;
pub mod events;
pub mod icons;
pub mod steps;
pub mod value;
pub mod widget;

// Re-exports for convenience
pub use adapter::{ProgressEventAdapter, ProgressState};
pub use animation::{Direction, ProgressAnimator, TickTask, Transition, DEFAULT_TICK_INTERVAL};
pub use bus::{ProgressBus, PublishResult, SubscriberId, Subscription};
pub use content::HostContent;
pub use events::{EventError, UpdateEvent, UpdateKind};
pub use icons::{IconRenderer, NoIcons, CURRENT_STEP_ICON};
pub use steps::{Step, StepList, StepTracker, ARIA_CURRENT_STEP};
pub use value::{ProgressValue, MAX};
pub use widget::{ProgressWidget, WidgetBuilder, WidgetMode};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, ProgressConfig, ProgressToml, DEFAULT_PLAIN_STEP_WEIGHT,
};
