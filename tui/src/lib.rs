//! Stepper TUI - Terminal surface for stepped progress widgets
//!
//! This crate draws headless [`stepper_core`] widgets in the terminal and
//! turns key presses into update events on the shared bus.
//!
//! # Architecture
//!
//! - **App**: Event loop, key mapping, layout of the widget stack
//! - **Widgets**: Ratatui view of a stepped or plain progress widget
//! - **Icons**: Block-glyph icon set handed to the widget builder
//! - **Theme**: Palette for bars and step labels

pub mod app;
pub mod icons;
pub mod theme;
pub mod widgets;

pub use app::{key_action, App, KeyAction};
pub use icons::GlyphIcons;
pub use widgets::StepProgressView;
