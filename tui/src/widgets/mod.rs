//! Custom Widgets
//!
//! Ratatui views over the headless progress widgets.

mod step_progress;

pub use step_progress::{filled_cells, StepProgressView};
