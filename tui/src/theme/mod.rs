//! Theme and Colors
//!
//! Palette for the progress surface. Filled cells carry the accent, empty
//! cells and pending steps stay muted so the current step stands out.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Indicator Palette
// ============================================================================

/// Filled part of the bar
pub const BAR_FILL: Color = Color::Rgb(255, 127, 127);

/// Empty part of the bar
pub const BAR_EMPTY: Color = Color::Rgb(100, 100, 100);

/// Percentage readout next to a plain bar
pub const PERCENT: Color = Color::Rgb(255, 218, 224);

// ============================================================================
// Step Palette
// ============================================================================

/// The current step - signature magenta
pub const STEP_CURRENT: Color = Color::Magenta;

/// Steps behind the current one
pub const STEP_DONE: Color = Color::Rgb(120, 230, 120);

/// Steps still ahead
pub const STEP_PENDING: Color = Color::Rgb(150, 150, 150);

// ============================================================================
// UI Colors
// ============================================================================

/// Host text in plain mode
pub const TEXT: Color = Color::Rgb(220, 220, 220);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Title accent
pub const TITLE: Color = Color::Rgb(150, 180, 255);

/// Style for the current step label
#[must_use]
pub fn current_step_style() -> Style {
    Style::default()
        .fg(STEP_CURRENT)
        .add_modifier(Modifier::BOLD)
}
