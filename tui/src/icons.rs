//! Block Text Icon Library
//!
//! Minimalist icons using Unicode block drawing characters.
//! These work in most terminal fonts and avoid bright emojis.
//!
//! # Character Reference
//!
//! Blocks: █ ░
//! Triangles: ▸

use stepper_core::{IconRenderer, CURRENT_STEP_ICON};

/// Progress bar cells
pub mod progress {
    /// Filled cell
    pub const FULL: &str = "█";
    /// Empty cell
    pub const EMPTY: &str = "░";
}

/// Step markers
pub mod step {
    /// Current step
    pub const CURRENT: &str = "▸";
}

/// Icon set backed by block glyphs
#[derive(Clone, Copy, Debug, Default)]
pub struct GlyphIcons;

impl GlyphIcons {
    /// Look up a glyph without allocating
    #[must_use]
    pub fn glyph(name: &str) -> Option<&'static str> {
        match name {
            CURRENT_STEP_ICON => Some(step::CURRENT),
            _ => None,
        }
    }
}

impl IconRenderer for GlyphIcons {
    fn render_icon(&self, name: &str) -> Option<String> {
        let glyph = Self::glyph(name);
        if glyph.is_none() {
            tracing::debug!(icon = name, "Unknown icon requested");
        }
        glyph.map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_icons() {
        assert_eq!(GlyphIcons.render_icon(CURRENT_STEP_ICON).as_deref(), Some("▸"));
        assert_eq!(GlyphIcons::glyph(CURRENT_STEP_ICON), Some(step::CURRENT));
    }

    #[test]
    fn test_unknown_icon() {
        assert_eq!(GlyphIcons.render_icon("sparkles"), None);
    }
}
