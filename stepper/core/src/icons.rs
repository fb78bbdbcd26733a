//! Icon Capability
//!
//! Widgets don't load icons themselves; the surface hands them a renderer.

/// Icon name the builder asks for to decorate the current step
pub const CURRENT_STEP_ICON: &str = "step-current";

/// Turns an icon name into something the surface can draw
pub trait IconRenderer: Send + Sync {
    /// Render the icon called `name`, or `None` if the set has no such icon
    fn render_icon(&self, name: &str) -> Option<String>;
}

/// Renderer with no icons at all
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIcons;

impl IconRenderer for NoIcons {
    fn render_icon(&self, _name: &str) -> Option<String> {
        None
    }
}
