//! StepProgress Widget
//!
//! Draws one [`ProgressWidget`] into a buffer.
//!
//! Stepped mode puts the labels in equal-width cells above a full-width bar,
//! so the half-step starting value sits under the middle of the first label:
//!
//! ```text
//! ▸ Cart    Shipping  Payment   Review
//! █████░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░
//! ```
//!
//! Plain mode keeps the host text and appends a bar with a percentage.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use stepper_core::{ProgressValue, ProgressWidget, StepList, WidgetMode};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::icons::progress;
use crate::theme;

/// Width of the percentage readout in plain mode (`" 100%"`)
const PERCENT_WIDTH: u16 = 5;

/// Ratatui view over a [`ProgressWidget`]
pub struct StepProgressView<'a> {
    widget: &'a ProgressWidget,
}

impl<'a> StepProgressView<'a> {
    /// View `widget`
    pub fn new(widget: &'a ProgressWidget) -> Self {
        Self { widget }
    }

    /// Rows needed to draw the widget at `width`
    pub fn height(&self, width: u16) -> u16 {
        match self.widget.mode() {
            WidgetMode::Stepped => 2,
            WidgetMode::Plain => {
                let lines = wrapped_text(self.widget.text(), width).len();
                u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(1)
            }
        }
    }

    fn render_stepped(&self, steps: &StepList, area: Rect, buf: &mut Buffer) {
        let current = self.widget.current_index();
        let count = steps.len() as u32;
        let width = u32::from(area.width);

        for step in steps.iter() {
            let index = step.index() as u32;
            // Spread the remainder so the cells cover the whole row
            let start = (index * width / count) as u16;
            let end = ((index + 1) * width / count) as u16;
            let room = end.saturating_sub(start).saturating_sub(1);
            if room == 0 {
                continue;
            }

            let label = match (step.is_current(), self.widget.marker()) {
                (true, Some(marker)) => format!("{marker} {}", step.label()),
                _ => step.label().to_string(),
            };
            let style = match current {
                _ if step.is_current() => theme::current_step_style(),
                Some(c) if step.index() < c => Style::default().fg(theme::STEP_DONE),
                _ => Style::default().fg(theme::STEP_PENDING),
            };

            buf.set_string(area.x + start, area.y, truncate(&label, room), style);
        }

        if area.height > 1 {
            draw_bar(buf, area.x, area.y + 1, area.width, self.widget.value());
        }
    }

    fn render_plain(&self, area: Rect, buf: &mut Buffer) {
        let lines = wrapped_text(self.widget.text(), area.width);
        let text_rows = area.height.saturating_sub(1);

        for (row, line) in lines.iter().take(text_rows as usize).enumerate() {
            buf.set_string(
                area.x,
                area.y + row as u16,
                line,
                Style::default().fg(theme::TEXT),
            );
        }

        let bar_y = area.y + (lines.len() as u16).min(text_rows);
        let bar_width = area.width.saturating_sub(PERCENT_WIDTH);
        let value = self.widget.value();
        draw_bar(buf, area.x, bar_y, bar_width, value);

        let percent = format!(" {:>3}%", value.get().round() as u8);
        buf.set_string(
            area.x + bar_width,
            bar_y,
            percent,
            Style::default().fg(theme::PERCENT),
        );
    }
}

impl Widget for StepProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < PERCENT_WIDTH + 1 || area.height == 0 {
            return;
        }

        match self.widget.steps() {
            Some(steps) if !steps.is_empty() => self.render_stepped(steps, area, buf),
            _ => self.render_plain(area, buf),
        }
    }
}

/// Number of filled cells for `value` on a bar `width` cells wide
pub fn filled_cells(value: ProgressValue, width: u16) -> u16 {
    let filled = (value.fraction() * f64::from(width)).round() as u16;
    filled.min(width)
}

fn draw_bar(buf: &mut Buffer, x: u16, y: u16, width: u16, value: ProgressValue) {
    let filled = filled_cells(value, width);
    let empty = width - filled;

    buf.set_string(
        x,
        y,
        progress::FULL.repeat(filled as usize),
        Style::default().fg(theme::BAR_FILL),
    );
    buf.set_string(
        x + filled,
        y,
        progress::EMPTY.repeat(empty as usize),
        Style::default().fg(theme::BAR_EMPTY),
    );
}

fn wrapped_text(text: &[String], width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    text.iter()
        .flat_map(|line| {
            textwrap::wrap(line, width)
                .into_iter()
                .map(|l| l.into_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Cut `s` to at most `max` display columns
fn truncate(s: &str, max: u16) -> String {
    let max = usize::from(max);
    if s.width() <= max {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}
