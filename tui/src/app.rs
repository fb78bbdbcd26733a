//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, frame tick)
//! - Key presses become [`UpdateEvent`]s published on the shared bus
//! - Every widget drains the bus each frame and is redrawn
//!
//! The app never touches a widget's state directly. It publishes, exactly
//! like any other producer would, so every widget on screen reacts.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;

use stepper_core::{ProgressBus, ProgressWidget, UpdateEvent};

use crate::theme;
use crate::widgets::StepProgressView;

/// Frame tick, fast enough to show every 10ms animation step
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Key help shown on the bottom row
const HELP: &str = "→/l advance  ←/h back  r reset  0-9 set  f full  q quit";

/// What a key press asks for
#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    /// Publish an event to every widget
    Publish(UpdateEvent),
    /// Leave the app
    Quit,
}

/// Map a key press onto an action
pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(KeyAction::Quit);
    }

    let event = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(KeyAction::Quit),
        KeyCode::Right | KeyCode::Char('l') => UpdateEvent::advance(1),
        KeyCode::Left | KeyCode::Char('h') => UpdateEvent::retreat(1),
        KeyCode::Char('r') => UpdateEvent::reset(),
        KeyCode::Char('f') => UpdateEvent::value(100.0),
        KeyCode::Char(c) => {
            let tens = c.to_digit(10)?;
            UpdateEvent::value(f64::from(tens * 10))
        }
        _ => return None,
    };
    Some(KeyAction::Publish(event))
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Bus every widget listens on
    bus: ProgressBus,
    /// Widgets in display order
    widgets: Vec<ProgressWidget>,
}

impl App {
    /// Create an app showing `widgets`, all built from `bus`
    pub fn new(bus: ProgressBus, widgets: Vec<ProgressWidget>) -> Self {
        Self {
            running: true,
            bus,
            widgets,
        }
    }

    /// Widgets in display order
    pub fn widgets(&self) -> &[ProgressWidget] {
        &self.widgets
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.render(frame.area(), frame.buffer_mut()))?;

        while self.running {
            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                // Frame tick
                () = tokio::time::sleep(FRAME_DURATION) => {}
            }

            self.update();
            terminal.draw(|frame| self.render(frame.area(), frame.buffer_mut()))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key_action(key) {
            Some(KeyAction::Quit) => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            Some(KeyAction::Publish(event)) => {
                let result = self.bus.publish(event.clone());
                tracing::debug!(
                    ?event,
                    delivered = result.delivered,
                    "Published key event"
                );
            }
            None => {}
        }
    }

    /// Apply everything queued on the bus, returning how many events landed
    pub fn update(&mut self) -> usize {
        self.widgets
            .iter_mut()
            .map(ProgressWidget::process_pending)
            .sum()
    }

    /// Draw the whole screen
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }

        buf.set_string(area.x, area.y, " Stepper ", theme::current_step_style());
        let count = format!(" {} widgets", self.widgets.len());
        buf.set_string(
            area.x + 9,
            area.y,
            &count,
            Style::default().fg(theme::TITLE),
        );

        let bottom = area.y + area.height - 1;
        let inner_width = area.width.saturating_sub(2);
        let mut y = area.y + 2;

        for widget in &self.widgets {
            let view = StepProgressView::new(widget);
            let height = view.height(inner_width);
            if y + height > bottom {
                tracing::trace!("Out of rows, remaining widgets not drawn");
                break;
            }
            view.render(Rect::new(area.x + 1, y, inner_width, height), buf);
            y += height + 1;
        }

        buf.set_string(area.x, bottom, HELP, Style::default().fg(theme::DIM_GRAY));
    }
}
