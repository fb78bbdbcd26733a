//! Host Content
//!
//! Finds the step list inside the raw content a widget is built from.
//!
//! The first list block wins, ordered or unordered:
//!
//! ```text
//! Checkout            <- text, kept for plain mode
//!
//! 1. Cart             <- step list starts
//! 2. Shipping
//! 3. Payment
//!
//! 4. Review           <- blank lines inside the run are fine
//! Thanks!             <- first non-item line ends the list
//! ```

/// Raw content split into its step list and everything else
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostContent {
    text: Vec<String>,
    steps: Vec<String>,
}

impl HostContent {
    /// Scan `raw` for the first list block
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut content = Self::default();
        let mut state = ListState::Before;

        for line in raw.lines() {
            let item = list_item(line);
            state = match (state, item) {
                (ListState::Before | ListState::Inside, Some(label)) => {
                    content.steps.push(label.to_string());
                    ListState::Inside
                }
                (ListState::Inside, None) if line.trim().is_empty() => ListState::Inside,
                (ListState::Inside, None) => {
                    content.text.push(line.to_string());
                    ListState::After
                }
                (ListState::After, _) | (ListState::Before, None) => {
                    content.text.push(line.to_string());
                    state
                }
            };
        }

        while content.text.last().is_some_and(|l| l.trim().is_empty()) {
            content.text.pop();
        }

        content
    }

    /// Step labels, if the content holds a non-empty list
    #[must_use]
    pub fn step_labels(&self) -> Option<&[String]> {
        if self.steps.is_empty() {
            None
        } else {
            Some(&self.steps)
        }
    }

    /// Lines outside the step list
    #[must_use]
    pub fn text(&self) -> &[String] {
        &self.text
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListState {
    Before,
    Inside,
    After,
}

/// The label of a list item line, or `None` if the line isn't one
fn list_item(line: &str) -> Option<&str> {
    let line = line.trim_start();

    let rest = if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        rest
    } else {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let after = &line[digits..];
        after
            .strip_prefix(". ")
            .or_else(|| after.strip_prefix(") "))?
    };

    let label = rest.trim();
    (!label.is_empty()).then_some(label)
}
