//! Single-button alert modal.

use crate::ui::event::{InputEvent, Key};
use crate::ui::{Rect, Screen, Style, wrap};

const ALERT_WIDTH: u16 = 54;

/// A modal alert with a message and one "Ok" acknowledgement.
///
/// # Example
///
/// ```ignore
/// let alert = AlertDialog::new("kernel not found")
///     .title("Unable to connect to existing kernel");
/// ```
#[derive(Debug, Clone)]
pub struct AlertDialog {
    title: String,
    message: String,
}

impl AlertDialog {
    /// Creates an alert with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
        }
    }

    /// Sets a custom title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handles one input event. Returns `true` once the alert is
    /// acknowledged.
    pub fn handle_input(&mut self, input: &InputEvent) -> bool {
        matches!(
            input,
            InputEvent::Key {
                key: Key::Enter | Key::Escape | Key::Char(' '),
                ..
            }
        )
    }

    pub fn draw(&self, screen: &mut Screen) -> std::io::Result<()> {
        let body = wrap(&self.message, ALERT_WIDTH as usize - 4);
        let height = body.len() as u16 + 6;
        let rect = Rect::centered(ALERT_WIDTH, height, screen.size());

        screen.draw_box(rect, Some(&self.title), Style::new().bold())?;

        let mut row = rect.y + 2;
        for line in &body {
            screen.put(rect.x + 2, row, line, Style::new())?;
            row += 1;
        }

        let button = "[ Ok ]";
        let x = rect.x + (rect.width - button.len() as u16) / 2;
        screen.put(x, rect.y + height - 2, button, Style::new().bold().reverse())?;
        Ok(())
    }
}
