//! Host toolbar and the Existing-button install hook.

use log::warn;

use crate::ui::{Rect, Screen, Style};

/// Id of the host's own new-notebook control, the anchor the Existing
/// button installs itself next to.
pub const NEW_BUTTON: &str = "new";

/// Id of the connect-to-existing-kernel button this client installs.
pub const EXISTING_BUTTON: &str = "existing";

/// Screen row the toolbar is drawn on.
pub const TOOLBAR_ROW: u16 = 2;

const TOOLBAR_START_X: u16 = 2;
const BUTTON_GAP: u16 = 1;

/// One toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub id: &'static str,
    pub label: &'static str,
}

/// The host toolbar: a row of labeled buttons.
#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    /// Toolbar as the host application sets it up, before any install.
    pub fn host_default() -> Self {
        Self {
            buttons: vec![ToolbarButton {
                id: NEW_BUTTON,
                label: "New",
            }],
        }
    }

    /// Installs the "Existing" button immediately after the "New" control.
    ///
    /// If the anchor is missing the toolbar is left untouched; the install
    /// is a logged no-op rather than inserting at some arbitrary spot.
    /// Returns whether the button was installed.
    pub fn install_existing_button(&mut self) -> bool {
        let Some(anchor) = self.buttons.iter().position(|b| b.id == NEW_BUTTON) else {
            warn!("toolbar has no '{NEW_BUTTON}' control, Existing button not installed");
            return false;
        };
        self.buttons.insert(
            anchor + 1,
            ToolbarButton {
                id: EXISTING_BUTTON,
                label: "Existing",
            },
        );
        true
    }

    pub fn buttons(&self) -> &[ToolbarButton] {
        &self.buttons
    }

    /// Returns the id of the button at a screen position, if any.
    pub fn hit(&self, x: u16, y: u16) -> Option<&'static str> {
        self.spans()
            .into_iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, id)| id)
    }

    pub fn draw(&self, screen: &mut Screen) -> std::io::Result<()> {
        for (rect, id) in self.spans() {
            let button = self
                .buttons
                .iter()
                .find(|b| b.id == id)
                .map(|b| format!("[ {} ]", b.label))
                .unwrap_or_default();
            let style = if id == EXISTING_BUTTON {
                Style::new().bold()
            } else {
                Style::new()
            };
            screen.put(rect.x, rect.y, &button, style)?;
        }
        Ok(())
    }

    /// Screen extents of each button, in toolbar order.
    fn spans(&self) -> Vec<(Rect, &'static str)> {
        let mut spans = Vec::with_capacity(self.buttons.len());
        let mut x = TOOLBAR_START_X;
        for button in &self.buttons {
            // "[ label ]"
            let width = button.label.len() as u16 + 4;
            spans.push((Rect::new(x, TOOLBAR_ROW, width, 1), button.id));
            x += width + BUTTON_GAP;
        }
        spans
    }
}
