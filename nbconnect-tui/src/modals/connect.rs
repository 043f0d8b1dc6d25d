//! The connect-to-existing-kernel form dialog.

use nbconnect_lib::{ConnectRequest, Transport};

use crate::ui::event::{InputEvent, Key};
use crate::ui::text_input::TextInput;
use crate::ui::{Rect, Screen, Style, wrap};

const MESSAGE: &str = "Connect to an existing kernel launched outside of the notebook. \
Enter the full path to the connection file, or just the base name if the kernel \
was started in the usual way.";

const DIALOG_WIDTH: u16 = 58;
const DIALOG_HEIGHT: u16 = 16;
const LABEL_COL: u16 = 2;
const FIELD_COL: u16 = 20;
const FIELD_WIDTH: u16 = 34;

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ConnectionFile,
    Server,
    Port,
    Transport,
    ConnectButton,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::ConnectionFile => Self::Server,
            Self::Server => Self::Port,
            Self::Port => Self::Transport,
            Self::Transport => Self::ConnectButton,
            Self::ConnectButton => Self::ConnectionFile,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::ConnectionFile => Self::ConnectButton,
            Self::Server => Self::ConnectionFile,
            Self::Port => Self::Server,
            Self::Transport => Self::Port,
            Self::ConnectButton => Self::Transport,
        }
    }
}

/// What the dialog resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDialogEvent {
    /// The user hit Connect with these parameters.
    Submit(ConnectRequest),
    /// The user dismissed the dialog; nothing happens.
    Cancel,
}

/// Modal form collecting connection parameters.
///
/// All fields may be left empty. The transport radio shows `ipc` selected
/// from the start, but the parameter is only sent once the user has actually
/// made a choice.
#[derive(Debug, Default)]
pub struct ConnectDialog {
    connection_file: TextInput,
    server: TextInput,
    port: TextInput,
    transport: Option<Transport>,
    focus: Option<Field>,
}

impl ConnectDialog {
    pub fn new() -> Self {
        Self {
            focus: Some(Field::ConnectionFile),
            ..Self::default()
        }
    }

    /// Handles one input event. Returns the dialog's resolution once the
    /// user submits or cancels; `None` keeps the dialog open.
    pub fn handle_input(&mut self, input: &InputEvent) -> Option<ConnectDialogEvent> {
        let InputEvent::Key { key, modifiers } = input else {
            return None;
        };
        let focus = self.focus.unwrap_or(Field::ConnectionFile);

        match key {
            Key::Escape => return Some(ConnectDialogEvent::Cancel),
            Key::Enter => return Some(ConnectDialogEvent::Submit(self.request())),
            Key::Tab | Key::Down => {
                self.focus = Some(focus.next());
                return None;
            }
            Key::BackTab | Key::Up => {
                self.focus = Some(focus.prev());
                return None;
            }
            _ => {}
        }

        match focus {
            Field::ConnectionFile => {
                self.connection_file.handle_key(*key, *modifiers);
            }
            Field::Server => {
                self.server.handle_key(*key, *modifiers);
            }
            Field::Port => {
                self.port.handle_key(*key, *modifiers);
            }
            Field::Transport => match key {
                Key::Left | Key::Char(' ') => self.transport = Some(Transport::Ipc),
                Key::Right => self.transport = Some(Transport::Tcp),
                _ => {}
            },
            Field::ConnectButton => {}
        }
        None
    }

    /// Builds the request from the current field values. Empty fields
    /// normalize to absent inside `ConnectRequest`.
    pub fn request(&self) -> ConnectRequest {
        let mut request = ConnectRequest::new()
            .connection_file(self.connection_file.text())
            .server(self.server.text())
            .port(self.port.text());
        if let Some(transport) = self.transport {
            request = request.transport(transport);
        }
        request
    }

    /// Transport shown as selected: the user's choice, or the `ipc` default.
    fn shown_transport(&self) -> Transport {
        self.transport.unwrap_or_default()
    }

    pub fn draw(&self, screen: &mut Screen) -> std::io::Result<()> {
        let rect = Rect::centered(DIALOG_WIDTH, DIALOG_HEIGHT, screen.size());
        screen.draw_box(rect, Some("Connect to an existing kernel"), Style::new())?;

        let mut row = rect.y + 1;
        for line in wrap(MESSAGE, DIALOG_WIDTH as usize - 4) {
            screen.put(rect.x + LABEL_COL, row, &line, Style::new().dim())?;
            row += 1;
        }
        row += 1;

        let focus = self.focus.unwrap_or(Field::ConnectionFile);
        let fields = [
            ("Connection file:", &self.connection_file, Field::ConnectionFile),
            ("Server:", &self.server, Field::Server),
            ("Port:", &self.port, Field::Port),
        ];
        for (label, input, field) in fields {
            self.draw_field(screen, rect, row, label, input, focus == field)?;
            row += 1;
        }

        self.draw_transport(screen, rect, row, focus == Field::Transport)?;
        row += 2;

        let button = "[ Connect ]";
        let style = if focus == Field::ConnectButton {
            Style::new().bold().reverse()
        } else {
            Style::new().bold()
        };
        let x = rect.x + (rect.width - button.len() as u16) / 2;
        screen.put(x, row, button, style)?;

        let hint = "Tab: next field   Enter: connect   Esc: cancel";
        screen.put(
            rect.x + LABEL_COL,
            rect.y + rect.height - 2,
            hint,
            Style::new().dim(),
        )?;
        Ok(())
    }

    fn draw_field(
        &self,
        screen: &mut Screen,
        rect: Rect,
        row: u16,
        label: &str,
        input: &TextInput,
        focused: bool,
    ) -> std::io::Result<()> {
        // Right-aligned label, left-aligned value.
        let label_x = rect.x + FIELD_COL - 1 - label.len() as u16;
        screen.put(label_x, row, label, Style::new())?;

        let (visible, cursor_col) = input.view(FIELD_WIDTH);
        let field_x = rect.x + FIELD_COL;
        screen.put(field_x, row, &visible, Style::new())?;

        if focused {
            let cursor_char = visible
                .chars()
                .nth(cursor_col as usize)
                .unwrap_or(' ')
                .to_string();
            screen.put(field_x + cursor_col, row, &cursor_char, Style::new().reverse())?;
        }
        Ok(())
    }

    fn draw_transport(
        &self,
        screen: &mut Screen,
        rect: Rect,
        row: u16,
        focused: bool,
    ) -> std::io::Result<()> {
        let label = "Transport:";
        let label_x = rect.x + FIELD_COL - 1 - label.len() as u16;
        screen.put(label_x, row, label, Style::new())?;

        let shown = self.shown_transport();
        let ipc = if shown == Transport::Ipc { "(•) ipc" } else { "( ) ipc" };
        let tcp = if shown == Transport::Tcp { "(•) tcp" } else { "( ) tcp" };
        let style = if focused {
            Style::new().reverse()
        } else {
            Style::new()
        };
        screen.put(rect.x + FIELD_COL, row, ipc, style)?;
        screen.put(rect.x + FIELD_COL + 9, row, tcp, style)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::event::Modifiers;

    fn key(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }

    fn type_str(dialog: &mut ConnectDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_input(&key(Key::Char(c)));
        }
    }

    #[test]
    fn test_untouched_form_submits_empty_request() {
        let mut dialog = ConnectDialog::new();
        let event = dialog.handle_input(&key(Key::Enter)).unwrap();
        assert_eq!(event, ConnectDialogEvent::Submit(ConnectRequest::new()));
    }

    #[test]
    fn test_default_transport_is_not_sent_until_chosen() {
        let dialog = ConnectDialog::new();
        assert!(dialog.request().query_pairs().is_empty());
        assert_eq!(dialog.shown_transport(), Transport::Ipc);
    }

    #[test]
    fn test_typed_fields_flow_into_request() {
        let mut dialog = ConnectDialog::new();
        type_str(&mut dialog, "k.json");
        dialog.handle_input(&key(Key::Tab));
        type_str(&mut dialog, "remote");
        dialog.handle_input(&key(Key::Tab));
        type_str(&mut dialog, "9999");

        assert_eq!(
            dialog.request().query_pairs(),
            vec![("conn_file", "k.json"), ("server", "remote"), ("port", "9999")]
        );
    }

    #[test]
    fn test_transport_choice_is_sent() {
        let mut dialog = ConnectDialog::new();
        // Tab to the transport radio and pick tcp.
        for _ in 0..3 {
            dialog.handle_input(&key(Key::Tab));
        }
        dialog.handle_input(&key(Key::Right));

        assert_eq!(dialog.request().query_pairs(), vec![("transport", "tcp")]);

        dialog.handle_input(&key(Key::Left));
        assert_eq!(dialog.request().query_pairs(), vec![("transport", "ipc")]);
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = ConnectDialog::new();
        type_str(&mut dialog, "something");
        assert_eq!(
            dialog.handle_input(&key(Key::Escape)),
            Some(ConnectDialogEvent::Cancel)
        );
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut dialog = ConnectDialog::new();
        for _ in 0..5 {
            dialog.handle_input(&key(Key::Tab));
        }
        assert_eq!(dialog.focus, Some(Field::ConnectionFile));

        dialog.handle_input(&key(Key::BackTab));
        assert_eq!(dialog.focus, Some(Field::ConnectButton));
    }
}
