//! Single-line text editor state.

use unicode_width::UnicodeWidthChar;

use super::event::{Key, Modifiers};

/// Text content and cursor for one input field. The cursor is a character
/// index, not a byte index.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Handles a key press. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        match key {
            Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
                self.insert_char(c);
                true
            }
            Key::Backspace => {
                self.delete_back();
                true
            }
            Key::Delete => {
                self.delete_forward();
                true
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                true
            }
            Key::Home => {
                self.cursor = 0;
                true
            }
            Key::End => {
                self.cursor = self.char_count();
                true
            }
            _ => false,
        }
    }

    /// Visible slice of the text for a field of `width` columns, plus the
    /// cursor's column offset inside it. Scrolls horizontally so the cursor
    /// stays in view.
    pub fn view(&self, width: u16) -> (String, u16) {
        let width = width.max(1) as usize;
        let chars: Vec<char> = self.text.chars().collect();

        // Window of characters starting so the cursor fits. One column is
        // reserved for the cursor sitting past the end of the text.
        let mut start = 0;
        loop {
            let mut cols = 0;
            let mut fits = true;
            for c in &chars[start..self.cursor] {
                cols += c.width().unwrap_or(0);
                if cols >= width {
                    fits = false;
                    break;
                }
            }
            if fits || start >= self.cursor {
                break;
            }
            start += 1;
        }

        let mut visible = String::new();
        let mut cols = 0;
        for c in &chars[start..] {
            let w = c.width().unwrap_or(0);
            if cols + w > width {
                break;
            }
            visible.push(*c);
            cols += w;
        }

        let cursor_col: usize = chars[start..self.cursor]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        (visible, cursor_col as u16)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    fn delete_forward(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }
}

/// Convert character index to byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
