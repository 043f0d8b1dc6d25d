//! Minimal terminal UI layer: screen guard, draw primitives, input state.

pub mod event;
pub mod text_input;

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal,
};
use unicode_width::UnicodeWidthStr;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size centered inside `outer`, clamped to fit.
    pub fn centered(width: u16, height: u16, outer: (u16, u16)) -> Self {
        let width = width.min(outer.0);
        let height = height.min(outer.1);
        Self {
            x: (outer.0 - width) / 2,
            y: (outer.1 - height) / 2,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Text styling for a draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    bold: bool,
    dim: bool,
    reverse: bool,
    fg: Option<Color>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }
}

/// Raw-mode alternate-screen guard with queued drawing.
///
/// Restores the terminal on drop, including after a panic.
pub struct Screen {
    stdout: io::Stdout,
    width: u16,
    height: u16,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            width,
            height,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Starts a fresh frame: re-reads the terminal size and queues a clear.
    pub fn begin_frame(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Queues text at a cell position, clipped to the screen width.
    pub fn put(&mut self, x: u16, y: u16, text: &str, style: Style) -> io::Result<()> {
        if y >= self.height || x >= self.width {
            return Ok(());
        }
        let budget = (self.width - x) as usize;
        let text = clip(text, budget);

        queue!(self.stdout, cursor::MoveTo(x, y))?;
        if style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
        }
        if let Some(color) = style.fg {
            queue!(self.stdout, SetForegroundColor(color))?;
        }
        queue!(
            self.stdout,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        Ok(())
    }

    /// Queues a bordered box, blanking its interior.
    pub fn draw_box(&mut self, rect: Rect, title: Option<&str>, style: Style) -> io::Result<()> {
        if rect.width < 2 || rect.height < 2 {
            return Ok(());
        }
        let inner = (rect.width - 2) as usize;

        let top = match title {
            Some(title) => {
                let title = clip(title, inner.saturating_sub(2));
                let used = title.width() + 2;
                format!("┌ {} {}┐", title, "─".repeat(inner.saturating_sub(used)))
            }
            None => format!("┌{}┐", "─".repeat(inner)),
        };
        self.put(rect.x, rect.y, &top, style)?;

        let blank = format!("│{}│", " ".repeat(inner));
        for row in 1..rect.height - 1 {
            self.put(rect.x, rect.y + row, &blank, style)?;
        }

        let bottom = format!("└{}┘", "─".repeat(inner));
        self.put(rect.x, rect.y + rect.height - 1, &bottom, style)?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Clips a string to at most `budget` display columns.
fn clip(text: &str, budget: usize) -> String {
    if text.width() <= budget {
        return text.to_string();
    }
    let mut out = String::new();
    let mut cols = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if cols + w > budget {
            break;
        }
        out.push(c);
        cols += w;
    }
    out
}

/// Greedy word wrap for dialog bodies.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
