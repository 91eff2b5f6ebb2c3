//! Shared rendering utilities and helpers.
//!
//! Components draw into a [`Frame`], an in-memory buffer of text and ANSI
//! escape sequences, instead of printing directly. The front end writes the
//! finished frame to the terminal in one go; tests inspect it as a string.
//!
//! # Features
//!
//! - **Cursor Positioning**: Absolute row/column moves
//! - **Match Highlighting**: Renders text with highlighted character ranges
//! - **UTF-8 Safe**: Operates on character indices, not byte indices
//!
//! # Example
//!
//! ```rust
//! use notehub::ui::helpers::{render_highlighted_text, Frame};
//! use notehub::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut frame = Frame::new();
//! render_highlighted_text(&mut frame, "groceries", &[(0, 2)], &theme);
//! assert!(frame.as_str().contains("oceries"));
//! ```

use crate::ui::theme::Theme;
use std::fmt::{self, Write};

/// Buffer a screen is rendered into.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`.
    pub fn print(&mut self, text: impl fmt::Display) {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{text}");
    }

    /// Moves the cursor to `row`, `col` (1-indexed) using `\u{1b}[{row};{col}H`.
    pub fn position_cursor(&mut self, row: usize, col: usize) {
        self.print(format_args!("\u{1b}[{row};{col}H"));
    }

    /// Clears the screen and homes the cursor.
    pub fn clear(&mut self) {
        self.print("\u{1b}[2J\u{1b}[H");
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Number of characters (not bytes) in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices with exclusive ends. After
/// each highlighted section the normal text color is restored.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
) {
    if ranges.is_empty() {
        frame.print(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            frame.print(normal_section);
        }

        frame.print(Theme::fg(&theme.colors.match_highlight_fg));
        frame.print(Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        frame.print(highlighted_section);
        frame.print(Theme::reset());
        frame.print(Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        frame.print(remaining);
    }
}

/// Prints `text` centered in `cols`, padded on both sides.
pub fn print_centered(frame: &mut Frame, text: &str, cols: usize) {
    let len = char_len(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    frame.print(" ".repeat(padding));
    frame.print(text);
    frame.print(" ".repeat(cols.saturating_sub(padding + len)));
}
