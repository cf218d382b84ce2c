//! Cursor, goal column and scroll offset for one text field.
//!
//! The text lives in the form, so every method takes the buffer. Multi-line
//! fields scroll by rows, single-line fields by display columns.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::layout::{BORDER, column_of, offset_at_column, row_of, wrap_rows};

pub(super) struct CursorState {
    /// Byte offset into the buffer
    pub pos: usize,
    /// First visible row (message) or column (single-line fields)
    pub scroll: u16,
    /// Column vertical moves aim for, so passing a short line doesn't lose it
    pub goal_column: Option<u16>,
    /// Text columns at the last render
    pub text_width: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll: 0,
            goal_column: None,
            text_width: 56,
        }
    }

    /// Pull the cursor back inside `buffer`. The form is cleared from outside
    /// the field after a successful send.
    pub fn clamp(&mut self, buffer: &str) {
        if !buffer.is_char_boundary(self.pos) {
            self.pos = buffer.len();
        }
        if buffer.is_empty() {
            self.scroll = 0;
            self.goal_column = None;
        }
    }

    /// Move one row up (`-1`) or down (`1`). Returns `false` at the edge.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let rows = wrap_rows(buffer, self.text_width);
        let current = row_of(&rows, self.pos);
        let Some(target) = current
            .checked_add_signed(isize::from(direction))
            .filter(|t| *t < rows.len())
        else {
            return false;
        };

        let column = *self
            .goal_column
            .get_or_insert_with(|| column_of(buffer, rows[current], self.pos));
        self.pos = offset_at_column(buffer, rows[target], column);
        true
    }

    /// Scroll just enough to keep the cursor inside the viewport.
    pub fn follow(&mut self, buffer: &str, multiline: bool, max_rows: u16) {
        let (at, span) = if multiline {
            let rows = wrap_rows(buffer, self.text_width);
            if rows.len() <= usize::from(max_rows) {
                self.scroll = 0;
                return;
            }
            (row_of(&rows, self.pos) as u16, max_rows)
        } else {
            (buffer[..self.pos].width() as u16, self.text_width.max(1))
        };

        if at < self.scroll {
            self.scroll = at;
        } else if at >= self.scroll + span {
            self.scroll = at + 1 - span;
        }
    }

    /// Terminal cell of the cursor inside a field drawn at `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect, multiline: bool) -> (u16, u16) {
        let (row, column) = if multiline {
            let rows = wrap_rows(buffer, self.text_width);
            let row = row_of(&rows, self.pos);
            (
                (row as u16).saturating_sub(self.scroll),
                column_of(buffer, rows[row], self.pos),
            )
        } else {
            (0, (buffer[..self.pos].width() as u16).saturating_sub(self.scroll))
        };

        (
            area.x + BORDER + column.min(self.text_width),
            area.y + BORDER + row,
        )
    }
}
