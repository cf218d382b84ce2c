//! # TextField Component
//!
//! One labeled input of the contact form. Name, email and subject are single
//! rows that scroll sideways under the cursor; the message wraps and scrolls
//! by rows once it outgrows its box.
//!
//! ## State Management
//!
//! The text is a prop: it lives in `App::form` and is handed in per render
//! and per event. The field only keeps its cursor (`CursorState`).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TextFieldState` lives in the form view and handles events
//! - `TextField` is created each frame with borrowed state and value

mod cursor;
mod edit;
mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::Field;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use layout::{BORDER, text_width, visible_columns, wrap_rows};

/// Visible lines for the message area before it starts scrolling.
const MESSAGE_MAX_LINES: u16 = 5;
/// The message area never shrinks below this many lines.
const MESSAGE_MIN_LINES: u16 = 3;

/// High-level events emitted by a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The value or cursor changed
    Changed,
    /// Move focus to the next field
    FocusNext,
    /// Move focus to the previous field
    FocusPrev,
    /// Submit the form
    Submit,
}

/// Persistent per-field state.
pub struct TextFieldState {
    pub field: Field,
    cursor: CursorState,
}

impl TextFieldState {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            cursor: CursorState::new(),
        }
    }

    fn max_lines(&self) -> u16 {
        if self.field.is_multiline() { MESSAGE_MAX_LINES } else { 1 }
    }

    /// Rows needed to show `value` at `width`, borders included.
    pub fn height(&self, value: &str, width: u16) -> u16 {
        let rows = if self.field.is_multiline() {
            let wrapped = wrap_rows(value, text_width(width)).len() as u16;
            wrapped.clamp(MESSAGE_MIN_LINES, MESSAGE_MAX_LINES)
        } else {
            1
        };
        rows + 2 * BORDER
    }

    fn insert(&mut self, buffer: &mut String, text: &str) {
        self.cursor.clamp(buffer);
        buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl EventHandler for TextFieldState {
    type Model = String;
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent, buffer: &mut String) -> Option<FieldEvent> {
        self.cursor.clamp(buffer);
        let multiline = self.field.is_multiline();
        if !matches!(event, TuiEvent::CursorUp | TuiEvent::CursorDown) {
            self.cursor.goal_column = None;
        }

        match event {
            TuiEvent::InputChar('\n') if !multiline => Some(FieldEvent::FocusNext),
            TuiEvent::InputChar(c) => {
                self.insert(buffer, c.encode_utf8(&mut [0; 4]));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = if multiline {
                    text.replace("\r\n", "\n")
                } else {
                    text.replace(['\r', '\n'], " ")
                };
                self.insert(buffer, &text);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = edit::char_left(buffer, self.cursor.pos);
                buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                FieldEvent::Changed
            }),
            TuiEvent::DeleteWordBack => (self.cursor.pos > 0).then(|| {
                let start = edit::word_left(buffer, self.cursor.pos);
                buffer.drain(start..self.cursor.pos);
                self.cursor.pos = start;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor.pos < buffer.len()).then(|| {
                let next = edit::char_right(buffer, self.cursor.pos);
                buffer.drain(self.cursor.pos..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = edit::char_left(buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor.pos < buffer.len()).then(|| {
                self.cursor.pos = edit::char_right(buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::WordLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = edit::word_left(buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::WordRight => (self.cursor.pos < buffer.len()).then(|| {
                self.cursor.pos = edit::word_right(buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let start = edit::line_start(buffer, self.cursor.pos);
                (self.cursor.pos != start).then(|| {
                    self.cursor.pos = start;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let end = edit::line_end(buffer, self.cursor.pos);
                (self.cursor.pos != end).then(|| {
                    self.cursor.pos = end;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorUp => {
                if multiline && self.cursor.move_vertically(buffer, -1) {
                    Some(FieldEvent::Changed)
                } else {
                    Some(FieldEvent::FocusPrev)
                }
            }
            TuiEvent::CursorDown => {
                if multiline && self.cursor.move_vertically(buffer, 1) {
                    Some(FieldEvent::Changed)
                } else {
                    Some(FieldEvent::FocusNext)
                }
            }
            TuiEvent::Submit if multiline => Some(FieldEvent::Submit),
            TuiEvent::Submit => Some(FieldEvent::FocusNext),
            TuiEvent::SubmitForm => Some(FieldEvent::Submit),
            TuiEvent::NextField => Some(FieldEvent::FocusNext),
            TuiEvent::PrevField => Some(FieldEvent::FocusPrev),
            _ => None,
        }
    }
}

/// Transient render wrapper for one field.
pub struct TextField<'a> {
    state: &'a mut TextFieldState,
    value: &'a str,
    focused: bool,
}

impl<'a> TextField<'a> {
    pub fn new(state: &'a mut TextFieldState, value: &'a str, focused: bool) -> Self {
        Self {
            state,
            value,
            focused,
        }
    }

    /// What the field shows at the current scroll offset.
    fn visible_lines(&self) -> Vec<Line<'a>> {
        let cursor = &self.state.cursor;
        if !self.state.field.is_multiline() {
            return vec![Line::raw(visible_columns(self.value, cursor.scroll, cursor.text_width))];
        }

        let value = self.value;
        wrap_rows(value, cursor.text_width)
            .into_iter()
            .skip(usize::from(cursor.scroll))
            .take(usize::from(self.state.max_lines()))
            .map(|row| Line::raw(&value[row.start..row.end]))
            .collect()
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let max_lines = self.state.max_lines();
        let total = wrap_rows(self.value, self.state.cursor.text_width).len() as u16;
        if max_lines == 1 || total <= max_lines {
            return;
        }

        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total.saturating_sub(max_lines) as usize)
            .position(usize::from(self.state.cursor.scroll));

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for TextField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let max_lines = self.state.max_lines();
        let multiline = self.state.field.is_multiline();
        let cursor = &mut self.state.cursor;
        cursor.clamp(self.value);
        cursor.text_width = text_width(area.width);
        cursor.follow(self.value, multiline, max_lines);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.state.field.label());

        let paragraph = if self.value.is_empty() {
            Paragraph::new(self.state.field.placeholder())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            Paragraph::new(self.visible_lines()).style(Style::default().fg(Color::White))
        };

        frame.render_widget(paragraph.block(block), area);
        self.render_scrollbar(frame, area);

        if self.focused {
            frame.set_cursor_position(self.state.cursor.screen_pos(self.value, area, multiline));
        }
    }
}
