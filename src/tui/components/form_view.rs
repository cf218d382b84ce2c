//! # Form View
//!
//! The contact card: heading, the four text fields and the submit control.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FormViewState` lives in `TuiState` (focus + per-field cursors)
//! - `FormView` is created each frame with the current form values as props
//!
//! The submit control is not focusable. Enter on the message field (or
//! Ctrl+S anywhere) submits, which is the terminal equivalent of clicking it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::form::{ContactForm, Field};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField, TextFieldState};
use crate::tui::event::TuiEvent;

/// Rows (and columns) used by the card border and padding.
const CARD_VERTICAL_OVERHEAD: u16 = 4;
/// Rows used by the heading and the gap below it.
const HEADING_HEIGHT: u16 = 2;
const BUTTON_HEIGHT: u16 = 3;

/// Events emitted by the form view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user asked to send the form
    Submit,
    /// A field's value or the focus changed
    Edited,
}

/// Persistent state for the form: which field has focus and each field's cursor.
pub struct FormViewState {
    pub focus: Field,
    fields: [TextFieldState; 4],
}

impl Default for FormViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormViewState {
    pub fn new() -> Self {
        Self {
            focus: Field::Name,
            fields: Field::ALL.map(TextFieldState::new),
        }
    }

    fn index(field: Field) -> usize {
        Field::ALL.iter().position(|f| *f == field).unwrap_or(0)
    }

    fn field_state(&mut self, field: Field) -> &mut TextFieldState {
        &mut self.fields[Self::index(field)]
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focus = field;
    }

    /// Total rows needed to draw the card at `width`.
    pub fn height(&self, form: &ContactForm, width: u16) -> u16 {
        let inner = width.saturating_sub(4);
        let fields: u16 = self
            .fields
            .iter()
            .map(|state| state.height(form.get(state.field), inner))
            .sum();
        CARD_VERTICAL_OVERHEAD + HEADING_HEIGHT + fields + BUTTON_HEIGHT
    }
}

impl EventHandler for FormViewState {
    type Model = ContactForm;
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent, form: &mut ContactForm) -> Option<FormEvent> {
        let focus = self.focus;
        let field_event = self
            .field_state(focus)
            .handle_event(event, form.get_mut(focus))?;

        match field_event {
            FieldEvent::Changed => Some(FormEvent::Edited),
            FieldEvent::FocusNext => {
                self.focus = focus.next();
                Some(FormEvent::Edited)
            }
            FieldEvent::FocusPrev => {
                self.focus = focus.prev();
                Some(FormEvent::Edited)
            }
            FieldEvent::Submit => Some(FormEvent::Submit),
        }
    }
}

/// Transient render wrapper for the contact card.
pub struct FormView<'a> {
    state: &'a mut FormViewState,
    form: &'a ContactForm,
    heading: &'a str,
    submit_label: &'a str,
    submit_disabled: bool,
}

impl<'a> FormView<'a> {
    pub fn new(
        state: &'a mut FormViewState,
        form: &'a ContactForm,
        heading: &'a str,
        submit_label: &'a str,
        submit_disabled: bool,
    ) -> Self {
        Self {
            state,
            form,
            heading,
            submit_label,
            submit_disabled,
        }
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        // Dimmed while a send is in flight
        let style = if self.submit_disabled {
            Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        };

        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::raw(self.submit_label)),
            Line::default(),
        ])
        .alignment(Alignment::Center)
        .style(style);

        frame.render_widget(button, area);
    }
}

impl Component for FormView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let card = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue))
            .padding(Padding::uniform(1));
        let inner = card.inner(area);
        frame.render_widget(card, area);

        let mut constraints = vec![Constraint::Length(HEADING_HEIGHT)];
        for state in &self.state.fields {
            constraints.push(Constraint::Length(
                state.height(self.form.get(state.field), inner.width),
            ));
        }
        constraints.push(Constraint::Length(BUTTON_HEIGHT));
        let rows = Layout::vertical(constraints).split(inner);

        let heading = Paragraph::new(Line::from(Span::styled(
            self.heading,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(heading, rows[0]);

        let focus = self.state.focus;
        for (i, state) in self.state.fields.iter_mut().enumerate() {
            let field = state.field;
            TextField::new(state, self.form.get(field), field == focus).render(frame, rows[i + 1]);
        }

        self.render_button(frame, rows[rows.len() - 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(state: &mut FormViewState, form: &mut ContactForm, s: &str) {
        for c in s.chars() {
            state.handle_event(&TuiEvent::InputChar(c), form);
        }
    }

    fn render_text(state: &mut FormViewState, form: &ContactForm, label: &str, disabled: bool) -> String {
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                FormView::new(state, form, "Email Me", label, disabled).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = FormViewState::new();
        let mut form = ContactForm::new();

        type_str(&mut state, &mut form, "Ada");
        state.handle_event(&TuiEvent::NextField, &mut form);
        type_str(&mut state, &mut form, "ada@x.com");

        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@x.com");
        assert_eq!(state.focus, Field::Email);
    }

    #[test]
    fn test_enter_walks_fields_then_submits() {
        let mut state = FormViewState::new();
        let mut form = ContactForm::new();

        for expected in [Field::Email, Field::Title, Field::Message] {
            assert_eq!(
                state.handle_event(&TuiEvent::Submit, &mut form),
                Some(FormEvent::Edited)
            );
            assert_eq!(state.focus, expected);
        }
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &mut form),
            Some(FormEvent::Submit)
        );
    }

    #[test]
    fn test_shift_tab_wraps_to_message() {
        let mut state = FormViewState::new();
        let mut form = ContactForm::new();
        state.handle_event(&TuiEvent::PrevField, &mut form);
        assert_eq!(state.focus, Field::Message);
    }

    #[test]
    fn test_ctrl_s_submits_from_any_field() {
        let mut state = FormViewState::new();
        let mut form = ContactForm::new();
        state.focus_field(Field::Email);
        assert_eq!(
            state.handle_event(&TuiEvent::SubmitForm, &mut form),
            Some(FormEvent::Submit)
        );
    }

    #[test]
    fn test_height_grows_with_message() {
        let state = FormViewState::new();
        let mut form = ContactForm::new();
        let empty = state.height(&form, 60);

        form.message = "1\n2\n3\n4\n5".to_string();
        assert_eq!(state.height(&form, 60), empty + 2);
    }

    #[test]
    fn test_render_shows_fields_and_send() {
        let mut state = FormViewState::new();
        let form = ContactForm::new();
        let text = render_text(&mut state, &form, "Send", false);

        assert!(text.contains("Email Me"));
        assert!(text.contains("Your Name"));
        assert!(text.contains("Your Email"));
        assert!(text.contains("Subject"));
        assert!(text.contains("Message"));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_render_sending_label() {
        let mut state = FormViewState::new();
        let form = ContactForm::new();
        let text = render_text(&mut state, &form, "Sending...", true);
        assert!(text.contains("Sending..."));
    }
}
