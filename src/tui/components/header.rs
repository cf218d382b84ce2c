//! # Header Component
//!
//! Page title and one-line description above the contact card.
//!
//! Stateless, props-in-struct: the copy comes from `[page]` in the config
//! file and the header just renders what it is given.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

pub struct Header<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, description: &'a str) -> Self {
        Self { title, description }
    }

    /// Title, blank line, description.
    pub fn required_height(&self) -> u16 {
        if self.description.is_empty() { 1 } else { 3 }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];

        if !self.description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                self.description,
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(header: &mut Header) -> String {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_title_and_description() {
        let mut header = Header::new("Contact", "Get in touch.");
        let text = render(&mut header);

        assert!(text.contains("Contact"));
        assert!(text.contains("Get in touch."));
        assert_eq!(header.required_height(), 3);
    }

    #[test]
    fn test_header_without_description_is_one_line() {
        let mut header = Header::new("Contact", "");
        assert_eq!(header.required_height(), 1);
        assert!(render(&mut header).contains("Contact"));
    }

    #[test]
    fn test_title_is_centered() {
        let backend = TestBackend::new(20, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Header::new("Hi", "").render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), " ");
        assert_eq!(buffer[(9, 0)].symbol(), "H");
    }
}
