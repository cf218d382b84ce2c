//! # Banner Component
//!
//! The toast shown after a send attempt, pinned to the bottom center of the
//! screen over whatever is underneath. Stateless: the notification comes from
//! core state and the banner renders nothing when it is hidden.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::notification::Notification;
use crate::tui::component::Component;

const DISMISS_HINT: &str = " Esc to dismiss ";
/// Border plus one column of padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
const BANNER_HEIGHT: u16 = 3;
/// Rows kept free between the banner and the bottom edge.
const BOTTOM_MARGIN: u16 = 1;

pub struct Banner {
    pub notification: Notification,
}

impl Banner {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }

    fn color(&self) -> Color {
        match self.notification {
            Notification::Success { .. } => Color::Green,
            _ => Color::Red,
        }
    }

    /// Where the banner lands inside `outer`, or `None` when there is nothing to show.
    pub fn area(&self, outer: Rect) -> Option<Rect> {
        let text = self.notification.text()?;
        let wanted = (text.width().max(DISMISS_HINT.width()) as u16) + HORIZONTAL_OVERHEAD;
        let width = wanted.min(outer.width);
        let height = BANNER_HEIGHT.min(outer.height);
        let bottom = outer.y + outer.height;
        let y = bottom.saturating_sub(height + BOTTOM_MARGIN).max(outer.y);

        Some(Rect {
            x: outer.x + (outer.width - width) / 2,
            y,
            width,
            height,
        })
    }
}

impl Component for Banner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (Some(text), Some(banner_area)) = (self.notification.text(), self.area(area)) else {
            return;
        };
        let color = self.color();

        frame.render_widget(Clear, banner_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title_bottom(
                Line::from(Span::styled(
                    DISMISS_HINT,
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            );

        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);

        frame.render_widget(paragraph, banner_area);
    }
}
