use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Banner, FormView, Header};

/// The card never grows wider than this.
const MAX_FORM_WIDTH: u16 = 64;
const KEY_HINTS: &str = "Tab next · Enter/Ctrl+S send · Ctrl+J newline · Esc quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [body_area, footer_area] = Layout::vertical([Min(0), Length(1)]).areas(frame.area());

    let form_width = form_width(body_area.width);
    let mut header = Header::new(&app.page.title, &app.page.description);
    let header_height = header.required_height();
    let form_height = tui.form_view.height(&app.form, form_width);

    let [header_area, _, form_row] = Layout::vertical([
        Length(header_height),
        Length(1),
        Length(form_height),
    ])
    .flex(Flex::Center)
    .areas(body_area);

    header.render(frame, header_area);

    let [form_area] = Layout::horizontal([Length(form_width)])
        .flex(Flex::Center)
        .areas(form_row);
    FormView::new(
        &mut tui.form_view,
        &app.form,
        &app.page.heading,
        app.submit_label(),
        app.loading,
    )
    .render(frame, form_area);

    draw_footer(frame, footer_area, app, tui);

    Banner::new(app.notification).render(frame, body_area);
}

/// Card width for a body `width` columns wide.
fn form_width(width: u16) -> u16 {
    (width.saturating_mul(95) / 100).min(MAX_FORM_WIDTH)
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    let status = match &tui.validation_hint {
        Some(hint) => Span::styled(hint.as_str(), Style::default().fg(Color::Red)),
        None => Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Gray),
        ),
    };

    // Key hints only when they fit beside the status text
    let hints_width = KEY_HINTS.width() as u16;
    if (status.content.width() as u16) + hints_width + 2 > area.width {
        frame.render_widget(Paragraph::new(Line::from(status)), area);
        return;
    }

    let [status_area, hints_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(hints_width)]).areas(area);
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            KEY_HINTS,
            Style::default().fg(Color::DarkGray),
        ))),
        hints_area,
    );
}
