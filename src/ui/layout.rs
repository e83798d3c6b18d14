//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{PREVIEW_SHORTCUT, SUBMIT_SHORTCUT};
use formgate::FieldId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Endpoint indicator
    let endpoint = if app.controller.has_endpoint() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Yellow))
    };
    spans.push(endpoint);

    spans.push(Span::styled(
        field_hints(app.focus),
        Style::default().fg(Color::DarkGray),
    ));

    if app.controller.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Submitting...", Style::default().fg(Color::Cyan)));
    } else if !app.controller.has_endpoint() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "No endpoint: submit shows JSON",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_hints(field: FieldId) -> String {
    let input = match field {
        FieldId::ReviewedAnswer => "y/n/Space:answer",
        FieldId::AgreementConfirmed => "Space:toggle",
        FieldId::Files => "paths,comma-separated  Enter:attach",
        FieldId::ChangesDescription => "Enter:newline",
        FieldId::OrganizationName | FieldId::SignatureName => "type to edit",
    };
    format!(
        "Tab:next  {input}  {}:preview  {}:submit  Esc:quit",
        PREVIEW_SHORTCUT, SUBMIT_SHORTCUT
    )
}
