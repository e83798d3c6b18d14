//! Submission form rendering

use super::field_renderer::{
    draw_checkbox_field, draw_files_field, draw_radio_field, draw_text_field,
};
use crate::app::App;
use formgate::{FieldId, ReviewedAnswer, StatusKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Regions stacked top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Field(FieldId),
    Warning,
    Status,
}

fn regions(app: &App) -> Vec<(Region, Constraint)> {
    let mut regions = vec![
        (
            Region::Field(FieldId::OrganizationName),
            Constraint::Length(3),
        ),
        (Region::Field(FieldId::ReviewedAnswer), Constraint::Length(3)),
    ];
    if app.warning.is_some() {
        regions.push((Region::Warning, Constraint::Length(3)));
    }
    if app.dependent_visible {
        regions.push((
            Region::Field(FieldId::ChangesDescription),
            Constraint::Min(5),
        ));
        regions.push((
            Region::Field(FieldId::AgreementConfirmed),
            Constraint::Length(3),
        ));
        regions.push((Region::Field(FieldId::SignatureName), Constraint::Length(3)));
        regions.push((Region::Field(FieldId::Files), Constraint::Length(4)));
    }
    regions.push((Region::Status, Constraint::Min(4)));
    regions
}

/// Draw the whole form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            " Document Review Submission ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let regions = regions(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(regions.iter().map(|(_, c)| *c))
        .split(inner);

    for ((region, _), chunk) in regions.iter().zip(chunks.iter()) {
        match region {
            Region::Field(field) => draw_field(frame, *chunk, app, *field),
            Region::Warning => draw_warning(frame, *chunk, app),
            Region::Status => draw_status(frame, *chunk, app),
        }
    }
}

fn draw_field(frame: &mut Frame, area: Rect, app: &App, field: FieldId) {
    let form = app.controller.form();
    let is_active = app.focus == field;
    match field {
        FieldId::ReviewedAnswer => draw_radio_field(
            frame,
            area,
            field,
            &[
                ("Yes", form.reviewed_answer == ReviewedAnswer::Yes),
                ("No", form.reviewed_answer == ReviewedAnswer::No),
            ],
            is_active,
        ),
        FieldId::AgreementConfirmed => {
            draw_checkbox_field(frame, area, field, form.agreement_confirmed, is_active)
        }
        FieldId::Files => {
            let names: Vec<String> = form.selected_files.iter().map(|f| f.name.clone()).collect();
            draw_files_field(frame, area, &app.files_input, &names, is_active)
        }
        text_field => draw_text_field(
            frame,
            area,
            text_field,
            form.text(text_field).unwrap_or_default(),
            is_active,
        ),
    }
}

fn draw_warning(frame: &mut Frame, area: Rect, app: &App) {
    let Some(warning) = &app.warning else {
        return;
    };
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("⚠ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            warning.to_plain_text(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (color, text) = match &app.status {
        Some((kind, html)) => {
            let color = match kind {
                StatusKind::Info => Color::White,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            (color, html.to_plain_text())
        }
        None => (Color::DarkGray, String::new()),
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .scroll((app.status_scroll, 0))
        .block(
            Block::default()
                .title(" Status (PgUp/PgDn to scroll) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}
