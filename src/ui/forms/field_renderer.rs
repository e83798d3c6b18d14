//! Field rendering utilities for forms

use formgate::FieldId;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(title: String, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a free-text field
pub fn draw_text_field(frame: &mut Frame, area: Rect, field: FieldId, value: &str, is_active: bool) {
    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = if value.is_empty() && !is_active {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect()
    };

    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(field_block(field.label().to_string(), is_active));
    frame.render_widget(paragraph, area);
}

/// Draw a row of mutually exclusive options, marking `selected`
pub fn draw_radio_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldId,
    options: &[(&str, bool)],
    is_active: bool,
) {
    let mut spans = Vec::new();
    for (label, selected) in options {
        let marker = if *selected { "(●) " } else { "( ) " };
        let style = if *selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{marker}{label}   "), style));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).block(field_block(field.label().to_string(), is_active));
    frame.render_widget(paragraph, area);
}

/// Draw a checkbox with its label inside the box
pub fn draw_checkbox_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldId,
    checked: bool,
    is_active: bool,
) {
    let marker = if checked { "[x] " } else { "[ ] " };
    let style = if checked {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(marker, style),
        Span::raw(field.label()),
    ]))
    .block(field_block("Agreement".to_string(), is_active));
    frame.render_widget(paragraph, area);
}

/// Draw the file input: typed paths plus the accepted selection
pub fn draw_files_field(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    selected: &[String],
    is_active: bool,
) {
    let cursor = if is_active { "▌" } else { "" };
    let selected_line = if selected.is_empty() {
        Line::from(Span::styled(
            "No files selected",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!("Selected: {}", selected.join(", ")),
            Style::default().fg(Color::Green),
        ))
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]),
        selected_line,
    ];

    let title = format!("{} ({} selected)", FieldId::Files.label(), selected.len());
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(field_block(title, is_active));
    frame.render_widget(paragraph, area);
}
