//! Alert dialog component

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{style::Color, text::Span, Frame};

/// Render a blocking alert centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, message: &str) {
    let hint = vec![
        Span::raw("Press "),
        key_span("Enter"),
        Span::raw(" or "),
        key_span("Esc"),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Attention",
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message,
            hint: Some(hint),
            max_width: 60,
        },
    );
}
