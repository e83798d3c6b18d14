//! Preview overlay

use super::base::{key_span, render_dialog, DialogConfig};
use formgate::PreviewDocument;
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

/// Plain-text body of the preview, one `Label: value` line per row
pub fn preview_text(document: &PreviewDocument) -> String {
    document
        .rows
        .iter()
        .map(|row| format!("{}: {}", row.label, row.value.to_plain_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the preview of the current form
pub fn render_preview_dialog(frame: &mut Frame, document: &PreviewDocument) {
    let hint = if document.ready {
        vec![
            key_span("Enter"),
            Span::raw(" confirm & submit  "),
            key_span("Esc"),
            Span::raw(" keep editing"),
        ]
    } else {
        vec![
            Span::styled(
                "Complete the required fields to submit  ",
                Style::default().fg(Color::Yellow),
            ),
            key_span("Esc"),
            Span::raw(" close"),
        ]
    };

    let message = preview_text(document);
    render_dialog(
        frame,
        DialogConfig {
            title: "Preview",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(hint),
            max_width: 76,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate::preview::{PreviewRow, NOT_PROVIDED};
    use formgate::Html;

    #[test]
    fn test_preview_text_decodes_values() {
        let document = PreviewDocument {
            rows: vec![
                PreviewRow {
                    label: "Organization",
                    value: Html::text("Smith & Sons <Ltd>"),
                },
                PreviewRow {
                    label: "Signature",
                    value: Html::text(NOT_PROVIDED),
                },
            ],
            ready: false,
        };
        assert_eq!(
            preview_text(&document),
            "Organization: Smith & Sons <Ltd>\nSignature: (not provided)"
        );
    }
}
