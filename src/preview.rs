//! Preview rendering and escaped markup
//!
//! Every string that reaches a display surface goes through [`Html`], whose
//! constructors escape user-controlled text. The preview renderer turns a
//! [`Payload`] into labelled rows of escaped values.

use crate::payload::Payload;
use std::fmt;

/// Placeholder shown for an empty scalar value
pub const NOT_PROVIDED: &str = "(not provided)";

/// Placeholder shown for an empty file list
pub const NO_FILES: &str = "(no files)";

/// Escape `&`, `<`, `>` and `"` for insertion into markup
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup that is safe to insert into a display surface.
///
/// Text enters only through [`Html::text`] / [`Html::push_text`], which
/// escape it. Literal markup is limited to `&'static str`, so it can never
/// carry user input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html(String);

impl Html {
    /// Escaped text
    pub fn text(s: &str) -> Self {
        Self(escape_html(s))
    }

    /// Static markup
    pub fn markup(s: &'static str) -> Self {
        Self(s.to_string())
    }

    pub fn push_text(&mut self, s: &str) -> &mut Self {
        self.0.push_str(&escape_html(s));
        self
    }

    pub fn push_markup(&mut self, s: &'static str) -> &mut Self {
        self.0.push_str(s);
        self
    }

    pub fn push_html(&mut self, other: &Html) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render for a plain-text surface: drop tags, decode the escaped entities
    pub fn to_plain_text(&self) -> String {
        let mut stripped = String::with_capacity(self.0.len());
        let mut in_tag = false;
        for c in self.0.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => stripped.push(c),
                _ => {}
            }
        }
        stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One label/value line of the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub label: &'static str,
    pub value: Html,
}

/// Rendered preview of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub rows: Vec<PreviewRow>,
    /// Whether the form passed (quiet) validation when the preview was built
    pub ready: bool,
}

impl PreviewDocument {
    /// Full markup for an HTML display surface
    pub fn to_html(&self) -> Html {
        let mut html = Html::markup("<div class=\"preview\">\n");
        for row in &self.rows {
            html.push_markup("<div class=\"row\"><strong>")
                .push_text(row.label)
                .push_markup(":</strong> ")
                .push_html(&row.value)
                .push_markup("</div>\n");
        }
        html.push_markup("</div>");
        html
    }

    pub fn value_of(&self, label: &str) -> Option<&Html> {
        self.rows.iter().find(|r| r.label == label).map(|r| &r.value)
    }
}

fn scalar(value: &str) -> Html {
    if value.trim().is_empty() {
        Html::text(NOT_PROVIDED)
    } else {
        Html::text(value)
    }
}

fn yes_no(value: bool) -> Html {
    Html::text(if value { "Yes" } else { "No" })
}

/// Render a payload as label/value rows
pub fn render_preview(payload: &Payload, ready: bool) -> PreviewDocument {
    let files = if payload.files.is_empty() {
        Html::text(NO_FILES)
    } else {
        let names: Vec<&str> = payload.files.iter().map(|f| f.name.as_str()).collect();
        Html::text(&names.join(", "))
    };

    let rows = vec![
        PreviewRow {
            label: "Organization",
            value: scalar(&payload.organization_name),
        },
        PreviewRow {
            label: "Documents reviewed",
            value: scalar(payload.reviewed_answer.as_str()),
        },
        PreviewRow {
            label: "Changes",
            value: scalar(&payload.changes_description),
        },
        PreviewRow {
            label: "Agreement confirmed",
            value: yes_no(payload.agreement_confirmed),
        },
        PreviewRow {
            label: "Signature",
            value: scalar(&payload.signature_name),
        },
        PreviewRow {
            label: "Files",
            value: files,
        },
        PreviewRow {
            label: "Submitted at",
            value: scalar(&payload.submitted_at_timestamp),
        },
    ];

    PreviewDocument { rows, ready }
}
