//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_alert_dialog, render_preview_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_bar_area) = layout::create_layout(frame.area());

    forms::draw_submission_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_bar_area, app);

    // Overlays: the alert sits above the preview
    if let Some(preview) = &app.preview {
        render_preview_dialog(frame, preview);
    }
    if let Some(message) = app.current_alert() {
        render_alert_dialog(frame, &message.to_plain_text());
    }
}
