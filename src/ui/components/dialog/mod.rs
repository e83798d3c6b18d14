//! Dialog components for TUI

mod alert_dialog;
mod base;
mod preview_dialog;

pub use alert_dialog::render_alert_dialog;
pub use preview_dialog::render_preview_dialog;
