//! Reusable UI components

mod dialog;

pub use dialog::{render_alert_dialog, render_preview_dialog};
