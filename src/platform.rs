//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for the preview and submit shortcuts.
/// Terminals do not forward Cmd on macOS, so Control is used everywhere.
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Preview shortcut display
/// - macOS: "⌃P"
/// - Linux/Windows: "Ctrl+P"
#[cfg(target_os = "macos")]
pub const PREVIEW_SHORTCUT: &str = "⌃P";

#[cfg(not(target_os = "macos"))]
pub const PREVIEW_SHORTCUT: &str = "Ctrl+P";

/// Submit shortcut display
/// - macOS: "⌃S"
/// - Linux/Windows: "Ctrl+S"
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "⌃S";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
