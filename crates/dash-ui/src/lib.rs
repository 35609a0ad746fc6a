//! User interface components for the dashboard builder
//!
//! This crate provides the egui panels for editing a layout and for
//! previewing it read-only.

pub mod canvas;
pub mod config_form;
pub mod preview_panel;
pub mod shell;
pub mod theme;
pub mod widget_utils;

/// Re-export commonly used types
pub use canvas::{apply_actions, CanvasAction, EditorCanvas};
pub use preview_panel::PreviewPanel;
pub use shell::{header_bar, Mode, Notices, ShellAction};
pub use theme::{apply_theme, Theme};
pub use widget_utils::WidgetId;

// Common icon definitions
pub mod icons {
    pub const GRIP: &str = "⠿";
    pub const ADD: &str = "➕";
    pub const EDIT: &str = "✏";
    pub const DELETE: &str = "🗑";
    pub const PREVIEW: &str = "👁";
    pub const BACK: &str = "⬅";
    pub const DARK: &str = "🌙";
    pub const LIGHT: &str = "☀";
}
