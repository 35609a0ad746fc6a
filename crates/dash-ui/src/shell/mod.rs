use std::time::{Duration, Instant};

use dash_core::LayoutStats;
use egui::{Context, RichText, TopBottomPanel};

use crate::icons;
use crate::theme::{accent_color, error_color, success_color, Theme};

/// Which surface the window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editor,
    Preview,
}

/// Something the user asked for from the header bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    OpenPreview,
    BackToEditor,
    ReloadPreview,
    ToggleTheme,
}

/// Render the header bar
///
/// The editor shows the layout counters and a preview button; the preview
/// shows a way back.
pub fn header_bar(ctx: &Context, mode: Mode, stats: Option<LayoutStats>, theme: &Theme) -> Option<ShellAction> {
    let mut action = None;
    TopBottomPanel::top("header_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            match mode {
                Mode::Editor => {
                    ui.heading("Dashboard Builder");
                    if let Some(stats) = stats {
                        ui.separator();
                        ui.label(RichText::new(stats.to_string()).weak());
                    }
                }
                Mode::Preview => {
                    if ui.button(format!("{} Back to editor", icons::BACK)).clicked() {
                        action = Some(ShellAction::BackToEditor);
                    }
                    ui.separator();
                    ui.heading("Dashboard");
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme_icon = if theme.dark_mode { icons::LIGHT } else { icons::DARK };
                if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                    action = Some(ShellAction::ToggleTheme);
                }
                match mode {
                    Mode::Editor => {
                        let preview = egui::Button::new(
                            RichText::new(format!("{} Preview", icons::PREVIEW)).color(egui::Color32::WHITE),
                        )
                        .fill(accent_color());
                        if ui.add(preview).clicked() {
                            action = Some(ShellAction::OpenPreview);
                        }
                    }
                    Mode::Preview => {
                        if ui.button("⟳ Reload").on_hover_text("Read the stored layout again").clicked() {
                            action = Some(ShellAction::ReloadPreview);
                        }
                    }
                }
            });
        });
        ui.add_space(4.0);
    });
    action
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Message to display
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub timestamp: Instant,
}

/// Short-lived messages shown under the header
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    const LIFETIME: Duration = Duration::from_secs(10);

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeKind::Info, title.into(), message.into());
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(NoticeKind::Error, title.into(), message.into());
    }

    fn push(&mut self, kind: NoticeKind, title: String, message: String) {
        self.items.push(Notice {
            kind,
            title,
            message,
            timestamp: Instant::now(),
        });
    }

    /// Drop notices older than their lifetime
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|n| now.saturating_duration_since(n.timestamp) < Self::LIFETIME);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Show current notices
    pub fn show(&mut self, ui: &mut egui::Ui) {
        self.prune(Instant::now());
        for notice in &self.items {
            let color = match notice.kind {
                NoticeKind::Info => success_color(),
                NoticeKind::Error => error_color(),
            };
            egui::Frame::none()
                .fill(color.linear_multiply(0.15))
                .stroke(egui::Stroke::new(1.0, color))
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let icon = match notice.kind {
                            NoticeKind::Info => "✔",
                            NoticeKind::Error => "⚠",
                        };
                        ui.label(RichText::new(icon).color(color));
                        ui.label(&notice.title);
                        ui.separator();
                        ui.label(&notice.message);
                    });
                });
        }
    }
}
