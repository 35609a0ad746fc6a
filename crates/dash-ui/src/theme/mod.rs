use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "Builder Light".to_string(),
            dark_mode: false,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Builder Dark".to_string(),
            dark_mode: true,
        }
    }

    pub fn toggled(&self) -> Self {
        if self.dark_mode {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

struct Palette {
    bg: Color32,
    panel: Color32,
    widget: Color32,
    hover: Color32,
    active: Color32,
    border: Color32,
    text: Color32,
}

impl Palette {
    fn for_theme(theme: &Theme) -> Self {
        if theme.dark_mode {
            Self {
                bg: Color32::from_rgb(23, 23, 23),
                panel: Color32::from_rgb(31, 31, 31),
                widget: Color32::from_rgb(40, 40, 40),
                hover: Color32::from_rgb(50, 50, 50),
                active: Color32::from_rgb(60, 60, 60),
                border: Color32::from_rgb(70, 70, 70),
                text: Color32::from_rgb(220, 220, 220),
            }
        } else {
            Self {
                bg: Color32::from_rgb(243, 244, 246),
                panel: Color32::from_rgb(249, 250, 251),
                widget: Color32::WHITE,
                hover: Color32::from_rgb(243, 244, 246),
                active: Color32::from_rgb(229, 231, 235),
                border: Color32::from_rgb(209, 213, 219),
                text: Color32::from_rgb(17, 24, 39),
            }
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };
    let palette = Palette::for_theme(theme);
    let accent = accent_color();

    // Window and panel styling
    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = palette.bg;
    visuals.faint_bg_color = palette.hover;

    // Widget styling
    visuals.widgets.noninteractive.bg_fill = palette.widget;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);

    visuals.widgets.inactive.bg_fill = palette.widget;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = palette.hover;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent.linear_multiply(0.6));
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = palette.active;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    // Selection and highlighting
    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    style.visuals = visuals;
    ctx.set_style(style);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(59, 130, 246)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(220, 38, 38)
}

/// Get the success color for the theme
pub fn success_color() -> Color32 {
    Color32::from_rgb(22, 163, 74)
}

/// Outline of unconfigured blocks and drop targets
pub fn muted_border() -> Color32 {
    Color32::from_rgb(156, 163, 175)
}
