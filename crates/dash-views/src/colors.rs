//! Color utilities for charts

use egui::Color32;

/// Get a categorical color from a palette
pub fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(59, 130, 246),  // Blue
        Color32::from_rgb(16, 185, 129),  // Green
        Color32::from_rgb(245, 158, 11),  // Amber
        Color32::from_rgb(239, 68, 68),   // Red
        Color32::from_rgb(139, 92, 246),  // Purple
        Color32::from_rgb(236, 72, 153),  // Pink
    ];
    PALETTE[index % PALETTE.len()]
}

/// Light-to-dark blue ramp for heatmap cells
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| (a + (b - a) * t).round() as u8;
    Color32::from_rgb(lerp(219.0, 30.0), lerp(234.0, 64.0), lerp(254.0, 175.0))
}

/// Text color readable on top of a heat cell
pub fn heat_text_color(t: f32) -> Color32 {
    if t > 0.5 {
        Color32::WHITE
    } else {
        Color32::from_gray(30)
    }
}

pub const POSITIVE: Color32 = Color32::from_rgb(22, 163, 74);
pub const NEGATIVE: Color32 = Color32::from_rgb(220, 38, 38);
