//! Day by hour-band heatmap

use dash_core::catalog::RendererKey;
use dash_data::samples;
use egui::{pos2, vec2, Align2, Color32, FontId, Id, Rect, Sense, Stroke, Ui};

use super::{BlockRenderer, CHART_HEIGHT};
use crate::colors::{heat_color, heat_text_color};
use crate::content::BlockContent;

pub struct HeatmapRenderer;

impl BlockRenderer for HeatmapRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::Heatmap
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, _id: Id) {
        let sample = samples::HEATMAP;
        let max = sample.max().max(f64::EPSILON);
        let (response, painter) = ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
        let rect = response.rect;

        let margin_left = 70.0;
        let margin_top = 18.0;
        let cols = sample.labels.len().max(1) as f32;
        let rows = sample.series.len().max(1) as f32;
        let cell = vec2(
            (rect.width() - margin_left) / cols,
            (rect.height() - margin_top) / rows,
        );
        let origin = rect.min + vec2(margin_left, margin_top);
        let font = FontId::proportional(10.0);
        let text_color = ui.visuals().text_color();

        for (x_idx, label) in sample.labels.iter().enumerate() {
            painter.text(
                pos2(origin.x + cell.x * (x_idx as f32 + 0.5), rect.min.y + margin_top / 2.0),
                Align2::CENTER_CENTER,
                *label,
                font.clone(),
                text_color,
            );
        }

        let mut hovered = None;
        for (y_idx, series) in sample.series.iter().enumerate() {
            painter.text(
                pos2(origin.x - 6.0, origin.y + cell.y * (y_idx as f32 + 0.5)),
                Align2::RIGHT_CENTER,
                series.name,
                font.clone(),
                text_color,
            );
            for (x_idx, value) in series.values.iter().enumerate() {
                let cell_rect = Rect::from_min_size(
                    origin + vec2(cell.x * x_idx as f32, cell.y * y_idx as f32),
                    cell,
                );
                let t = (value / max) as f32;
                painter.rect_filled(cell_rect.shrink(1.0), 2.0, heat_color(t));
                if cell.x > 24.0 {
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{:.0}", value),
                        font.clone(),
                        heat_text_color(t),
                    );
                }
                if response.hover_pos().is_some_and(|p| cell_rect.contains(p)) {
                    painter.rect_stroke(cell_rect.shrink(1.0), 2.0, Stroke::new(1.5, Color32::BLACK));
                    hovered = Some((series.name, sample.labels[x_idx], *value));
                }
            }
        }

        if let Some((band, day, value)) = hovered {
            response.on_hover_text_at_pointer(format!("{} {}: {}", day, band, value));
        }
    }
}
