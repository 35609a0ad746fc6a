//! Pie and donut charts

use std::f32::consts::TAU;

use dash_core::catalog::RendererKey;
use dash_data::samples::{self, ChartSample};
use egui::{vec2, Align2, Color32, FontId, Id, Rect, Sense, Shape, Stroke, Ui};

use super::shapes::{arc_pieces, label_anchor, slice_angles, slice_at, TOP};
use super::{BlockRenderer, CHART_HEIGHT};
use crate::colors::categorical_color;
use crate::content::BlockContent;

pub struct PieRenderer {
    key: RendererKey,
    sample: ChartSample,
    /// Inner radius as a fraction of the outer one
    hole: f32,
}

impl PieRenderer {
    pub fn pie() -> Self {
        Self {
            key: RendererKey::Pie,
            sample: samples::PIE,
            hole: 0.0,
        }
    }

    pub fn donut() -> Self {
        Self {
            key: RendererKey::Donut,
            sample: samples::DONUT,
            hole: 0.55,
        }
    }
}

impl BlockRenderer for PieRenderer {
    fn key(&self) -> RendererKey {
        self.key
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, _id: Id) {
        let Some(series) = self.sample.series.first() else {
            return;
        };
        let (response, painter) = ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
        let rect = response.rect;
        let legend_width = (rect.width() * 0.4).min(120.0);
        let chart_rect = Rect::from_min_max(rect.min, rect.max - vec2(legend_width, 0.0));

        let center = chart_rect.center();
        let outer = chart_rect.width().min(chart_rect.height()) / 2.0 - 4.0;
        let inner = outer * self.hole;
        let slices = slice_angles(series.values, TOP, TAU);
        let hovered = response
            .hover_pos()
            .and_then(|pos| slice_at(center, inner, outer, &slices, pos));

        for (i, (start, end)) in slices.iter().enumerate() {
            let mut color = categorical_color(i);
            if hovered == Some(i) {
                color = color.linear_multiply(1.25);
            }
            for piece in arc_pieces(center, inner, outer, *start, *end) {
                painter.add(Shape::convex_polygon(piece, color, Stroke::NONE));
            }
            if end - start > 0.35 {
                let total = self.sample.total().max(f64::EPSILON);
                let pct = series.values[i] / total * 100.0;
                painter.text(
                    label_anchor(center, (inner + outer) / 2.0, *start, *end),
                    Align2::CENTER_CENTER,
                    format!("{:.0}%", pct),
                    FontId::proportional(10.0),
                    Color32::WHITE,
                );
            }
        }

        // Legend
        let row_height = 16.0;
        let top = rect.center().y - row_height * self.sample.labels.len() as f32 / 2.0;
        for (i, label) in self.sample.labels.iter().enumerate() {
            let y = top + row_height * i as f32 + row_height / 2.0;
            let swatch = Rect::from_center_size(
                egui::pos2(rect.max.x - legend_width + 8.0, y),
                vec2(8.0, 8.0),
            );
            painter.rect_filled(swatch, 2.0, categorical_color(i));
            painter.text(
                egui::pos2(swatch.max.x + 6.0, y),
                Align2::LEFT_CENTER,
                *label,
                FontId::proportional(11.0),
                ui.visuals().text_color(),
            );
        }

        if let Some(i) = hovered {
            response.on_hover_text_at_pointer(format!("{}: {}", self.sample.labels[i], series.values[i]));
        }
    }
}
