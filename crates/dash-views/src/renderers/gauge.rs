//! Half-circle gauge

use std::f32::consts::PI;

use dash_core::catalog::RendererKey;
use dash_data::samples;
use egui::{pos2, vec2, Align2, Color32, FontId, Id, Sense, Shape, Stroke, Ui};

use super::shapes::{arc_pieces, slice_angles};
use super::{BlockRenderer, CHART_HEIGHT};
use crate::colors::categorical_color;
use crate::content::BlockContent;

pub struct GaugeRenderer;

impl BlockRenderer for GaugeRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::Gauge
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, _id: Id) {
        let sample = samples::GAUGE;
        let Some(series) = sample.series.first() else {
            return;
        };
        let (response, painter) = ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
        let rect = response.rect;
        let outer = (rect.width() / 2.0).min(rect.height() - 36.0).max(10.0) - 4.0;
        let inner = outer * 0.7;
        let center = pos2(rect.center().x, rect.min.y + outer + 8.0);

        // Sweep the upper half from nine o'clock to three o'clock
        for (i, (start, end)) in slice_angles(series.values, PI, PI).iter().enumerate() {
            for piece in arc_pieces(center, inner, outer, *start, *end) {
                painter.add(Shape::convex_polygon(piece, categorical_color(i), Stroke::NONE));
            }
        }

        let headline = series.values.first().copied().unwrap_or_default();
        painter.text(
            center - vec2(0.0, 4.0),
            Align2::CENTER_BOTTOM,
            format!("{:.0}%", headline),
            FontId::proportional(22.0),
            ui.visuals().strong_text_color(),
        );
        painter.text(
            center + vec2(0.0, 6.0),
            Align2::CENTER_TOP,
            sample.labels.first().copied().unwrap_or_default(),
            FontId::proportional(11.0),
            Color32::GRAY,
        );
    }
}
