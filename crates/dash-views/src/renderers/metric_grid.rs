//! Grid of headline metrics

use dash_core::catalog::RendererKey;
use egui::{Frame, Grid, Id, RichText, Rounding, Ui};

use super::BlockRenderer;
use crate::colors::{NEGATIVE, POSITIVE};
use crate::content::BlockContent;

pub struct MetricGridRenderer;

impl BlockRenderer for MetricGridRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::MultiMetricGrid
    }

    fn ui(&self, ui: &mut Ui, content: &BlockContent, id: Id) {
        let BlockContent::MetricGrid { metrics, .. } = content else {
            return;
        };
        let cell_width = (ui.available_width() / 2.0 - 8.0).max(60.0);
        Grid::new(id.with("metric_grid"))
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (i, metric) in metrics.iter().enumerate() {
                    Frame::none()
                        .fill(ui.visuals().faint_bg_color)
                        .rounding(Rounding::same(6.0))
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_width(cell_width - 16.0);
                            ui.label(RichText::new(metric.label).small().weak());
                            ui.label(RichText::new(metric.value).size(20.0).strong());
                            let color = if metric.positive { POSITIVE } else { NEGATIVE };
                            ui.label(RichText::new(metric.change).small().color(color));
                        });
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }
}
