//! Line and area charts

use dash_core::catalog::RendererKey;
use dash_data::samples::{self, ChartSample};
use egui::{Id, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::bar::category_label;
use super::{BlockRenderer, CHART_HEIGHT};
use crate::colors::categorical_color;
use crate::content::BlockContent;

/// Draws one or more series as lines; area charts fill down to zero
pub struct LineRenderer {
    key: RendererKey,
    sample: ChartSample,
    filled: bool,
}

impl LineRenderer {
    pub fn line() -> Self {
        Self {
            key: RendererKey::Line,
            sample: samples::LINE,
            filled: false,
        }
    }

    pub fn area() -> Self {
        Self {
            key: RendererKey::Area,
            sample: samples::AREA,
            filled: true,
        }
    }
}

impl BlockRenderer for LineRenderer {
    fn key(&self) -> RendererKey {
        self.key
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, id: Id) {
        let labels = self.sample.labels;
        let mut plot = Plot::new(id.with("line"))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .x_axis_formatter(move |val, _range, _specs| category_label(labels, val));
        if self.sample.series.len() > 1 {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for (series_idx, series) in self.sample.series.iter().enumerate() {
                let points: PlotPoints = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| [i as f64, *v])
                    .collect();
                let mut line = Line::new(points)
                    .color(categorical_color(series_idx))
                    .width(2.0)
                    .name(series.name);
                if self.filled {
                    line = line.fill(0.0);
                }
                plot_ui.line(line);
            }
        });
    }
}
