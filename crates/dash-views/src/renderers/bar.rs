//! Bar chart implementation

use dash_core::catalog::RendererKey;
use dash_data::samples;
use egui::{Id, Ui};
use egui_plot::{Bar, BarChart, Plot};

use super::{BlockRenderer, CHART_HEIGHT};
use crate::colors::categorical_color;
use crate::content::BlockContent;

/// Label for an integer x position, blank between categories
pub(crate) fn category_label(labels: &[&str], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).map(|l| l.to_string()).unwrap_or_default()
}

pub struct BarRenderer;

impl BlockRenderer for BarRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::Bar
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, id: Id) {
        let sample = samples::BAR;
        let labels = sample.labels;

        Plot::new(id.with("bar"))
            .height(CHART_HEIGHT)
            .show_grid(true)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .x_axis_formatter(move |val, _range, _specs| category_label(labels, val))
            .show(ui, |plot_ui| {
                for (series_idx, series) in sample.series.iter().enumerate() {
                    let color = categorical_color(series_idx);
                    let bars: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| {
                            Bar::new(i as f64, *v)
                                .width(0.6)
                                .name(labels[i])
                                .fill(color.linear_multiply(0.8))
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(series.name));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        let labels = ["Q1", "Q2", "Q3"];
        assert_eq!(category_label(&labels, 0.0), "Q1");
        assert_eq!(category_label(&labels, 2.0000001), "Q3");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 3.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
