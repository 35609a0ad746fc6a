//! egui renderers keyed by [`RendererKey`]

mod bar;
mod gauge;
mod heatmap;
mod line;
mod metric_grid;
mod pie;
pub mod shapes;
mod single_value;
mod table;

use ahash::AHashMap;
use dash_core::catalog::RendererKey;
use egui::{Id, RichText, Ui};

use crate::content::BlockContent;

/// Draws one kind of block content
pub trait BlockRenderer: Send + Sync {
    fn key(&self) -> RendererKey;

    /// Draw `content` into the available space; `id` is unique per block
    fn ui(&self, ui: &mut Ui, content: &BlockContent, id: Id);
}

/// Renderers for every key the catalog can produce
pub struct RendererRegistry {
    renderers: AHashMap<RendererKey, Box<dyn BlockRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: AHashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(single_value::SingleValueRenderer));
        registry.register(Box::new(metric_grid::MetricGridRenderer));
        registry.register(Box::new(bar::BarRenderer));
        registry.register(Box::new(line::LineRenderer::line()));
        registry.register(Box::new(line::LineRenderer::area()));
        registry.register(Box::new(pie::PieRenderer::pie()));
        registry.register(Box::new(pie::PieRenderer::donut()));
        registry.register(Box::new(gauge::GaugeRenderer));
        registry.register(Box::new(heatmap::HeatmapRenderer));
        registry.register(Box::new(table::TableRenderer));
        registry
    }

    /// Add a renderer, replacing any previous one for its key
    pub fn register(&mut self, renderer: Box<dyn BlockRenderer>) {
        self.renderers.insert(renderer.key(), renderer);
    }

    pub fn get(&self, key: RendererKey) -> Option<&dyn BlockRenderer> {
        self.renderers.get(&key).map(|r| r.as_ref())
    }

    /// Draw a block's content
    pub fn show(&self, ui: &mut Ui, content: &BlockContent, id: Id) {
        match content.renderer().and_then(|key| self.get(key)) {
            Some(renderer) => renderer.ui(ui, content, id),
            None => placeholder(ui, content),
        }
    }
}

fn placeholder(ui: &mut Ui, content: &BlockContent) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        match content {
            BlockContent::Empty => {
                ui.label(RichText::new("Empty Block").weak().strong());
                ui.label(RichText::new("Not configured").weak().small());
            }
            BlockContent::Placeholder { visualization, .. } => {
                ui.label(RichText::new("📊").size(32.0).weak());
                ui.label(RichText::new("Widget Preview").weak());
                ui.label(RichText::new(visualization).weak().small());
            }
            _ => {
                ui.label(RichText::new("No renderer").weak());
            }
        }
    });
}

/// Height charts are drawn at inside a block card
pub(crate) const CHART_HEIGHT: f32 = 160.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_key() {
        let registry = RendererRegistry::builtin();
        for key in RendererKey::ALL {
            let renderer = registry.get(key).unwrap_or_else(|| panic!("no renderer for {:?}", key));
            assert_eq!(renderer.key(), key);
        }
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = RendererRegistry::empty();
        assert!(registry.get(RendererKey::Bar).is_none());
        registry.register(Box::new(bar::BarRenderer));
        registry.register(Box::new(bar::BarRenderer));
        assert_eq!(registry.renderers.len(), 1);
    }
}
