//! Read-only rendering of an exported layout

use dash_core::persistence::{load_or_fallback, LayoutPersistence};
use dash_core::{ColumnCount, Layout};
use dash_views::{BlockContent, RendererRegistry};
use egui::{Frame, RichText, Rounding, ScrollArea, Ui};
use tracing::info;

use crate::widget_utils::block_widget_id;

const NARROW_WIDTH: f32 = 768.0;
const MEDIUM_WIDTH: f32 = 1024.0;

/// Columns actually drawn for a row at the given panel width
pub fn effective_columns(columns: ColumnCount, width: f32) -> usize {
    let wanted = columns.get();
    if width < NARROW_WIDTH {
        1
    } else if width < MEDIUM_WIDTH {
        wanted.min(2)
    } else {
        wanted
    }
}

/// The preview surface; reads the slot once when opened
#[derive(Debug, Default)]
pub struct PreviewPanel {
    layout: Layout,
}

impl PreviewPanel {
    /// Mount the preview from `persistence`, falling back to the built-in layout
    pub fn open(persistence: &dyn LayoutPersistence) -> Self {
        let layout = load_or_fallback(persistence, dash_templates::preview_fallback);
        info!("Preview opened with {} rows", layout.len());
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn show(&self, ui: &mut Ui, renderers: &RendererRegistry) {
        ScrollArea::vertical()
            .id_source("preview_panel")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.layout.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(60.0);
                        ui.label(RichText::new("No dashboard content").heading().weak());
                        ui.label(RichText::new("Configure your dashboard to see content here").weak());
                    });
                    return;
                }

                let width = ui.available_width();
                for row in self.layout.rows() {
                    let columns = effective_columns(row.columns, width);
                    for (chunk_index, chunk) in row.blocks.chunks(columns).enumerate() {
                        ui.columns(columns, |cols| {
                            for (offset, (block, ui)) in chunk.iter().zip(cols.iter_mut()).enumerate() {
                                let index = chunk_index * columns + offset;
                                let content = BlockContent::for_block(block);
                                let id = block_widget_id("preview", row.id, index);
                                Frame::group(ui.style())
                                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                                    .rounding(Rounding::same(8.0))
                                    .inner_margin(12.0)
                                    .show(ui, |ui| {
                                        ui.set_width(ui.available_width());
                                        ui.set_min_height(120.0);
                                        if let Some(title) = content.title() {
                                            ui.label(RichText::new(title).strong());
                                            ui.add_space(4.0);
                                        }
                                        renderers.show(ui, &content, id);
                                    });
                            }
                        });
                        ui.add_space(8.0);
                    }
                    ui.add_space(8.0);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Slot(Option<&'static str>);

    impl LayoutPersistence for Slot {
        fn save(&self, _layout: &Layout) -> anyhow::Result<()> {
            Ok(())
        }

        fn load(&self) -> anyhow::Result<Option<Layout>> {
            match self.0 {
                Some(json) => serde_json::from_str(json).map(Some).map_err(|e| anyhow!(e)),
                None => Ok(None),
            }
        }
    }

    #[test]
    fn test_effective_columns() {
        let four = ColumnCount::new(4).unwrap();
        let one = ColumnCount::new(1).unwrap();
        assert_eq!(effective_columns(four, 500.0), 1);
        assert_eq!(effective_columns(four, 900.0), 2);
        assert_eq!(effective_columns(one, 900.0), 1);
        assert_eq!(effective_columns(four, 1280.0), 4);
    }

    #[test]
    fn test_open_uses_stored_layout() {
        let panel = PreviewPanel::open(&Slot(Some(r#"[{"id":7,"columns":1,"blocks":[{"id":9,"configured":false}]}]"#)));
        assert_eq!(panel.layout().len(), 1);
        assert_eq!(panel.layout().rows().next().map(|r| r.id.0), Some(7));
    }

    #[test]
    fn test_open_falls_back() {
        let fallback = dash_templates::preview_fallback();
        assert_eq!(PreviewPanel::open(&Slot(None)).layout(), &fallback);
        assert_eq!(PreviewPanel::open(&Slot(Some("{not json"))).layout(), &fallback);
    }

    #[test]
    fn test_empty_stored_layout_is_kept() {
        let panel = PreviewPanel::open(&Slot(Some("[]")));
        assert!(panel.layout().is_empty());
    }
}
