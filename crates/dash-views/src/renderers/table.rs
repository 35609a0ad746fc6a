//! Document table with filter and sortable headers

use dash_core::catalog::RendererKey;
use dash_data::samples::{self, DocumentColumn, DocumentSort, DocumentStatus};
use egui::{Color32, Id, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::{BlockRenderer, CHART_HEIGHT};
use crate::content::BlockContent;

/// Per-block table state kept in egui memory
#[derive(Debug, Clone, Default)]
struct TableState {
    filter: String,
    sort: Option<DocumentSort>,
}

impl TableState {
    /// Header click cycles ascending → descending → unsorted
    fn toggle_sort(&mut self, column: DocumentColumn) {
        self.sort = match self.sort {
            Some(sort) if sort.column == column && !sort.descending => Some(DocumentSort {
                column,
                descending: true,
            }),
            Some(sort) if sort.column == column => None,
            _ => Some(DocumentSort {
                column,
                descending: false,
            }),
        };
    }

    fn indicator(&self, column: DocumentColumn) -> &'static str {
        match self.sort {
            Some(sort) if sort.column == column && sort.descending => " ⏷",
            Some(sort) if sort.column == column => " ⏶",
            _ => "",
        }
    }
}

fn status_color(status: DocumentStatus) -> Color32 {
    match status {
        DocumentStatus::Processed => Color32::from_rgb(22, 101, 52),
        DocumentStatus::Processing => Color32::from_rgb(133, 77, 14),
        DocumentStatus::Failed => Color32::from_rgb(153, 27, 27),
        DocumentStatus::Pending => Color32::from_gray(90),
    }
}

pub struct TableRenderer;

impl BlockRenderer for TableRenderer {
    fn key(&self) -> RendererKey {
        RendererKey::Table
    }

    fn ui(&self, ui: &mut Ui, _content: &BlockContent, id: Id) {
        let state_id = id.with("table_state");
        let mut state = ui.data_mut(|d| d.get_temp::<TableState>(state_id)).unwrap_or_default();

        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.add(egui::TextEdit::singleline(&mut state.filter).hint_text("Search documents..."));
        });

        let rows = samples::documents(&state.filter, state.sort);
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
        let mut clicked = None;

        ui.push_id(id.with("table"), |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .max_scroll_height(CHART_HEIGHT)
                .vscroll(true);
            for _ in DocumentColumn::ALL {
                builder = builder.column(Column::auto().at_least(40.0).clip(true));
            }

            builder
                .header(20.0, |mut header| {
                    for column in DocumentColumn::ALL {
                        header.col(|ui| {
                            let text = format!("{}{}", column.header(), state.indicator(column));
                            if ui.button(RichText::new(text).strong()).clicked() {
                                clicked = Some(column);
                            }
                        });
                    }
                })
                .body(|mut body| {
                    for record in &rows {
                        body.row(text_height, |mut row| {
                            for column in DocumentColumn::ALL {
                                row.col(|ui| {
                                    let text = record.cell(column);
                                    match column {
                                        DocumentColumn::Id => {
                                            ui.label(RichText::new(text).monospace().small());
                                        }
                                        DocumentColumn::Status => {
                                            ui.label(RichText::new(text).small().color(status_color(record.status)));
                                        }
                                        _ if text == "-" => {
                                            ui.label(RichText::new(text).weak());
                                        }
                                        _ => {
                                            ui.label(text);
                                        }
                                    }
                                });
                            }
                        });
                    }
                });
        });

        if rows.is_empty() {
            ui.label(RichText::new("No results.").weak());
        }
        if let Some(column) = clicked {
            state.toggle_sort(column);
        }
        ui.data_mut(|d| d.insert_temp(state_id, state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_cycle() {
        let mut state = TableState::default();
        state.toggle_sort(DocumentColumn::Accuracy);
        assert_eq!(state.indicator(DocumentColumn::Accuracy), " ⏶");
        state.toggle_sort(DocumentColumn::Accuracy);
        assert_eq!(state.indicator(DocumentColumn::Accuracy), " ⏷");
        state.toggle_sort(DocumentColumn::Accuracy);
        assert_eq!(state.sort, None);

        state.toggle_sort(DocumentColumn::Id);
        state.toggle_sort(DocumentColumn::Date);
        assert_eq!(
            state.sort,
            Some(DocumentSort {
                column: DocumentColumn::Date,
                descending: false
            })
        );
        assert_eq!(state.indicator(DocumentColumn::Id), "");
    }
}
