//! Editor canvas: rows, blocks and drag-and-drop
//!
//! Drawing only reads the [`Editor`]. Every interaction is collected as a
//! [`CanvasAction`] and applied after the frame with [`apply_actions`].

use dash_core::catalog;
use dash_core::{Block, ColumnCount, DropTarget, Editor, MetricCount, Row, RowId};
use dash_views::{BlockContent, RendererRegistry};
use egui::{
    Align2, Color32, ComboBox, FontId, Frame, Id, Key, Label, LayerId, Order, Pos2, Rect, RichText, Rounding,
    ScrollArea, Sense, Stroke, Ui,
};
use tracing::debug;

use crate::config_form;
use crate::icons;
use crate::theme::{accent_color, error_color, muted_border};
use crate::widget_utils::{block_widget_id, WidgetId};

/// A user interaction with the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasAction {
    AddRow,
    DeleteRow(RowId),
    ResizeRow(RowId, ColumnCount),
    OpenBlock(RowId, usize),
    SelectDataType(String),
    ClearDataType,
    SelectVisualization(String),
    SelectMetricCount(MetricCount),
    CommitSession,
    CancelSession,
    BeginRowDrag(RowId),
    BeginBlockDrag(RowId, usize),
    Drop(DropTarget),
    CancelDrags,
}

/// Apply collected actions in order; returns whether the layout changed
pub fn apply_actions(editor: &mut Editor, actions: impl IntoIterator<Item = CanvasAction>) -> bool {
    let before = editor.layout().clone();
    for action in actions {
        debug!("Canvas action {:?}", action);
        match action {
            CanvasAction::AddRow => {
                editor.add_row();
            }
            CanvasAction::DeleteRow(row) => {
                editor.delete_row(row);
            }
            CanvasAction::ResizeRow(row, columns) => {
                editor.resize_row(row, columns);
            }
            CanvasAction::OpenBlock(row, index) => {
                editor.open_block(row, index);
            }
            CanvasAction::SelectDataType(data_type) => {
                editor.select_data_type(&data_type);
            }
            CanvasAction::ClearDataType => editor.clear_data_type(),
            CanvasAction::SelectVisualization(visualization) => {
                editor.select_visualization(&visualization);
            }
            CanvasAction::SelectMetricCount(count) => {
                editor.select_metric_count(count);
            }
            CanvasAction::CommitSession => {
                editor.commit_session();
            }
            CanvasAction::CancelSession => {
                editor.cancel_session();
            }
            CanvasAction::BeginRowDrag(row) => editor.begin_row_drag(row),
            CanvasAction::BeginBlockDrag(row, index) => {
                editor.begin_block_drag(row, index);
            }
            CanvasAction::Drop(target) => {
                editor.drop_on(target);
            }
            CanvasAction::CancelDrags => editor.cancel_drags(),
        }
    }
    editor.layout() != &before
}

/// Which protocol a drag in progress belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Row,
    Block,
}

/// Screen areas of the rows and blocks drawn this frame
#[derive(Debug, Default)]
pub struct DropZones {
    rows: Vec<(RowId, Rect)>,
    blocks: Vec<(RowId, usize, Rect)>,
}

impl DropZones {
    pub fn add_row(&mut self, row: RowId, rect: Rect) {
        self.rows.push((row, rect));
    }

    pub fn add_block(&mut self, row: RowId, index: usize, rect: Rect) {
        self.blocks.push((row, index, rect));
    }

    pub fn row_at(&self, pos: Pos2) -> Option<RowId> {
        self.rows.iter().find(|(_, r)| r.contains(pos)).map(|(id, _)| *id)
    }

    pub fn block_at(&self, pos: Pos2) -> Option<(RowId, usize)> {
        self.blocks
            .iter()
            .find(|(_, _, r)| r.contains(pos))
            .map(|(row, index, _)| (*row, *index))
    }

    /// Where a drag of `kind` released at `pos` lands
    ///
    /// Block drags only ever land on blocks and row drags only on rows.
    pub fn target(&self, pos: Pos2, kind: DragKind) -> Option<DropTarget> {
        match kind {
            DragKind::Block => self.block_at(pos).map(|(row, index)| DropTarget::Block { row, index }),
            DragKind::Row => self.row_at(pos).map(DropTarget::Row),
        }
    }
}

fn columns_label(columns: ColumnCount) -> String {
    match columns.get() {
        1 => "1 Column".to_string(),
        n => format!("{} Columns", n),
    }
}

/// The editor's central panel
#[derive(Default)]
pub struct EditorCanvas {
    zones: DropZones,
}

impl EditorCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the layout and collect this frame's interactions
    pub fn show(&mut self, ui: &mut Ui, editor: &Editor, renderers: &RendererRegistry) -> Vec<CanvasAction> {
        let layout = editor.layout().clone();
        let pointer = ui.ctx().pointer_interact_pos();
        let mut actions = Vec::new();
        self.zones = DropZones::default();

        ScrollArea::vertical()
            .id_source("editor_canvas")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if layout.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(RichText::new("No rows yet").weak());
                        ui.label(RichText::new("Add a row to start building the dashboard").weak().small());
                    });
                }

                for (position, row) in layout.rows().enumerate() {
                    let response = Frame::group(ui.style())
                        .fill(ui.visuals().panel_fill)
                        .rounding(Rounding::same(10.0))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            row_ui(ui, editor, row, position, renderers, pointer, &mut self.zones, &mut actions);
                        })
                        .response;
                    self.zones.add_row(row.id, response.rect);
                    paint_row_feedback(ui, editor, row.id, response.rect, pointer);
                    ui.add_space(8.0);
                }

                if ui.button(format!("{} Add Row", icons::ADD)).clicked() {
                    actions.push(CanvasAction::AddRow);
                }
            });

        self.finish_drag(ui, editor, pointer, &layout, &mut actions);
        actions
    }

    fn finish_drag(
        &self,
        ui: &Ui,
        editor: &Editor,
        pointer: Option<Pos2>,
        layout: &dash_core::Layout,
        actions: &mut Vec<CanvasAction>,
    ) {
        let kind = if editor.block_drag_source().is_some() {
            DragKind::Block
        } else if editor.row_drag_source().is_some() {
            DragKind::Row
        } else {
            return;
        };

        if ui.input(|i| i.key_pressed(Key::Escape)) {
            actions.push(CanvasAction::CancelDrags);
            return;
        }

        if ui.input(|i| i.pointer.any_released()) {
            match pointer.and_then(|pos| self.zones.target(pos, kind)) {
                Some(target) => actions.push(CanvasAction::Drop(target)),
                None => actions.push(CanvasAction::CancelDrags),
            }
            return;
        }

        // Label following the pointer
        let Some(pos) = pointer else {
            return;
        };
        let text = match kind {
            DragKind::Row => editor
                .row_drag_source()
                .and_then(|row| layout.row_index(row))
                .map(|i| format!("Row {}", i + 1)),
            DragKind::Block => editor
                .block_drag_source()
                .and_then(|s| layout.block(s.row, s.index))
                .and_then(|b| b.title().map(str::to_string)),
        };
        if let Some(text) = text {
            let painter = ui.ctx().layer_painter(LayerId::new(Order::Tooltip, Id::new("drag_ghost")));
            let galley = painter.layout_no_wrap(text, FontId::proportional(13.0), Color32::WHITE);
            let rect = Align2::LEFT_TOP.anchor_rect(Rect::from_min_size(pos + egui::vec2(12.0, 12.0), galley.size()));
            painter.rect_filled(rect.expand(4.0), 4.0, accent_color().linear_multiply(0.9));
            painter.galley(rect.min, galley);
        }
    }
}

fn paint_row_feedback(ui: &Ui, editor: &Editor, row: RowId, rect: Rect, pointer: Option<Pos2>) {
    match editor.row_drag_source() {
        Some(source) if source == row => {
            ui.painter()
                .rect_filled(rect, 10.0, Color32::from_black_alpha(30));
        }
        Some(_) if editor.drag_over_row(row) && pointer.is_some_and(|p| rect.contains(p)) => {
            ui.painter()
                .rect_stroke(rect, 10.0, Stroke::new(2.0, accent_color()));
        }
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn row_ui(
    ui: &mut Ui,
    editor: &Editor,
    row: &Row,
    position: usize,
    renderers: &RendererRegistry,
    pointer: Option<Pos2>,
    zones: &mut DropZones,
    actions: &mut Vec<CanvasAction>,
) {
    ui.horizontal(|ui| {
        let grip = ui
            .add(Label::new(RichText::new(icons::GRIP).size(18.0)).sense(Sense::drag()))
            .on_hover_text("Drag to reorder rows");
        if grip.drag_started() {
            actions.push(CanvasAction::BeginRowDrag(row.id));
        }

        ui.label(RichText::new(format!("Row {}", position + 1)).strong());

        ComboBox::from_id_source(WidgetId::new("columns").with(row.id).id())
            .selected_text(columns_label(row.columns))
            .show_ui(ui, |ui| {
                for columns in ColumnCount::OPTIONS {
                    if ui
                        .selectable_label(row.columns == columns, columns_label(columns))
                        .clicked()
                        && row.columns != columns
                    {
                        actions.push(CanvasAction::ResizeRow(row.id, columns));
                    }
                }
            });

        ui.label(RichText::new(format!("{}/{} configured", row.configured_count(), row.blocks.len())).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let delete = ui.button(RichText::new(icons::DELETE).color(error_color()));
            if delete.on_hover_text("Delete row").clicked() {
                actions.push(CanvasAction::DeleteRow(row.id));
            }
        });
    });
    ui.add_space(6.0);

    ui.columns(row.columns.get(), |columns| {
        for (index, block) in row.blocks.iter().enumerate() {
            if let Some(ui) = columns.get_mut(index) {
                block_card(ui, editor, row.id, index, block, renderers, pointer, zones, actions);
            }
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn block_card(
    ui: &mut Ui,
    editor: &Editor,
    row: RowId,
    index: usize,
    block: &Block,
    renderers: &RendererRegistry,
    pointer: Option<Pos2>,
    zones: &mut DropZones,
    actions: &mut Vec<CanvasAction>,
) {
    let id = block_widget_id("editor", row, index);
    let editing = editor.is_editing(row, index);
    let stroke = if editing {
        Stroke::new(2.0, accent_color())
    } else if block.is_configured() {
        ui.visuals().widgets.noninteractive.bg_stroke
    } else {
        Stroke::new(1.0, muted_border())
    };
    let fill = if block.is_configured() || editing {
        ui.visuals().widgets.noninteractive.bg_fill
    } else {
        ui.visuals().faint_bg_color
    };

    let response = Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(Rounding::same(8.0))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_min_height(140.0);
            ui.set_width(ui.available_width());

            if editing {
                config_form::show(ui, editor.session(), id, actions);
                return;
            }

            match &block.config {
                Some(config) => {
                    ui.horizontal(|ui| {
                        let grip = ui
                            .add(Label::new(RichText::new(icons::GRIP).weak()).sense(Sense::drag()))
                            .on_hover_text("Drag to reorder within the row");
                        if grip.drag_started() {
                            actions.push(CanvasAction::BeginBlockDrag(row, index));
                        }
                        ui.label(RichText::new(&config.title).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(icons::EDIT).on_hover_text("Edit block").clicked() {
                                actions.push(CanvasAction::OpenBlock(row, index));
                            }
                        });
                    });
                    let viz_label = catalog::visualization_meta(&config.visualization)
                        .map(|meta| meta.label)
                        .unwrap_or("Unknown");
                    ui.label(RichText::new(viz_label).weak().small());
                    ui.add_space(4.0);
                    renderers.show(ui, &BlockContent::for_block(block), id);
                }
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(30.0);
                        ui.label(RichText::new(icons::ADD).size(22.0).weak());
                        ui.label(RichText::new("Click to configure").weak());
                    });
                }
            }
        })
        .response;

    let rect = response.rect;
    zones.add_block(row, index, rect);

    if !editing && !block.is_configured() {
        let card = ui.interact(rect, id.with("card"), Sense::click());
        if card.clicked() {
            actions.push(CanvasAction::OpenBlock(row, index));
        }
    }

    if let Some(source) = editor.block_drag_source() {
        if source.row == row && source.index == index {
            ui.painter().rect_filled(rect, 8.0, Color32::from_black_alpha(30));
        } else if source.row == row && pointer.is_some_and(|p| rect.contains(p)) {
            ui.painter().rect_stroke(rect, 8.0, Stroke::new(2.0, accent_color()));
        }
    }
}
