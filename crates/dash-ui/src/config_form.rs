//! Inline form for configuring the block under edit

use dash_core::catalog;
use dash_core::{ConfigSession, MetricCount};
use egui::{Button, ComboBox, Id, RichText, Ui};

use crate::canvas::CanvasAction;

const CHOOSE_DATA_TYPE: &str = "Select data type...";
const CHOOSE_VISUALIZATION: &str = "Select visualization...";

fn data_type_label(id: Option<&str>) -> &'static str {
    id.and_then(|id| catalog::data_type(id).ok())
        .map(|spec| spec.label)
        .unwrap_or(CHOOSE_DATA_TYPE)
}

fn visualization_label(id: Option<&str>) -> &'static str {
    id.and_then(|id| catalog::visualization_meta(id).ok())
        .map(|meta| meta.label)
        .unwrap_or(CHOOSE_VISUALIZATION)
}

/// Draw the form for the open session
pub fn show(ui: &mut Ui, session: &ConfigSession, id: Id, actions: &mut Vec<CanvasAction>) {
    let Some(draft) = session.draft() else {
        return;
    };

    ui.label(RichText::new("Configure Block").strong());
    ui.add_space(4.0);

    ui.label(RichText::new("Data Type").small());
    ComboBox::from_id_source(id.with("data_type"))
        .width(ui.available_width())
        .selected_text(data_type_label(draft.data_type.as_deref()))
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(draft.data_type.is_none(), CHOOSE_DATA_TYPE)
                .clicked()
                && draft.data_type.is_some()
            {
                actions.push(CanvasAction::ClearDataType);
            }
            for spec in catalog::data_types() {
                let selected = draft.data_type.as_deref() == Some(spec.id);
                if ui.selectable_label(selected, spec.label).clicked() && !selected {
                    actions.push(CanvasAction::SelectDataType(spec.id.to_string()));
                }
            }
        });

    if session.shows_visualization_step() && draft.data_type.is_some() {
        ui.add_space(4.0);
        ui.label(RichText::new("Visualization").small());
        ComboBox::from_id_source(id.with("visualization"))
            .width(ui.available_width())
            .selected_text(visualization_label(draft.visualization.as_deref()))
            .show_ui(ui, |ui| {
                for viz in session.visualization_choices() {
                    let selected = draft.visualization.as_deref() == Some(*viz);
                    if ui.selectable_label(selected, visualization_label(Some(viz))).clicked() && !selected {
                        actions.push(CanvasAction::SelectVisualization(viz.to_string()));
                    }
                }
            });
    }

    if session.shows_metric_count_step() {
        ui.add_space(4.0);
        ui.label(RichText::new("Number of KPIs").small());
        ui.horizontal(|ui| {
            for count in MetricCount::OPTIONS {
                let label = format!("{} KPIs", count.get());
                if ui.radio(draft.metric_count == count, label).clicked() {
                    actions.push(CanvasAction::SelectMetricCount(count));
                }
            }
        });
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            actions.push(CanvasAction::CancelSession);
        }
        if ui.add_enabled(session.can_commit(), Button::new("Apply")).clicked() {
            actions.push(CanvasAction::CommitSession);
        }
    });
}
