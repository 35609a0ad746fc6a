//! Static registry of data types and visualizations
//!
//! The catalog decides which visualizations may be paired with which data
//! type, and which renderer draws each visualization.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data type whose only visualization is the multi-metric grid
pub const MULTI_METRIC_DATA_TYPE: &str = "kpi_block";

/// Visualization that renders several metrics in one block
pub const MULTI_METRIC_VISUALIZATION: &str = "kpi_block";

/// Errors raised by catalog lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown visualization: {0}")]
    UnknownVisualization(String),

    #[error("unknown data type: {0}")]
    UnknownDataType(String),
}

/// Key selecting the renderer that draws a configured block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKey {
    SingleValue,
    Bar,
    Line,
    Pie,
    Donut,
    Area,
    Gauge,
    Heatmap,
    Table,
    MultiMetricGrid,
}

impl RendererKey {
    /// All renderer keys
    pub const ALL: [RendererKey; 10] = [
        RendererKey::SingleValue,
        RendererKey::Bar,
        RendererKey::Line,
        RendererKey::Pie,
        RendererKey::Donut,
        RendererKey::Area,
        RendererKey::Gauge,
        RendererKey::Heatmap,
        RendererKey::Table,
        RendererKey::MultiMetricGrid,
    ];
}

/// A category of metric the user can place in a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataTypeSpec {
    pub id: &'static str,
    pub label: &'static str,
    /// Compatible visualizations, in the order they are offered
    pub visualizations: &'static [&'static str],
}

/// A chart or table kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualizationSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub renderer: RendererKey,
}

static DATA_TYPES: &[DataTypeSpec] = &[
    DataTypeSpec {
        id: MULTI_METRIC_DATA_TYPE,
        label: "KPI Block (Multiple Metrics)",
        visualizations: &[MULTI_METRIC_VISUALIZATION],
    },
    DataTypeSpec {
        id: "documents_processed",
        label: "Documents Processed",
        visualizations: &["kpi", "bar", "line"],
    },
    DataTypeSpec {
        id: "extraction_accuracy",
        label: "Extraction Accuracy",
        visualizations: &["kpi", "gauge", "line"],
    },
    DataTypeSpec {
        id: "document_types",
        label: "Document Types Distribution",
        visualizations: &["pie", "donut", "bar"],
    },
    DataTypeSpec {
        id: "processing_time",
        label: "Processing Time",
        visualizations: &["line", "bar", "area"],
    },
    DataTypeSpec {
        id: "error_rate",
        label: "Error Rate",
        visualizations: &["kpi", "line", "gauge"],
    },
    DataTypeSpec {
        id: "field_extraction",
        label: "Field Extraction Success",
        visualizations: &["bar", "donut", "table"],
    },
    DataTypeSpec {
        id: "user_activity",
        label: "User Activity",
        visualizations: &["line", "bar", "heatmap"],
    },
];

static VISUALIZATIONS: &[VisualizationSpec] = &[
    VisualizationSpec { id: MULTI_METRIC_VISUALIZATION, label: "KPI Block", renderer: RendererKey::MultiMetricGrid },
    VisualizationSpec { id: "kpi", label: "Single KPI", renderer: RendererKey::SingleValue },
    VisualizationSpec { id: "bar", label: "Bar Chart", renderer: RendererKey::Bar },
    VisualizationSpec { id: "line", label: "Line Chart", renderer: RendererKey::Line },
    VisualizationSpec { id: "pie", label: "Pie Chart", renderer: RendererKey::Pie },
    VisualizationSpec { id: "donut", label: "Donut Chart", renderer: RendererKey::Donut },
    VisualizationSpec { id: "gauge", label: "Gauge", renderer: RendererKey::Gauge },
    VisualizationSpec { id: "area", label: "Area Chart", renderer: RendererKey::Area },
    VisualizationSpec { id: "table", label: "Data Table", renderer: RendererKey::Table },
    VisualizationSpec { id: "heatmap", label: "Heatmap", renderer: RendererKey::Heatmap },
];

static DATA_TYPE_INDEX: Lazy<AHashMap<&'static str, &'static DataTypeSpec>> =
    Lazy::new(|| DATA_TYPES.iter().map(|spec| (spec.id, spec)).collect());

static VISUALIZATION_INDEX: Lazy<AHashMap<&'static str, &'static VisualizationSpec>> =
    Lazy::new(|| VISUALIZATIONS.iter().map(|spec| (spec.id, spec)).collect());

/// All data types, in the order the configuration form offers them
pub fn data_types() -> &'static [DataTypeSpec] {
    DATA_TYPES
}

/// All registered visualizations
pub fn visualizations() -> &'static [VisualizationSpec] {
    VISUALIZATIONS
}

/// Look up a data type by id
pub fn data_type(id: &str) -> Result<&'static DataTypeSpec, CatalogError> {
    DATA_TYPE_INDEX
        .get(id)
        .copied()
        .ok_or_else(|| CatalogError::UnknownDataType(id.to_string()))
}

/// Visualizations compatible with a data type; empty if the data type is unknown
pub fn compatible_visualizations(data_type: &str) -> &'static [&'static str] {
    DATA_TYPE_INDEX
        .get(data_type)
        .map(|spec| spec.visualizations)
        .unwrap_or(&[])
}

/// Label and renderer for a visualization
pub fn visualization_meta(id: &str) -> Result<&'static VisualizationSpec, CatalogError> {
    VISUALIZATION_INDEX
        .get(id)
        .copied()
        .ok_or_else(|| CatalogError::UnknownVisualization(id.to_string()))
}

/// Whether `visualization` may be paired with `data_type`
pub fn is_compatible(data_type: &str, visualization: &str) -> bool {
    compatible_visualizations(data_type).contains(&visualization)
}

pub fn is_multi_metric_data_type(data_type: &str) -> bool {
    data_type == MULTI_METRIC_DATA_TYPE
}

pub fn is_multi_metric_visualization(visualization: &str) -> bool {
    visualization == MULTI_METRIC_VISUALIZATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_visualizations() {
        assert_eq!(compatible_visualizations("documents_processed"), &["kpi", "bar", "line"]);
        assert_eq!(compatible_visualizations("user_activity"), &["line", "bar", "heatmap"]);
        assert!(compatible_visualizations("no_such_type").is_empty());
    }

    #[test]
    fn test_multi_metric_type_has_single_visualization() {
        assert_eq!(
            compatible_visualizations(MULTI_METRIC_DATA_TYPE),
            &[MULTI_METRIC_VISUALIZATION]
        );
        let meta = visualization_meta(MULTI_METRIC_VISUALIZATION).unwrap();
        assert_eq!(meta.renderer, RendererKey::MultiMetricGrid);
    }

    #[test]
    fn test_every_offered_visualization_is_registered() {
        for spec in data_types() {
            for viz in spec.visualizations {
                assert!(visualization_meta(viz).is_ok(), "{} offers unregistered {}", spec.id, viz);
            }
        }
    }

    #[test]
    fn test_unknown_visualization() {
        assert_eq!(
            visualization_meta("sparkline"),
            Err(CatalogError::UnknownVisualization("sparkline".to_string()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(data_type("documents_processed").unwrap().label, "Documents Processed");
        assert_eq!(visualization_meta("table").unwrap().label, "Data Table");
        assert!(is_compatible("error_rate", "gauge"));
        assert!(!is_compatible("error_rate", "pie"));
    }

    #[test]
    fn test_every_renderer_key_is_reachable() {
        for key in RendererKey::ALL {
            assert!(visualizations().iter().any(|v| v.renderer == key));
        }
    }
}
