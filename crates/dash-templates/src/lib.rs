//! Built-in dashboard layouts
//!
//! A template builds a fresh [`Layout`], drawing ids from the caller's
//! allocator so that instantiated rows never collide with existing ones.

use std::fmt;

use dash_core::{Block, BlockConfig, ColumnCount, IdAllocator, Layout, LayoutError, Row};
use thiserror::Error;
use tracing::debug;

/// Unique identifier for a template
pub type TemplateId = &'static str;

/// Layout the editor starts with
pub const STARTER: TemplateId = "starter";

/// Layout the preview shows when nothing valid was exported
pub const PREVIEW_FALLBACK: TemplateId = "preview-fallback";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template produced an invalid layout: {0}")]
    Invalid(#[from] LayoutError),
}

/// Builds a template's rows
pub trait LayoutBuilder: Send + Sync {
    fn build(&self, ids: &mut IdAllocator) -> Result<Layout, LayoutError>;

    fn clone_box(&self) -> Box<dyn LayoutBuilder>;
}

impl Clone for Box<dyn LayoutBuilder> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<F> LayoutBuilder for F
where
    F: Fn(&mut IdAllocator) -> Result<Layout, LayoutError> + Clone + Send + Sync + 'static,
{
    fn build(&self, ids: &mut IdAllocator) -> Result<Layout, LayoutError> {
        self(ids)
    }

    fn clone_box(&self) -> Box<dyn LayoutBuilder> {
        Box::new(self.clone())
    }
}

/// A dashboard template
#[derive(Clone)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub builder: Box<dyn LayoutBuilder>,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl Template {
    pub fn instantiate(&self, ids: &mut IdAllocator) -> Result<Layout, TemplateError> {
        let layout = self.builder.build(ids)?;
        debug!("Instantiated template '{}' with {} rows", self.id, layout.len());
        Ok(layout)
    }
}

/// Lookup of the built-in templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    pub fn builtin() -> Self {
        Self {
            templates: vec![
                Template {
                    id: STARTER,
                    name: "Starter",
                    description: "One three-column row of empty blocks",
                    builder: Box::new(build_starter),
                },
                Template {
                    id: PREVIEW_FALLBACK,
                    name: "Sample Dashboard",
                    description: "Headline figures above a distribution and a trend",
                    builder: Box::new(build_preview_fallback),
                },
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> + '_ {
        self.templates.iter()
    }

    pub fn instantiate(&self, id: &str, ids: &mut IdAllocator) -> Result<Layout, TemplateError> {
        self.get(id)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))?
            .instantiate(ids)
    }
}

fn build_starter(ids: &mut IdAllocator) -> Result<Layout, LayoutError> {
    Ok(Layout::default().add_row(ColumnCount::default(), ids))
}

fn configured(ids: &mut IdAllocator, data_type: &str, visualization: &str, title: &str, value: Option<&str>) -> Block {
    Block::configured(
        ids.next_block_id(),
        BlockConfig {
            data_type: data_type.to_string(),
            visualization: visualization.to_string(),
            title: title.to_string(),
            value: value.map(str::to_string),
            metric_count: None,
        },
    )
}

fn build_preview_fallback(ids: &mut IdAllocator) -> Result<Layout, LayoutError> {
    let headline = Row {
        id: ids.next_row_id(),
        columns: ColumnCount::new(3)?,
        blocks: vec![
            configured(ids, "documents_processed", "kpi", "Documents Processed", Some("2,847")),
            configured(ids, "extraction_accuracy", "kpi", "Extraction Accuracy", Some("98.5%")),
            configured(ids, "error_rate", "kpi", "Error Rate", Some("1.5%")),
        ],
    };
    let detail = Row {
        id: ids.next_row_id(),
        columns: ColumnCount::new(2)?,
        blocks: vec![
            configured(ids, "document_types", "donut", "Document Types", None),
            configured(ids, "processing_time", "line", "Processing Time Trend", None),
        ],
    };
    Layout::from_rows(vec![headline, detail])
}

/// The editor's initial layout
pub fn starter(ids: &mut IdAllocator) -> Layout {
    build_starter(ids).unwrap_or_default()
}

/// The preview's fallback layout, numbered from 1
pub fn preview_fallback() -> Layout {
    build_preview_fallback(&mut IdAllocator::new()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::{BlockId, RowId};

    #[test]
    fn test_starter_layout() {
        let layout = starter(&mut IdAllocator::new());
        assert_eq!(layout.len(), 1);
        let row = layout.rows().next().unwrap();
        assert_eq!(row.columns.get(), 3);
        assert_eq!(row.configured_count(), 0);
    }

    #[test]
    fn test_preview_fallback_matches_persisted_form() {
        let json = serde_json::to_value(preview_fallback()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "columns": 3, "blocks": [
                    {"id": 1, "configured": true, "dataType": "documents_processed", "graphType": "kpi", "title": "Documents Processed", "value": "2,847"},
                    {"id": 2, "configured": true, "dataType": "extraction_accuracy", "graphType": "kpi", "title": "Extraction Accuracy", "value": "98.5%"},
                    {"id": 3, "configured": true, "dataType": "error_rate", "graphType": "kpi", "title": "Error Rate", "value": "1.5%"}
                ]},
                {"id": 2, "columns": 2, "blocks": [
                    {"id": 4, "configured": true, "dataType": "document_types", "graphType": "donut", "title": "Document Types"},
                    {"id": 5, "configured": true, "dataType": "processing_time", "graphType": "line", "title": "Processing Time Trend"}
                ]}
            ])
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.iter().count(), 2);
        assert!(matches!(
            registry.instantiate("radar", &mut IdAllocator::new()),
            Err(TemplateError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_instantiate_draws_fresh_ids() {
        let registry = TemplateRegistry::builtin();
        let mut ids = IdAllocator::new();
        let first = registry.instantiate(STARTER, &mut ids).unwrap();
        let second = registry.instantiate(PREVIEW_FALLBACK, &mut ids).unwrap();
        assert_eq!(first.max_row_id(), Some(RowId(1)));
        assert_eq!(first.max_block_id(), Some(BlockId(3)));
        assert_eq!(second.rows().next().unwrap().id, RowId(2));
        assert_eq!(second.max_block_id(), Some(BlockId(8)));
    }
}
