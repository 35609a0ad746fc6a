//! Widget utilities for managing IDs and preventing conflicts
//!
//! Rows and blocks are drawn in loops; every interactive widget inside them
//! needs an id derived from the row and block it belongs to.

use egui::Id;
use std::fmt::Display;

/// Widget ID builder that ensures unique IDs by combining multiple components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Add an index to the ID (useful in loops)
    pub fn index(self, idx: usize) -> Self {
        self.with(format!("idx_{}", idx))
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Id of the block at `index` in `row`
pub fn block_widget_id(scope: &str, row: impl Display, index: usize) -> Id {
    WidgetId::new(scope).with("row").with(row).index(index).id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_builder() {
        let id = WidgetId::new("editor").with("row").with(3).index(1).build();
        assert_eq!(id, "editor_row_3_idx_1");
    }

    #[test]
    fn test_block_ids_are_distinct() {
        assert_ne!(block_widget_id("editor", 1, 0), block_widget_id("editor", 1, 1));
        assert_ne!(block_widget_id("editor", 1, 0), block_widget_id("preview", 1, 0));
        assert_eq!(block_widget_id("editor", 2, 0), WidgetId::new("editor_row_2_idx_0").id());
    }
}
