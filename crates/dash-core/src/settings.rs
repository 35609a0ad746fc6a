//! Editor settings

use serde::{Deserialize, Serialize};

use crate::model::ColumnCount;

/// Name of the slot the preview surface reads the layout from
pub const DEFAULT_PREVIEW_SLOT: &str = "dashboardPreviewData";

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Column count for rows added without an explicit count
    pub default_columns: ColumnCount,

    /// Column count used by the "Add Row" button
    pub add_row_columns: ColumnCount,

    /// Key of the preview hand-off slot
    pub preview_slot: String,

    /// Whether to use dark mode
    pub dark_mode: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_columns: ColumnCount::default(),
            add_row_columns: ColumnCount::OPTIONS[0],
            preview_slot: DEFAULT_PREVIEW_SLOT.to_string(),
            dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: EditorSettings = serde_json::from_str(r#"{ "add_row_columns": 2 }"#).unwrap();
        assert_eq!(settings.add_row_columns.get(), 2);
        assert_eq!(settings.default_columns.get(), 3);
        assert_eq!(settings.preview_slot, DEFAULT_PREVIEW_SLOT);
    }

    #[test]
    fn test_out_of_range_columns_rejected() {
        assert!(serde_json::from_str::<EditorSettings>(r#"{ "default_columns": 9 }"#).is_err());
    }
}
