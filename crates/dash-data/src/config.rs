//! Editor configuration file

use std::fs;
use std::path::{Path, PathBuf};

use dash_core::EditorSettings;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::DataError;

/// Contents of `dashboard-builder.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor behavior
    pub settings: EditorSettings,

    /// Directory of the file-backed store; `None` keeps the preview slot in memory
    pub storage_dir: Option<PathBuf>,
}

impl EditorConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Read a config file, using defaults when it is absent or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(DataError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No editor config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring editor config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load_or_default(&dir.path().join("absent.json"));
        assert_eq!(config, EditorConfig::default());
        assert!(matches!(
            EditorConfig::load(&dir.path().join("absent.json")),
            Err(DataError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "settings": { "add_row_columns": 7 } }"#).unwrap();
        assert!(matches!(EditorConfig::load(&path), Err(DataError::Json(_))));
        assert_eq!(EditorConfig::load_or_default(&path), EditorConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = EditorConfig::default();
        config.settings.dark_mode = true;
        config.storage_dir = Some(dir.path().join("store"));
        config.save(&path).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "storage_dir": "/tmp/dash" }"#).unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/dash")));
        assert_eq!(config.settings, EditorSettings::default());
    }
}
