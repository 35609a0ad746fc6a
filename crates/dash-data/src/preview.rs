//! Preview hand-off slot
//!
//! The editor serializes the whole layout into one key of a [`BlobStore`];
//! the preview surface reads it back once when it opens.

use std::sync::Arc;

use dash_core::persistence::LayoutPersistence;
use dash_core::settings::DEFAULT_PREVIEW_SLOT;
use dash_core::Layout;
use tracing::{debug, info};

use crate::store::BlobStore;
use crate::DataError;

/// Serialize a layout to the persisted JSON form
pub fn encode(layout: &Layout) -> Result<String, DataError> {
    Ok(serde_json::to_string(layout)?)
}

/// Parse and validate the persisted JSON form
pub fn decode(json: &str) -> Result<Layout, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// One key of a blob store holding the most recently exported layout
#[derive(Clone)]
pub struct PreviewSlot {
    store: Arc<dyn BlobStore>,
    key: String,
}

impl PreviewSlot {
    pub fn new(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Slot under the default key
    pub fn with_default_key(store: Arc<dyn BlobStore>) -> Self {
        Self::new(store, DEFAULT_PREVIEW_SLOT)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn write(&self, layout: &Layout) -> Result<(), DataError> {
        let json = encode(layout)?;
        self.store.put(&self.key, &json)?;
        info!("Stored layout ({} rows) under '{}'", layout.len(), self.key);
        Ok(())
    }

    pub fn read(&self) -> Result<Option<Layout>, DataError> {
        match self.store.get(&self.key)? {
            Some(json) => {
                let layout = decode(&json)?;
                debug!("Read layout ({} rows) from '{}'", layout.len(), self.key);
                Ok(Some(layout))
            }
            None => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<(), DataError> {
        self.store.remove(&self.key)
    }
}

impl LayoutPersistence for PreviewSlot {
    fn save(&self, layout: &Layout) -> anyhow::Result<()> {
        Ok(self.write(layout)?)
    }

    fn load(&self) -> anyhow::Result<Option<Layout>> {
        Ok(self.read()?)
    }
}
