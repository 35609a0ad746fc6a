//! Key-value blob storage
//!
//! The editor and the preview surface never talk to each other directly;
//! they share one of these stores and agree on a key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::DataError;

/// String-valued storage addressed by key
pub trait BlobStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, DataError>;

    /// Write a value, replacing any previous one
    fn put(&self, key: &str, value: &str) -> Result<(), DataError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), DataError>;
}

/// In-process store, shared by cloning
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    values: Arc<RwLock<AHashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), DataError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DataError> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// The directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DataError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DataError::Malformed(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, DataError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), DataError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename so a reader never sees half a value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DataError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
