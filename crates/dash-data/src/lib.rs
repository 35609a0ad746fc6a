//! Storage, configuration and sample data for the dashboard builder

pub mod config;
pub mod preview;
pub mod samples;
pub mod store;

use thiserror::Error;

// Re-exports
pub use config::EditorConfig;
pub use preview::PreviewSlot;
pub use store::{BlobStore, FileBlobStore, MemoryBlobStore};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("Other error: {0}")]
    Other(String),
}
