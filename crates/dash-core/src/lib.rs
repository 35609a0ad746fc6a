//! Core functionality for the dashboard builder
//!
//! This crate provides the layout model, its transformations and the
//! interaction state machines that drive the editor.

pub mod catalog;
pub mod drag;
pub mod editor;
pub mod events;
pub mod ids;
pub mod model;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod store;

// Re-export commonly used types
pub use catalog::{CatalogError, DataTypeSpec, RendererKey, VisualizationSpec};
pub use drag::{BlockDrag, BlockDragSource, RowDrag};
pub use editor::{DropTarget, Editor, LayoutStats};
pub use events::EventBus;
pub use ids::IdAllocator;
pub use model::{Block, BlockConfig, BlockId, ColumnCount, Layout, LayoutError, MetricCount, Row, RowId};
pub use persistence::{load_or_fallback, LayoutPersistence};
pub use session::{BlockTarget, ConfigSession, Draft};
pub use settings::EditorSettings;
pub use store::{LayoutStore, Mutation, MutationKind};
