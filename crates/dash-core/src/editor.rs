//! The dashboard editor: layout, configuration session and drag state

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::drag::{BlockDrag, BlockDragSource, RowDrag};
use crate::events::events::{LayoutChanged, PreviewExported, SessionClosed, SessionOpened};
use crate::events::EventBus;
use crate::model::{ColumnCount, Layout, MetricCount, RowId};
use crate::persistence::LayoutPersistence;
use crate::session::{BlockTarget, ConfigSession};
use crate::settings::EditorSettings;
use crate::store::{LayoutStore, Mutation};

/// Counters shown in the editor toolbar, derived from the layout on every read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    pub rows: usize,
    pub total_blocks: usize,
    pub configured_blocks: usize,
}

impl LayoutStats {
    pub fn of(layout: &Layout) -> Self {
        Self {
            rows: layout.len(),
            total_blocks: layout.total_blocks(),
            configured_blocks: layout.configured_blocks(),
        }
    }
}

impl fmt::Display for LayoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row{} • {}/{} blocks configured",
            self.rows,
            if self.rows == 1 { "" } else { "s" },
            self.configured_blocks,
            self.total_blocks
        )
    }
}

/// Where a drop landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Row(RowId),
    Block { row: RowId, index: usize },
}

/// Interactive editor state
///
/// All methods run synchronously on the UI thread; each one completes its
/// state transition before the next input is handled.
pub struct Editor {
    store: LayoutStore,
    session: ConfigSession,
    row_drag: RowDrag,
    block_drag: BlockDrag,
    settings: EditorSettings,
    events: Arc<EventBus>,
}

impl Editor {
    pub fn new(layout: Layout, settings: EditorSettings) -> Self {
        Self {
            store: LayoutStore::new(layout),
            session: ConfigSession::Closed,
            row_drag: RowDrag::default(),
            block_drag: BlockDrag::default(),
            settings,
            events: Arc::new(EventBus::new()),
        }
    }

    pub fn layout(&self) -> &Layout {
        self.store.layout()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn session(&self) -> &ConfigSession {
        &self.session
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats::of(self.layout())
    }

    /// Replace the whole layout, closing any session and drag
    pub fn replace_layout(&mut self, layout: Layout) {
        self.session.cancel();
        self.cancel_drags();
        self.store.replace(layout);
    }

    fn apply(&mut self, mutation: Mutation) -> bool {
        let changed = self.store.apply(&mutation);
        if changed {
            let stats = self.stats();
            debug!("Applied {:?}: {}", mutation.kind(), stats);
            self.events.publish(LayoutChanged {
                kind: mutation.kind(),
                rows: stats.rows,
                blocks: stats.total_blocks,
            });
        }
        changed
    }

    // Rows

    /// Append a row using the "Add Row" column count
    pub fn add_row(&mut self) -> bool {
        let columns = self.settings.add_row_columns;
        self.add_row_with(columns)
    }

    /// Append a row using the generic default column count
    pub fn add_default_row(&mut self) -> bool {
        let columns = self.settings.default_columns;
        self.add_row_with(columns)
    }

    pub fn add_row_with(&mut self, columns: ColumnCount) -> bool {
        self.apply(Mutation::AddRow { columns })
    }

    pub fn delete_row(&mut self, row: RowId) -> bool {
        self.apply(Mutation::DeleteRow { row })
    }

    pub fn resize_row(&mut self, row: RowId, columns: ColumnCount) -> bool {
        self.apply(Mutation::ResizeRow { row, columns })
    }

    // Configuration session

    pub fn open_block(&mut self, row: RowId, index: usize) -> bool {
        let opened = self.session.open_for(self.store.layout(), BlockTarget::new(row, index));
        if opened {
            self.events.publish(SessionOpened { row, index });
        }
        opened
    }

    pub fn is_editing(&self, row: RowId, index: usize) -> bool {
        self.session.is_editing(BlockTarget::new(row, index))
    }

    pub fn select_data_type(&mut self, data_type: &str) -> bool {
        self.session.select_data_type(data_type)
    }

    pub fn clear_data_type(&mut self) {
        self.session.clear_data_type();
    }

    pub fn select_visualization(&mut self, visualization: &str) -> bool {
        self.session.select_visualization(visualization)
    }

    pub fn select_metric_count(&mut self, count: MetricCount) -> bool {
        self.session.select_metric_count(count)
    }

    /// Apply the open session's selection and close it
    ///
    /// Returns `false` without closing the session while the selection is
    /// incomplete. The `SessionClosed` event reports whether the layout
    /// actually changed.
    pub fn commit_session(&mut self) -> bool {
        let Some(mutation) = self.session.commit() else {
            return false;
        };
        if let Mutation::ConfigureBlock { row, index, data_type, visualization, .. } = &mutation {
            info!("Configuring row {} block {} as {} / {}", row, index, data_type, visualization);
        }
        let changed = self.apply(mutation);
        self.events.publish(SessionClosed { committed: changed });
        true
    }

    pub fn cancel_session(&mut self) -> bool {
        let cancelled = self.session.cancel();
        if cancelled {
            self.events.publish(SessionClosed { committed: false });
        }
        cancelled
    }

    // Drag and drop

    pub fn begin_row_drag(&mut self, row: RowId) {
        if self.layout().row(row).is_some() {
            self.row_drag.begin(row);
        }
    }

    /// Start dragging a block; the row-level protocol never sees this gesture
    pub fn begin_block_drag(&mut self, row: RowId, index: usize) -> bool {
        self.block_drag.begin(self.store.layout(), row, index)
    }

    pub fn row_drag_source(&self) -> Option<RowId> {
        self.row_drag.source()
    }

    pub fn block_drag_source(&self) -> Option<BlockDragSource> {
        self.block_drag.source()
    }

    /// Whether a drag is hovering over a row that would accept it
    pub fn drag_over_row(&self, row: RowId) -> bool {
        self.row_drag.accepts(row)
    }

    /// Resolve a drop; returns whether the layout changed
    ///
    /// A drop on a block is handled by the block protocol alone, a drop on a
    /// row by the row protocol alone.
    pub fn drop_on(&mut self, target: DropTarget) -> bool {
        let mutation = match target {
            DropTarget::Block { row, index } => self.block_drag.drop_on(self.store.layout(), row, index),
            DropTarget::Row(row) => self.row_drag.drop_on(row),
        };
        match mutation {
            Some(mutation) => self.apply(mutation),
            None => false,
        }
    }

    /// Abandon any drag in progress without touching the layout
    pub fn cancel_drags(&mut self) {
        self.row_drag.cancel();
        self.block_drag.cancel();
    }

    // Preview hand-off

    /// Write the layout for the preview surface; failures are logged, not raised
    pub fn export_preview(&self, persistence: &dyn LayoutPersistence) -> bool {
        match persistence.save(self.layout()) {
            Ok(()) => {
                info!("Exported layout with {} rows for preview", self.layout().len());
                self.events.publish(PreviewExported { rows: self.layout().len() });
                true
            }
            Err(e) => {
                error!("Failed to export layout for preview: {:#}", e);
                false
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Layout::default(), EditorSettings::default())
    }
}
