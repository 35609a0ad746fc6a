//! Drag-and-drop reorder protocol
//!
//! Rows and blocks each have their own instance. A gesture is
//! `begin` → `drop` (or `cancel`); a drop resolves into at most one
//! [`Mutation`] and always returns the protocol to idle.

use tracing::debug;

use crate::model::{BlockId, Layout, RowId};
use crate::store::Mutation;

/// State of a single drag protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState<S> {
    Idle,
    Dragging(S),
}

impl<S> Default for DragState<S> {
    fn default() -> Self {
        DragState::Idle
    }
}

impl<S: Copy> DragState<S> {
    pub fn source(&self) -> Option<S> {
        match self {
            DragState::Dragging(source) => Some(*source),
            DragState::Idle => None,
        }
    }

    fn take(&mut self) -> Option<S> {
        let source = self.source();
        *self = DragState::Idle;
        source
    }
}

/// Row reordering
#[derive(Debug, Clone, Default)]
pub struct RowDrag {
    state: DragState<RowId>,
}

impl RowDrag {
    pub fn begin(&mut self, row: RowId) {
        self.state = DragState::Dragging(row);
    }

    pub fn source(&self) -> Option<RowId> {
        self.state.source()
    }

    pub fn is_dragging(&self) -> bool {
        self.source().is_some()
    }

    /// Every row is a valid drop target while a row is being dragged
    pub fn accepts(&self, _target: RowId) -> bool {
        self.is_dragging()
    }

    pub fn drop_on(&mut self, target: RowId) -> Option<Mutation> {
        let dragged = self.state.take()?;
        if dragged == target {
            return None;
        }
        Some(Mutation::ReorderRows { dragged, target })
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Block captured at drag start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDragSource {
    pub block: BlockId,
    pub row: RowId,
    pub index: usize,
}

/// Block reordering within a single row
#[derive(Debug, Clone, Default)]
pub struct BlockDrag {
    state: DragState<BlockDragSource>,
}

impl BlockDrag {
    /// Start dragging a block; unconfigured blocks cannot be dragged
    pub fn begin(&mut self, layout: &Layout, row: RowId, index: usize) -> bool {
        match layout.block(row, index) {
            Some(block) if block.is_configured() => {
                self.state = DragState::Dragging(BlockDragSource {
                    block: block.id,
                    row,
                    index,
                });
                true
            }
            _ => false,
        }
    }

    pub fn source(&self) -> Option<BlockDragSource> {
        self.state.source()
    }

    pub fn is_dragging(&self) -> bool {
        self.source().is_some()
    }

    /// Resolve a drop; same-position, cross-row and stale drops are ignored
    pub fn drop_on(&mut self, layout: &Layout, row: RowId, index: usize) -> Option<Mutation> {
        let source = self.state.take()?;
        if source.row == row && source.index == index {
            return None;
        }
        if source.row != row {
            debug!("Ignoring cross-row block drop from row {} to row {}", source.row, row);
            return None;
        }
        if layout.block(source.row, source.index).map(|b| b.id) != Some(source.block) {
            debug!("Ignoring drop of block {}: it moved since the drag started", source.block);
            return None;
        }
        Some(Mutation::ReorderBlocks {
            row,
            from: source.index,
            to: index,
        })
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
