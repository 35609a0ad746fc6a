//! Identifier allocation for rows and blocks

use crate::model::{BlockId, Layout, RowId};

/// Hands out row and block ids that are never reused
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_row: u64,
    next_block: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_row: 1,
            next_block: 1,
        }
    }
}

impl IdAllocator {
    /// Create an allocator starting at id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose ids start past every id in `layout`
    pub fn seeded_from(layout: &Layout) -> Self {
        let mut ids = Self::new();
        ids.observe(layout);
        ids
    }

    /// Move the counters past every id in `layout`
    pub fn observe(&mut self, layout: &Layout) {
        if let Some(RowId(max)) = layout.max_row_id() {
            self.next_row = self.next_row.max(max.saturating_add(1));
        }
        if let Some(BlockId(max)) = layout.max_block_id() {
            self.next_block = self.next_block.max(max.saturating_add(1));
        }
    }

    pub fn next_row_id(&mut self) -> RowId {
        let id = RowId(self.next_row);
        self.next_row = self.next_row.saturating_add(1);
        id
    }

    pub fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block = self.next_block.saturating_add(1);
        id
    }
}
