//! Layout transformations
//!
//! Every operation takes the current layout and produces a new one. Rows that
//! an operation does not touch are shared with the previous layout. Requests
//! that do not apply (unknown ids, out-of-range indices, same-position moves,
//! incomplete configurations) leave the layout unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog;
use crate::ids::IdAllocator;
use crate::model::{Block, BlockConfig, ColumnCount, Layout, MetricCount, Row, RowId};

/// A single layout change, as produced by a drop or a session commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    AddRow {
        columns: ColumnCount,
    },
    DeleteRow {
        row: RowId,
    },
    ResizeRow {
        row: RowId,
        columns: ColumnCount,
    },
    ReorderRows {
        dragged: RowId,
        target: RowId,
    },
    ReorderBlocks {
        row: RowId,
        from: usize,
        to: usize,
    },
    ConfigureBlock {
        row: RowId,
        index: usize,
        data_type: String,
        visualization: String,
        metric_count: MetricCount,
    },
}

/// Discriminant of a [`Mutation`], used in events and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    AddRow,
    DeleteRow,
    ResizeRow,
    ReorderRows,
    ReorderBlocks,
    ConfigureBlock,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::AddRow { .. } => MutationKind::AddRow,
            Mutation::DeleteRow { .. } => MutationKind::DeleteRow,
            Mutation::ResizeRow { .. } => MutationKind::ResizeRow,
            Mutation::ReorderRows { .. } => MutationKind::ReorderRows,
            Mutation::ReorderBlocks { .. } => MutationKind::ReorderBlocks,
            Mutation::ConfigureBlock { .. } => MutationKind::ConfigureBlock,
        }
    }

    /// Apply to `layout`; `None` when the mutation does not change it
    pub fn apply_to(&self, layout: &Layout, ids: &mut IdAllocator) -> Option<Layout> {
        match self {
            Mutation::AddRow { columns } => Some(with_row_added(layout, *columns, ids)),
            Mutation::DeleteRow { row } => with_row_deleted(layout, *row),
            Mutation::ResizeRow { row, columns } => with_row_resized(layout, *row, *columns, ids),
            Mutation::ReorderRows { dragged, target } => with_rows_reordered(layout, *dragged, *target),
            Mutation::ReorderBlocks { row, from, to } => with_blocks_reordered(layout, *row, *from, *to),
            Mutation::ConfigureBlock {
                row,
                index,
                data_type,
                visualization,
                metric_count,
            } => with_block_configured(layout, *row, *index, data_type, visualization, *metric_count),
        }
    }
}

impl Layout {
    /// Append a row of `columns` fresh unconfigured blocks
    pub fn add_row(&self, columns: ColumnCount, ids: &mut IdAllocator) -> Layout {
        with_row_added(self, columns, ids)
    }

    /// Remove the row with id `row`
    pub fn delete_row(&self, row: RowId) -> Layout {
        with_row_deleted(self, row).unwrap_or_else(|| self.clone())
    }

    /// Grow a row with fresh blocks or truncate it from the end
    pub fn resize_row(&self, row: RowId, columns: ColumnCount, ids: &mut IdAllocator) -> Layout {
        with_row_resized(self, row, columns, ids).unwrap_or_else(|| self.clone())
    }

    /// Move `dragged` to the index `target` occupies
    pub fn reorder_rows(&self, dragged: RowId, target: RowId) -> Layout {
        with_rows_reordered(self, dragged, target).unwrap_or_else(|| self.clone())
    }

    /// Move the block at `from` to `to` within one row
    pub fn reorder_blocks_within_row(&self, row: RowId, from: usize, to: usize) -> Layout {
        with_blocks_reordered(self, row, from, to).unwrap_or_else(|| self.clone())
    }

    /// Commit a data type and visualization to one block
    pub fn apply_block_configuration(
        &self,
        row: RowId,
        index: usize,
        data_type: &str,
        visualization: &str,
        metric_count: MetricCount,
    ) -> Layout {
        with_block_configured(self, row, index, data_type, visualization, metric_count)
            .unwrap_or_else(|| self.clone())
    }

    /// Replace a single row, sharing every other row
    fn with_row(&self, index: usize, row: Row) -> Layout {
        let mut rows = self.rows.clone();
        rows[index] = Arc::new(row);
        Layout { rows }
    }
}

/// Index a block lands on after being removed from `from` and reinserted at `to`
///
/// Moving towards the end inserts one slot earlier because removal shifts
/// the later blocks down.
pub fn adjusted_insert_index(from: usize, to: usize) -> usize {
    if from < to {
        to - 1
    } else {
        to
    }
}

fn fresh_blocks(count: usize, ids: &mut IdAllocator) -> impl Iterator<Item = Block> + '_ {
    (0..count).map(move |_| Block::unconfigured(ids.next_block_id()))
}

fn with_row_added(layout: &Layout, columns: ColumnCount, ids: &mut IdAllocator) -> Layout {
    let row = Row {
        id: ids.next_row_id(),
        columns,
        blocks: fresh_blocks(columns.get(), ids).collect(),
    };
    let mut rows = layout.rows.clone();
    rows.push(Arc::new(row));
    Layout { rows }
}

fn with_row_deleted(layout: &Layout, row: RowId) -> Option<Layout> {
    let index = layout.row_index(row)?;
    let mut rows = layout.rows.clone();
    rows.remove(index);
    Some(Layout { rows })
}

fn with_row_resized(layout: &Layout, row: RowId, columns: ColumnCount, ids: &mut IdAllocator) -> Option<Layout> {
    let index = layout.row_index(row)?;
    let current = &layout.rows[index];
    let wanted = columns.get();
    if current.columns == columns && current.blocks.len() == wanted {
        return None;
    }

    let mut blocks = current.blocks.clone();
    if wanted > blocks.len() {
        let missing = wanted - blocks.len();
        blocks.extend(fresh_blocks(missing, ids));
    } else {
        blocks.truncate(wanted);
    }

    Some(layout.with_row(
        index,
        Row {
            id: current.id,
            columns,
            blocks,
        },
    ))
}

fn with_rows_reordered(layout: &Layout, dragged: RowId, target: RowId) -> Option<Layout> {
    if dragged == target {
        return None;
    }
    let dragged_index = layout.row_index(dragged)?;
    let target_index = layout.row_index(target)?;

    let mut rows = layout.rows.clone();
    let moved = rows.remove(dragged_index);
    rows.insert(target_index, moved);
    Some(Layout { rows })
}

fn with_blocks_reordered(layout: &Layout, row: RowId, from: usize, to: usize) -> Option<Layout> {
    let index = layout.row_index(row)?;
    let current = &layout.rows[index];
    let len = current.blocks.len();
    if from >= len || to >= len {
        return None;
    }
    let insert_at = adjusted_insert_index(from, to);
    if insert_at == from {
        return None;
    }

    let mut blocks = current.blocks.clone();
    let moved = blocks.remove(from);
    blocks.insert(insert_at, moved);

    Some(layout.with_row(
        index,
        Row {
            id: current.id,
            columns: current.columns,
            blocks,
        },
    ))
}

fn with_block_configured(
    layout: &Layout,
    row: RowId,
    index: usize,
    data_type: &str,
    visualization: &str,
    metric_count: MetricCount,
) -> Option<Layout> {
    if data_type.is_empty() || visualization.is_empty() {
        return None;
    }
    let spec = match catalog::data_type(data_type) {
        Ok(spec) => spec,
        Err(e) => {
            debug!("Ignoring configuration: {}", e);
            return None;
        }
    };
    if !catalog::is_compatible(data_type, visualization) {
        debug!("Ignoring configuration: '{}' cannot be shown as '{}'", data_type, visualization);
        return None;
    }

    let row_index = layout.row_index(row)?;
    let current = &layout.rows[row_index];
    let existing = current.blocks.get(index)?;

    let config = BlockConfig {
        data_type: data_type.to_string(),
        visualization: visualization.to_string(),
        title: spec.label.to_string(),
        value: existing.value().map(str::to_string),
        metric_count: catalog::is_multi_metric_visualization(visualization).then_some(metric_count),
    };

    let mut blocks = current.blocks.clone();
    blocks[index] = Block::configured(existing.id, config);

    Some(layout.with_row(
        row_index,
        Row {
            id: current.id,
            columns: current.columns,
            blocks,
        },
    ))
}

/// Holds the current layout and the id allocator that extends it
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    layout: Layout,
    ids: IdAllocator,
}

impl LayoutStore {
    pub fn new(layout: Layout) -> Self {
        let ids = IdAllocator::seeded_from(&layout);
        Self { layout, ids }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Cheap copy of the current layout (rows are shared)
    pub fn snapshot(&self) -> Layout {
        self.layout.clone()
    }

    /// Apply a mutation, returning whether the layout changed
    pub fn apply(&mut self, mutation: &Mutation) -> bool {
        match mutation.apply_to(&self.layout, &mut self.ids) {
            Some(next) => {
                self.layout = next;
                true
            }
            None => {
                debug!("{:?} left the layout unchanged", mutation.kind());
                false
            }
        }
    }

    /// Adopt a different layout, keeping ids unique across both
    pub fn replace(&mut self, layout: Layout) {
        self.ids.observe(&layout);
        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockId;

    fn cols(n: u8) -> ColumnCount {
        ColumnCount::new(n).unwrap()
    }

    fn single_row(columns: u8) -> (Layout, IdAllocator, RowId) {
        let mut ids = IdAllocator::new();
        let layout = Layout::default().add_row(cols(columns), &mut ids);
        let row = layout.rows().next().unwrap().id;
        (layout, ids, row)
    }

    fn block_ids(layout: &Layout, row: RowId) -> Vec<BlockId> {
        layout.row(row).unwrap().blocks.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_add_row_creates_unconfigured_blocks() {
        let (layout, _, row) = single_row(3);
        let row = layout.row(row).unwrap();
        assert_eq!(row.blocks.len(), 3);
        assert_eq!(row.columns, cols(3));
        assert!(row.blocks.iter().all(|b| !b.is_configured()));
    }

    #[test]
    fn test_delete_row() {
        let (layout, mut ids, first) = single_row(2);
        let layout = layout.add_row(cols(1), &mut ids);
        let deleted = layout.delete_row(first);
        assert_eq!(deleted.len(), 1);
        assert!(deleted.row(first).is_none());

        // Unknown id is a no-op
        assert_eq!(deleted.delete_row(RowId(999)), deleted);
    }

    #[test]
    fn test_resize_shrink_keeps_unconfigured_block() {
        let (layout, mut ids, row) = single_row(3);
        let resized = layout.resize_row(row, cols(1), &mut ids);
        let r = resized.row(row).unwrap();
        assert_eq!(r.blocks.len(), 1);
        assert_eq!(r.columns, cols(1));
        assert!(!r.blocks[0].is_configured());
    }

    #[test]
    fn test_resize_preserves_leading_configuration() {
        for old in 1..=4u8 {
            for new in 1..=4u8 {
                let (layout, mut ids, row) = single_row(old);
                let mut configured = layout.clone();
                for index in 0..old as usize {
                    configured = configured.apply_block_configuration(
                        row,
                        index,
                        "error_rate",
                        "gauge",
                        MetricCount::default(),
                    );
                }
                let resized = configured.resize_row(row, cols(new), &mut ids);
                let before = configured.row(row).unwrap();
                let after = resized.row(row).unwrap();

                assert_eq!(after.blocks.len(), new as usize);
                let kept = old.min(new) as usize;
                assert_eq!(&after.blocks[..kept], &before.blocks[..kept]);
                assert!(after.blocks[kept..].iter().all(|b| !b.is_configured()));
            }
        }
    }

    #[test]
    fn test_resize_growth_uses_fresh_ids() {
        let (layout, mut ids, row) = single_row(1);
        let same = layout.resize_row(row, cols(1), &mut ids);
        assert_eq!(same, layout);

        let grown = layout.resize_row(row, cols(3), &mut ids);
        let ids_after = block_ids(&grown, row);
        assert_eq!(ids_after.len(), 3);
        assert_eq!(ids_after[0], block_ids(&layout, row)[0]);
        assert!(ids_after[1] != ids_after[0] && ids_after[2] != ids_after[1]);
    }

    #[test]
    fn test_resize_unknown_row_is_noop() {
        let (layout, mut ids, _) = single_row(2);
        assert_eq!(layout.resize_row(RowId(42), cols(4), &mut ids), layout);
    }

    #[test]
    fn test_untouched_rows_are_shared() {
        let (layout, mut ids, first) = single_row(2);
        let layout = layout.add_row(cols(3), &mut ids);
        let second = layout.rows().nth(1).unwrap().id;

        let resized = layout.resize_row(second, cols(1), &mut ids);
        assert!(resized.shares_row_with(&layout, first));
        assert!(!resized.shares_row_with(&layout, second));
    }

    #[test]
    fn test_reorder_rows() {
        let mut ids = IdAllocator::new();
        let mut layout = Layout::default();
        for _ in 0..3 {
            layout = layout.add_row(cols(1), &mut ids);
        }
        let order = |l: &Layout| l.rows().map(|r| r.id.0).collect::<Vec<_>>();
        assert_eq!(order(&layout), vec![1, 2, 3]);

        // Upwards: lands in front of the target
        assert_eq!(order(&layout.reorder_rows(RowId(3), RowId(1))), vec![3, 1, 2]);
        // Downwards: takes the target's original index
        assert_eq!(order(&layout.reorder_rows(RowId(1), RowId(3))), vec![2, 3, 1]);
        assert_eq!(order(&layout.reorder_rows(RowId(1), RowId(2))), vec![2, 1, 3]);

        assert_eq!(layout.reorder_rows(RowId(2), RowId(2)), layout);
        assert_eq!(layout.reorder_rows(RowId(2), RowId(9)), layout);
        assert_eq!(layout.reorder_rows(RowId(9), RowId(2)), layout);
    }

    #[test]
    fn test_reorder_blocks_canonical_trace() {
        // [A, B, C]: dropping B (1) onto C (2) removes B, then inserts at 2 - 1 = 1
        let (layout, _, row) = single_row(3);
        let before = block_ids(&layout, row);
        let after = layout.reorder_blocks_within_row(row, 1, 2);
        assert_eq!(block_ids(&after, row), before);
        assert_eq!(after, layout);
    }

    #[test]
    fn test_reorder_blocks_moves() {
        let (layout, _, row) = single_row(4);
        let [a, b, c, d]: [BlockId; 4] = block_ids(&layout, row).try_into().unwrap();

        assert_eq!(block_ids(&layout.reorder_blocks_within_row(row, 0, 3), row), vec![b, c, a, d]);
        assert_eq!(block_ids(&layout.reorder_blocks_within_row(row, 3, 0), row), vec![d, a, b, c]);
        assert_eq!(block_ids(&layout.reorder_blocks_within_row(row, 2, 1), row), vec![a, c, b, d]);
        assert_eq!(layout.reorder_blocks_within_row(row, 2, 2), layout);
        assert_eq!(layout.reorder_blocks_within_row(row, 0, 4), layout);
        assert_eq!(layout.reorder_blocks_within_row(RowId(77), 0, 1), layout);
    }

    #[test]
    fn test_reorder_blocks_sweep_all_pairs() {
        for len in 1..=4u8 {
            let (layout, _, row) = single_row(len);
            let original = block_ids(&layout, row);
            for from in 0..len as usize {
                for to in 0..len as usize {
                    let result = block_ids(&layout.reorder_blocks_within_row(row, from, to), row);
                    let target = adjusted_insert_index(from, to);

                    // Same multiset of blocks
                    let mut sorted = result.clone();
                    sorted.sort();
                    assert_eq!(sorted, original, "from {} to {}", from, to);

                    // Moved block sits at the adjusted index
                    assert_eq!(result[target], original[from], "from {} to {}", from, to);

                    // Every other block keeps its relative order
                    let others: Vec<_> = original.iter().filter(|id| **id != original[from]).collect();
                    let others_after: Vec<_> = result.iter().filter(|id| **id != original[from]).collect();
                    assert_eq!(others, others_after);

                    if from == to || to == from + 1 {
                        assert_eq!(result, original, "from {} to {} should be a no-op", from, to);
                    }
                }
            }
        }
    }

    #[test]
    fn test_apply_configuration() {
        let (layout, _, row) = single_row(3);
        let configured = layout.apply_block_configuration(row, 0, "documents_processed", "bar", MetricCount::Two);
        let block = &configured.row(row).unwrap().blocks[0];
        assert!(block.is_configured());
        assert_eq!(block.title(), Some("Documents Processed"));
        assert_eq!(block.visualization(), Some("bar"));
        assert_eq!(block.metric_count(), None);
        assert_eq!(configured.configured_blocks(), 1);
    }

    #[test]
    fn test_apply_configuration_multi_metric_keeps_count() {
        let (layout, _, row) = single_row(1);
        let configured = layout.apply_block_configuration(row, 0, "kpi_block", "kpi_block", MetricCount::Two);
        assert_eq!(configured.block(row, 0).unwrap().metric_count(), Some(MetricCount::Two));
    }

    #[test]
    fn test_apply_configuration_rejects_incomplete_or_invalid() {
        let (layout, _, row) = single_row(2);
        assert_eq!(layout.apply_block_configuration(row, 0, "", "bar", MetricCount::Four), layout);
        assert_eq!(layout.apply_block_configuration(row, 0, "error_rate", "", MetricCount::Four), layout);
        assert_eq!(layout.apply_block_configuration(row, 0, "error_rate", "pie", MetricCount::Four), layout);
        assert_eq!(layout.apply_block_configuration(row, 0, "nonsense", "bar", MetricCount::Four), layout);
        assert_eq!(layout.apply_block_configuration(row, 5, "error_rate", "kpi", MetricCount::Four), layout);
        assert_eq!(layout.configured_blocks(), 0);
    }

    #[test]
    fn test_store_apply_reports_change() {
        let mut store = LayoutStore::default();
        assert!(store.apply(&Mutation::AddRow { columns: cols(2) }));
        let row = store.layout().rows().next().unwrap().id;
        assert!(!store.apply(&Mutation::ReorderBlocks { row, from: 0, to: 0 }));
        assert!(store.apply(&Mutation::DeleteRow { row }));
        assert!(store.layout().is_empty());
    }

    #[test]
    fn test_store_replace_keeps_ids_unique() {
        let (layout, _, _) = single_row(3);
        let mut store = LayoutStore::default();
        store.replace(layout);
        store.apply(&Mutation::AddRow { columns: cols(1) });
        let ids: Vec<_> = store.layout().rows().flat_map(|r| r.blocks.iter().map(|b| b.id)).collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(unique.len(), 4);
    }
}
