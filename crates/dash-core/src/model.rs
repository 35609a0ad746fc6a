//! Block, row and layout entities
//!
//! The in-memory model keeps configuration in a single optional value so an
//! unconfigured block can never carry a data type, visualization or title.
//! The persisted form is the flat record the preview surface reads; decoding
//! it validates every invariant and rejects anything that violates one.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::catalog;

/// Errors raised when a persisted layout violates a model invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("column count {0} is outside 1..=4")]
    InvalidColumnCount(u8),

    #[error("metric count {0} is not one of 2 or 4")]
    InvalidMetricCount(u8),

    #[error("block {0} is marked configured but lacks a data type or visualization")]
    IncompleteConfiguration(BlockId),

    #[error("block {block} pairs data type '{data_type}' with incompatible visualization '{visualization}'")]
    IncompatibleVisualization {
        block: BlockId,
        data_type: String,
        visualization: String,
    },

    #[error("row {row} declares {columns} columns but holds {blocks} blocks")]
    ColumnMismatch { row: RowId, columns: u8, blocks: usize },

    #[error("duplicate row id {0}")]
    DuplicateRow(RowId),

    #[error("duplicate block id {0}")]
    DuplicateBlock(BlockId),

    #[error("id {0} is reserved")]
    ReservedId(u64),
}

/// Stable row identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

/// Stable block identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of grid columns in a row, always within 1..=4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColumnCount(u8);

impl ColumnCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Column counts offered by the row header selector
    pub const OPTIONS: [ColumnCount; 4] = [ColumnCount(1), ColumnCount(2), ColumnCount(3), ColumnCount(4)];

    pub fn new(columns: u8) -> Result<Self, LayoutError> {
        if (Self::MIN..=Self::MAX).contains(&columns) {
            Ok(Self(columns))
        } else {
            Err(LayoutError::InvalidColumnCount(columns))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for ColumnCount {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for ColumnCount {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnCount> for u8 {
    fn from(value: ColumnCount) -> Self {
        value.0
    }
}

/// How many metrics a multi-metric block shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MetricCount {
    Two,
    #[default]
    Four,
}

impl MetricCount {
    pub const OPTIONS: [MetricCount; 2] = [MetricCount::Two, MetricCount::Four];

    pub fn get(self) -> usize {
        match self {
            MetricCount::Two => 2,
            MetricCount::Four => 4,
        }
    }
}

impl TryFrom<u8> for MetricCount {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(MetricCount::Two),
            4 => Ok(MetricCount::Four),
            other => Err(LayoutError::InvalidMetricCount(other)),
        }
    }
}

impl From<MetricCount> for u8 {
    fn from(value: MetricCount) -> Self {
        value.get() as u8
    }
}

/// Committed configuration of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockConfig {
    pub data_type: String,
    pub visualization: String,
    /// Catalog label of the data type at commit time
    pub title: String,
    /// Literal display value for single-value visualizations
    pub value: Option<String>,
    /// Only set when the visualization is the multi-metric grid
    pub metric_count: Option<MetricCount>,
}

/// A single configurable cell of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BlockRecord", into = "BlockRecord")]
pub struct Block {
    pub id: BlockId,
    pub config: Option<BlockConfig>,
}

impl Block {
    /// Create a block with no configuration
    pub fn unconfigured(id: BlockId) -> Self {
        Self { id, config: None }
    }

    /// Create a configured block
    pub fn configured(id: BlockId, config: BlockConfig) -> Self {
        Self { id, config: Some(config) }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.data_type.as_str())
    }

    pub fn visualization(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.visualization.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.title.as_str())
    }

    pub fn value(&self) -> Option<&str> {
        self.config.as_ref().and_then(|c| c.value.as_deref())
    }

    pub fn metric_count(&self) -> Option<MetricCount> {
        self.config.as_ref().and_then(|c| c.metric_count)
    }
}

/// Flat persisted form of a block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    id: BlockId,
    configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    graph_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kpi_count: Option<u8>,
}

impl TryFrom<BlockRecord> for Block {
    type Error = LayoutError;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        if !record.configured {
            return Ok(Block::unconfigured(record.id));
        }

        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        let (data_type, visualization) = match (non_empty(record.data_type), non_empty(record.graph_type)) {
            (Some(d), Some(v)) => (d, v),
            _ => return Err(LayoutError::IncompleteConfiguration(record.id)),
        };

        if !catalog::is_compatible(&data_type, &visualization) {
            return Err(LayoutError::IncompatibleVisualization {
                block: record.id,
                data_type,
                visualization,
            });
        }

        let metric_count = if catalog::is_multi_metric_visualization(&visualization) {
            record.kpi_count.map(MetricCount::try_from).transpose()?
        } else {
            None
        };

        let title = match non_empty(record.title) {
            Some(title) => title,
            None => catalog::data_type(&data_type)
                .map(|spec| spec.label.to_string())
                .unwrap_or_else(|_| data_type.clone()),
        };

        Ok(Block::configured(
            record.id,
            BlockConfig {
                data_type,
                visualization,
                title,
                value: record.value,
                metric_count,
            },
        ))
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        match block.config {
            None => BlockRecord {
                id: block.id,
                configured: false,
                data_type: None,
                graph_type: None,
                title: None,
                value: None,
                kpi_count: None,
            },
            Some(config) => BlockRecord {
                id: block.id,
                configured: true,
                data_type: Some(config.data_type),
                graph_type: Some(config.visualization),
                title: Some(config.title),
                value: config.value,
                kpi_count: config.metric_count.map(u8::from),
            },
        }
    }
}

/// A horizontal group of blocks sharing a column count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RowRecord")]
pub struct Row {
    pub id: RowId,
    pub columns: ColumnCount,
    pub blocks: Vec<Block>,
}

impl Row {
    pub fn configured_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_configured()).count()
    }
}

#[derive(Deserialize)]
struct RowRecord {
    id: RowId,
    columns: ColumnCount,
    blocks: Vec<Block>,
}

impl TryFrom<RowRecord> for Row {
    type Error = LayoutError;

    fn try_from(record: RowRecord) -> Result<Self, Self::Error> {
        if record.blocks.len() != record.columns.get() {
            return Err(LayoutError::ColumnMismatch {
                row: record.id,
                columns: record.columns.into(),
                blocks: record.blocks.len(),
            });
        }
        Ok(Row {
            id: record.id,
            columns: record.columns,
            blocks: record.blocks,
        })
    }
}

/// The ordered sequence of rows making up a dashboard
///
/// Rows are shared by reference between successive layouts; a transformation
/// only reallocates the row it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Row>")]
pub struct Layout {
    pub(crate) rows: Vec<Arc<Row>>,
}

impl Layout {
    /// Build a layout, checking that row and block ids are unique
    ///
    /// `u64::MAX` is reserved so the allocator can always move past every id.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, LayoutError> {
        let mut row_ids = HashSet::new();
        let mut block_ids = HashSet::new();
        for row in &rows {
            if row.id.0 == u64::MAX {
                return Err(LayoutError::ReservedId(row.id.0));
            }
            if !row_ids.insert(row.id) {
                return Err(LayoutError::DuplicateRow(row.id));
            }
            for block in &row.blocks {
                if block.id.0 == u64::MAX {
                    return Err(LayoutError::ReservedId(block.id.0));
                }
                if !block_ids.insert(block.id) {
                    return Err(LayoutError::DuplicateBlock(block.id));
                }
            }
        }
        Ok(Self {
            rows: rows.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().map(|row| row.as_ref())
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows().find(|row| row.id == id)
    }

    pub fn row_index(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn block(&self, row: RowId, index: usize) -> Option<&Block> {
        self.row(row).and_then(|r| r.blocks.get(index))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of blocks across all rows
    pub fn total_blocks(&self) -> usize {
        self.rows().map(|row| row.blocks.len()).sum()
    }

    /// Number of configured blocks across all rows
    pub fn configured_blocks(&self) -> usize {
        self.rows().map(Row::configured_count).sum()
    }

    pub fn max_row_id(&self) -> Option<RowId> {
        self.rows().map(|row| row.id).max()
    }

    pub fn max_block_id(&self) -> Option<BlockId> {
        self.rows()
            .flat_map(|row| row.blocks.iter().map(|b| b.id))
            .max()
    }

    /// Whether both layouts hold the very same allocation for `row`
    pub fn shares_row_with(&self, other: &Layout, row: RowId) -> bool {
        let mine = self.rows.iter().find(|r| r.id == row);
        let theirs = other.rows.iter().find(|r| r.id == row);
        matches!((mine, theirs), (Some(a), Some(b)) if Arc::ptr_eq(a, b))
    }
}

impl TryFrom<Vec<Row>> for Layout {
    type Error = LayoutError;

    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Layout::from_rows(rows)
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}
