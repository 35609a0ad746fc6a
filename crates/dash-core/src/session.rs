//! Configuration session for a single block
//!
//! At most one block is edited at a time. The session holds the in-progress
//! selection and only touches the layout through the mutation it hands back
//! on commit.

use tracing::debug;

use crate::catalog;
use crate::model::{Block, Layout, MetricCount, RowId};
use crate::store::Mutation;

/// Position of the block under edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockTarget {
    pub row: RowId,
    pub index: usize,
}

impl BlockTarget {
    pub fn new(row: RowId, index: usize) -> Self {
        Self { row, index }
    }
}

/// Working selection of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub data_type: Option<String>,
    pub visualization: Option<String>,
    pub metric_count: MetricCount,
}

impl Draft {
    /// Seed a draft from a block's stored configuration
    pub fn from_block(block: &Block) -> Self {
        match &block.config {
            Some(config) => Self {
                data_type: Some(config.data_type.clone()),
                visualization: Some(config.visualization.clone()),
                metric_count: config.metric_count.unwrap_or_default(),
            },
            None => Self::default(),
        }
    }

    fn is_multi_metric_type(&self) -> bool {
        self.data_type.as_deref().is_some_and(catalog::is_multi_metric_data_type)
    }

    fn is_multi_metric_visualization(&self) -> bool {
        self.visualization
            .as_deref()
            .is_some_and(catalog::is_multi_metric_visualization)
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            (&self.data_type, &self.visualization),
            (Some(d), Some(v)) if !d.is_empty() && !v.is_empty()
        )
    }
}

/// Editing state: either nothing is being edited or exactly one block is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSession {
    #[default]
    Closed,
    Open { target: BlockTarget, draft: Draft },
}

impl ConfigSession {
    pub fn is_open(&self) -> bool {
        matches!(self, ConfigSession::Open { .. })
    }

    pub fn target(&self) -> Option<BlockTarget> {
        match self {
            ConfigSession::Open { target, .. } => Some(*target),
            ConfigSession::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            ConfigSession::Open { draft, .. } => Some(draft),
            ConfigSession::Closed => None,
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            ConfigSession::Open { draft, .. } => Some(draft),
            ConfigSession::Closed => None,
        }
    }

    /// Whether `target` is the block currently being edited
    pub fn is_editing(&self, target: BlockTarget) -> bool {
        self.target() == Some(target)
    }

    /// Open a session on a block, discarding any uncommitted session
    ///
    /// Returns `false` and leaves the state alone if the block does not exist.
    pub fn open_for(&mut self, layout: &Layout, target: BlockTarget) -> bool {
        let Some(block) = layout.block(target.row, target.index) else {
            debug!("No block at row {} index {}", target.row, target.index);
            return false;
        };
        if let Some(previous) = self.target() {
            if previous != target {
                debug!("Discarding uncommitted edit of row {} index {}", previous.row, previous.index);
            }
        }
        *self = ConfigSession::Open {
            target,
            draft: Draft::from_block(block),
        };
        true
    }

    /// Choose a data type; the visualization is reset to match it
    pub fn select_data_type(&mut self, data_type: &str) -> bool {
        if catalog::data_type(data_type).is_err() {
            return false;
        }
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        draft.data_type = Some(data_type.to_string());
        draft.visualization = if catalog::is_multi_metric_data_type(data_type) {
            Some(catalog::MULTI_METRIC_VISUALIZATION.to_string())
        } else {
            None
        };
        true
    }

    /// Return to the "choose data type" state
    pub fn clear_data_type(&mut self) {
        if let Some(draft) = self.draft_mut() {
            draft.data_type = None;
            draft.visualization = None;
        }
    }

    /// Choose a visualization from those compatible with the selected data type
    pub fn select_visualization(&mut self, visualization: &str) -> bool {
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        let compatible = draft
            .data_type
            .as_deref()
            .is_some_and(|d| catalog::is_compatible(d, visualization));
        if !compatible {
            debug!("Visualization '{}' not offered for {:?}", visualization, draft.data_type);
            return false;
        }
        draft.visualization = Some(visualization.to_string());
        true
    }

    pub fn select_metric_count(&mut self, count: MetricCount) -> bool {
        match self.draft_mut() {
            Some(draft) => {
                draft.metric_count = count;
                true
            }
            None => false,
        }
    }

    /// Visualizations the form offers for the current data type
    pub fn visualization_choices(&self) -> &'static [&'static str] {
        self.draft()
            .and_then(|d| d.data_type.as_deref())
            .map(catalog::compatible_visualizations)
            .unwrap_or(&[])
    }

    /// The visualization step is skipped for the multi-metric data type
    pub fn shows_visualization_step(&self) -> bool {
        self.draft().is_some_and(|d| !d.is_multi_metric_type())
    }

    /// The metric count step only appears for the multi-metric visualization
    pub fn shows_metric_count_step(&self) -> bool {
        self.draft().is_some_and(Draft::is_multi_metric_visualization)
    }

    pub fn can_commit(&self) -> bool {
        self.draft().is_some_and(Draft::is_complete)
    }

    /// Close the session and hand back the configuration to apply
    ///
    /// Leaves the session open and returns `None` while the draft is incomplete.
    pub fn commit(&mut self) -> Option<Mutation> {
        if !self.can_commit() {
            return None;
        }
        match std::mem::take(self) {
            ConfigSession::Open {
                target,
                draft:
                    Draft {
                        data_type: Some(data_type),
                        visualization: Some(visualization),
                        metric_count,
                    },
            } => Some(Mutation::ConfigureBlock {
                row: target.row,
                index: target.index,
                data_type,
                visualization,
                metric_count,
            }),
            _ => None,
        }
    }

    /// Discard the draft; returns whether a session was open
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        *self = ConfigSession::Closed;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdAllocator;
    use crate::model::ColumnCount;

    fn layout_with_row(columns: u8) -> (Layout, RowId) {
        let mut ids = IdAllocator::new();
        let layout = Layout::default().add_row(ColumnCount::new(columns).unwrap(), &mut ids);
        let row = layout.rows().next().unwrap().id;
        (layout, row)
    }

    #[test]
    fn test_open_unconfigured_block_has_empty_draft() {
        let (layout, row) = layout_with_row(3);
        let mut session = ConfigSession::default();
        assert!(session.open_for(&layout, BlockTarget::new(row, 1)));
        assert_eq!(session.draft(), Some(&Draft::default()));
        assert_eq!(session.draft().unwrap().metric_count, MetricCount::Four);
        assert!(!session.can_commit());
    }

    #[test]
    fn test_open_missing_block_is_rejected() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        assert!(!session.open_for(&layout, BlockTarget::new(row, 3)));
        assert!(!session.is_open());
    }

    #[test]
    fn test_multi_metric_selection_autoselects_visualization() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 0));

        assert!(session.select_data_type(catalog::MULTI_METRIC_DATA_TYPE));
        let draft = session.draft().unwrap();
        assert_eq!(draft.visualization.as_deref(), Some(catalog::MULTI_METRIC_VISUALIZATION));
        assert!(!session.shows_visualization_step());
        assert!(session.shows_metric_count_step());
        assert!(session.can_commit());
    }

    #[test]
    fn test_changing_data_type_clears_visualization() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 0));
        session.select_data_type("documents_processed");
        assert!(session.select_visualization("bar"));
        assert!(session.can_commit());

        session.select_data_type("document_types");
        assert_eq!(session.draft().unwrap().visualization, None);
        assert!(session.shows_visualization_step());
        assert!(!session.shows_metric_count_step());
        assert_eq!(session.visualization_choices(), &["pie", "donut", "bar"]);
    }

    #[test]
    fn test_incompatible_visualization_is_refused() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 0));
        assert!(!session.select_visualization("bar"));
        session.select_data_type("error_rate");
        assert!(!session.select_visualization("pie"));
        assert!(!session.select_data_type("bogus"));
        assert_eq!(session.draft().unwrap().data_type.as_deref(), Some("error_rate"));
    }

    #[test]
    fn test_commit_requires_complete_draft() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 0));
        session.select_data_type("error_rate");
        assert_eq!(session.commit(), None);
        assert!(session.is_open());

        session.select_visualization("gauge");
        let mutation = session.commit().unwrap();
        assert_eq!(
            mutation,
            Mutation::ConfigureBlock {
                row,
                index: 0,
                data_type: "error_rate".to_string(),
                visualization: "gauge".to_string(),
                metric_count: MetricCount::Four,
            }
        );
        assert!(!session.is_open());
    }

    #[test]
    fn test_reopen_reproduces_configuration() {
        let (layout, row) = layout_with_row(2);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 1));
        session.select_data_type(catalog::MULTI_METRIC_DATA_TYPE);
        session.select_metric_count(MetricCount::Two);
        let mut ids = IdAllocator::seeded_from(&layout);
        let layout = session.commit().unwrap().apply_to(&layout, &mut ids).unwrap();

        session.open_for(&layout, BlockTarget::new(row, 1));
        let draft = session.draft().unwrap();
        assert_eq!(draft.data_type.as_deref(), Some("kpi_block"));
        assert_eq!(draft.visualization.as_deref(), Some("kpi_block"));
        assert_eq!(draft.metric_count, MetricCount::Two);
    }

    #[test]
    fn test_second_open_discards_first_draft() {
        let (layout, row) = layout_with_row(2);
        let mut session = ConfigSession::default();
        session.open_for(&layout, BlockTarget::new(row, 0));
        session.select_data_type("user_activity");
        session.select_visualization("heatmap");

        session.open_for(&layout, BlockTarget::new(row, 1));
        assert!(session.is_editing(BlockTarget::new(row, 1)));
        assert!(!session.is_editing(BlockTarget::new(row, 0)));
        assert_eq!(session.draft(), Some(&Draft::default()));
        assert!(!layout.block(row, 0).unwrap().is_configured());
    }

    #[test]
    fn test_cancel() {
        let (layout, row) = layout_with_row(1);
        let mut session = ConfigSession::default();
        assert!(!session.cancel());
        session.open_for(&layout, BlockTarget::new(row, 0));
        session.select_data_type("error_rate");
        assert!(session.cancel());
        assert_eq!(session, ConfigSession::Closed);
        assert!(!session.select_metric_count(MetricCount::Two));
    }
}
