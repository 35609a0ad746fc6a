//! What a block displays

use dash_core::catalog::{self, RendererKey};
use dash_core::Block;
use dash_data::samples::{self, KpiMetric};
use tracing::debug;

/// Display content derived from a block; never stored
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    /// Unconfigured block
    Empty,
    SingleValue {
        title: String,
        value: String,
        caption: &'static str,
    },
    MetricGrid {
        title: String,
        metrics: &'static [KpiMetric],
    },
    Chart {
        title: String,
        renderer: RendererKey,
    },
    /// Visualization id the catalog does not know
    Placeholder {
        title: String,
        visualization: String,
    },
}

impl BlockContent {
    pub fn for_block(block: &Block) -> Self {
        let Some(config) = &block.config else {
            return BlockContent::Empty;
        };
        let title = config.title.clone();
        let renderer = match catalog::visualization_meta(&config.visualization) {
            Ok(meta) => meta.renderer,
            Err(e) => {
                debug!("Block {}: {}", block.id, e);
                return BlockContent::Placeholder {
                    title,
                    visualization: config.visualization.clone(),
                };
            }
        };
        match renderer {
            RendererKey::SingleValue => BlockContent::SingleValue {
                title,
                value: config
                    .value
                    .clone()
                    .unwrap_or_else(|| samples::SINGLE_VALUE.to_string()),
                caption: samples::SINGLE_VALUE_CAPTION,
            },
            RendererKey::MultiMetricGrid => BlockContent::MetricGrid {
                title,
                metrics: samples::kpi_metrics(config.metric_count.unwrap_or_default().get()),
            },
            renderer => BlockContent::Chart { title, renderer },
        }
    }

    /// Renderer that draws this content; `None` for empty and placeholder content
    pub fn renderer(&self) -> Option<RendererKey> {
        match self {
            BlockContent::SingleValue { .. } => Some(RendererKey::SingleValue),
            BlockContent::MetricGrid { .. } => Some(RendererKey::MultiMetricGrid),
            BlockContent::Chart { renderer, .. } => Some(*renderer),
            BlockContent::Empty | BlockContent::Placeholder { .. } => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            BlockContent::Empty => None,
            BlockContent::SingleValue { title, .. }
            | BlockContent::MetricGrid { title, .. }
            | BlockContent::Chart { title, .. }
            | BlockContent::Placeholder { title, .. } => Some(title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::{BlockConfig, BlockId, MetricCount};

    fn block(data_type: &str, visualization: &str, value: Option<&str>, metric_count: Option<MetricCount>) -> Block {
        Block::configured(
            BlockId(1),
            BlockConfig {
                data_type: data_type.to_string(),
                visualization: visualization.to_string(),
                title: "Title".to_string(),
                value: value.map(str::to_string),
                metric_count,
            },
        )
    }

    #[test]
    fn test_unconfigured_is_empty() {
        let content = BlockContent::for_block(&Block::unconfigured(BlockId(1)));
        assert_eq!(content, BlockContent::Empty);
        assert_eq!(content.renderer(), None);
        assert_eq!(content.title(), None);
    }

    #[test]
    fn test_single_value_uses_stored_value() {
        let content = BlockContent::for_block(&block("error_rate", "kpi", Some("1.5%"), None));
        assert!(matches!(content, BlockContent::SingleValue { ref value, .. } if value == "1.5%"));

        let content = BlockContent::for_block(&block("error_rate", "kpi", None, None));
        assert!(matches!(content, BlockContent::SingleValue { ref value, caption, .. }
            if value == "2,847" && caption == "+12% from last month"));
    }

    #[test]
    fn test_metric_grid_takes_first_metrics() {
        let two = BlockContent::for_block(&block("kpi_block", "kpi_block", None, Some(MetricCount::Two)));
        match two {
            BlockContent::MetricGrid { metrics, .. } => {
                assert_eq!(metrics.len(), 2);
                assert_eq!(metrics[0].label, "Total Documents");
            }
            other => panic!("unexpected content {:?}", other),
        }

        let default = BlockContent::for_block(&block("kpi_block", "kpi_block", None, None));
        assert!(matches!(default, BlockContent::MetricGrid { metrics, .. } if metrics.len() == 4));
    }

    #[test]
    fn test_charts_and_unknown_visualizations() {
        let content = BlockContent::for_block(&block("user_activity", "heatmap", None, None));
        assert_eq!(content.renderer(), Some(RendererKey::Heatmap));
        assert_eq!(content.title(), Some("Title"));

        let content = BlockContent::for_block(&block("user_activity", "sparkline", None, None));
        assert!(matches!(content, BlockContent::Placeholder { ref visualization, .. } if visualization == "sparkline"));
        assert_eq!(content.renderer(), None);
    }
}
