//! Trend metrics and the high-trend output record

use crate::ClusterLabel;
use serde::{Deserialize, Serialize};

/// Scoring record for one non-trivial cluster
///
/// All five raw sub-metrics are kept next to the weighted score so a ranking
/// decision can be audited. `normalized_score` stays `None` until every
/// cluster of the batch has been scored; it is relative to that batch only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendMetrics {
    /// Mean exponential decay of item age, measured from the newest item [0, 1]
    pub recency: f64,

    /// Mean gap in days between consecutive item dates (>= 0)
    pub velocity: f64,

    /// Number of items in the cluster
    pub volume: usize,

    /// Distinct sources over item count [0, 1]
    pub diversity: f64,

    /// External search interest scaled to [0, 1]
    pub search_interest: f64,

    /// Weighted sum of the sub-metrics (>= 0)
    pub score: f64,

    /// `score / max(score)` within the batch [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f64>,
}

impl TrendMetrics {
    /// True when every sub-metric and the score are finite numbers
    pub fn is_finite(&self) -> bool {
        self.recency.is_finite()
            && self.velocity.is_finite()
            && self.diversity.is_finite()
            && self.search_interest.is_finite()
            && self.score.is_finite()
    }
}

/// A cluster selected as high-trend, as handed to downstream collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighTrendCluster {
    /// Batch-local cluster label
    pub cluster_id: ClusterLabel,

    /// Member item urls, in batch order
    pub urls: Vec<String>,

    /// Full metrics record, normalized score included
    pub metrics: TrendMetrics,
}

impl HighTrendCluster {
    /// Normalized score of the selected cluster
    pub fn normalized_score(&self) -> f64 {
        self.metrics.normalized_score.unwrap_or(0.0)
    }
}
