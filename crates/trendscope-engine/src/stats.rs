//! Per-batch run statistics

use serde::{Deserialize, Serialize};

/// Counters collected while one batch moves through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Raw records handed to the engine
    pub items_received: usize,

    /// Raw records rejected during ingestion
    pub items_rejected: usize,

    /// Clusters found, noise excluded
    pub clusters_found: usize,

    /// Items labeled as noise
    pub noise_items: usize,

    /// Clusters that were scored
    pub clusters_scored: usize,

    /// Clusters whose search interest fell back to the default after a
    /// provider failure
    pub interest_fallbacks: usize,

    /// Clusters selected as high-trend
    pub high_trend: usize,

    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl RunStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Items that made it past ingestion
    pub fn items_accepted(&self) -> usize {
        self.items_received.saturating_sub(self.items_rejected)
    }

    /// Record one interest-provider fallback
    pub fn record_fallback(&mut self) {
        self.interest_fallbacks += 1;
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Trend Run Summary".to_string(),
            "=================".to_string(),
            format!(
                "Items: {} received, {} accepted, {} rejected",
                self.items_received,
                self.items_accepted(),
                self.items_rejected
            ),
            format!(
                "Clusters: {} found, {} noise items",
                self.clusters_found, self.noise_items
            ),
            format!("Scored: {}", self.clusters_scored),
            format!("High-trend: {}", self.high_trend),
        ];

        if self.interest_fallbacks > 0 {
            lines.push(format!(
                "Interest fallbacks: {}",
                self.interest_fallbacks
            ));
        }

        lines.push(format!("Elapsed: {}ms", self.elapsed_ms));
        lines.join("\n")
    }
}
