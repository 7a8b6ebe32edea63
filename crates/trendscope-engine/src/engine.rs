//! Trend engine pipeline
//!
//! One synchronous pass per batch: similarity space, clustering, scoring,
//! selection. Nothing is carried over between batches.

use crate::cluster::Dbscan;
use crate::config::{EngineConfig, MIN_SAMPLES};
use crate::error::EngineError;
use crate::ingest::ingest;
use crate::scorer::{InterestSource, TrendScorer};
use crate::selector::TrendSelector;
use crate::similarity::SimilaritySpace;
use crate::stats::RunStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use trendscope_domain::traits::{KeywordStrategy, SearchInterestProvider};
use trendscope_domain::{
    BatchId, ClusterLabel, Clusters, HighTrendCluster, Item, RawItem, TrendMetrics,
};
use trendscope_embed::EmbeddingModel;
use trendscope_interest::LongWordKeywords;

/// One scored cluster of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Batch-local label
    pub label: ClusterLabel,
    /// Members in batch order
    pub items: Vec<Item>,
    /// Metrics with the normalized score filled in
    pub metrics: TrendMetrics,
}

impl ClusterReport {
    /// Normalized score, 0 if missing
    pub fn normalized_score(&self) -> f64 {
        self.metrics.normalized_score.unwrap_or(0.0)
    }
}

/// Everything one engine run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Identifier of this run
    pub batch_id: BatchId,
    /// Every scored cluster by label
    pub clusters: BTreeMap<ClusterLabel, ClusterReport>,
    /// Urls of the items labeled as noise
    pub noise: Vec<String>,
    /// Clusters above the selection threshold, best first
    pub high_trend: Vec<HighTrendCluster>,
    /// Run counters
    pub stats: RunStats,
}

impl BatchResult {
    fn empty(stats: RunStats) -> Self {
        Self {
            batch_id: BatchId::new(),
            clusters: BTreeMap::new(),
            noise: Vec::new(),
            high_trend: Vec::new(),
            stats,
        }
    }

    /// Scored clusters ordered by normalized score, ties by label
    pub fn ranked(&self) -> Vec<&ClusterReport> {
        let mut ranked: Vec<&ClusterReport> = self.clusters.values().collect();
        ranked.sort_by(|a, b| {
            b.normalized_score()
                .total_cmp(&a.normalized_score())
                .then(a.label.cmp(&b.label))
        });
        ranked
    }

    /// Whether `label` was selected as high-trend
    pub fn is_high_trend(&self, label: ClusterLabel) -> bool {
        self.high_trend.iter().any(|h| h.cluster_id == label)
    }
}

/// Trend-detection engine with injected collaborators
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trendscope_domain::Item;
/// use trendscope_embed::HashingEmbeddingModel;
/// use trendscope_engine::{EngineConfig, TrendEngine};
/// use trendscope_interest::StaticInterestProvider;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = TrendEngine::new(
///     HashingEmbeddingModel::default(),
///     StaticInterestProvider::neutral(),
///     EngineConfig::default(),
/// )?;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let items = vec![
///     Item::new("Earthquake strikes coastal region", day, "wire", "u1")?,
///     Item::new("Earthquake strikes coastal region overnight", day, "daily", "u2")?,
///     Item::new("Stock market rallies after earnings", day, "money", "u3")?,
/// ];
///
/// let result = engine.analyze(&items)?;
/// assert_eq!(result.clusters.len(), 1);
/// assert_eq!(result.noise, vec!["u3"]);
/// assert_eq!(result.high_trend.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct TrendEngine<E, P, K = LongWordKeywords> {
    embedder: E,
    interest: P,
    keywords: K,
    config: EngineConfig,
}

impl<E, P> TrendEngine<E, P, LongWordKeywords>
where
    E: EmbeddingModel,
    P: SearchInterestProvider,
{
    /// Create an engine using the keyword strategy described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate.
    pub fn new(embedder: E, interest: P, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            embedder,
            interest,
            keywords: config.interest.keyword_strategy(),
            config,
        })
    }
}

impl<E, P, K> TrendEngine<E, P, K>
where
    E: EmbeddingModel,
    P: SearchInterestProvider,
    K: KeywordStrategy,
{
    /// Replace the keyword strategy
    pub fn with_keywords<K2: KeywordStrategy>(self, keywords: K2) -> TrendEngine<E, P, K2> {
        TrendEngine {
            embedder: self.embedder,
            interest: self.interest,
            keywords,
            config: self.config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The injected embedding model
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Group a batch without scoring it
    pub fn cluster(&self, items: &[Item]) -> Result<Clusters, EngineError> {
        let space = SimilaritySpace::new(&self.embedder, self.config.temporal);
        let features: Vec<Vec<f32>> = space
            .build(items)?
            .iter()
            .map(|v| v.to_features())
            .collect();

        let labels = Dbscan::new(self.config.clustering.eps).fit_predict(&features)?;
        Ok(Clusters::from_labels(items, &labels))
    }

    /// Validate raw collector records, then analyze the accepted ones
    ///
    /// Rejected records are logged and counted; they never fail the batch.
    pub fn analyze_raw(&self, raw: Vec<RawItem>) -> Result<BatchResult, EngineError> {
        let mut stats = RunStats::new();
        stats.items_received = raw.len();

        let ingested = ingest(raw);
        stats.items_rejected = ingested.rejected.len();

        self.run(&ingested.items, stats)
    }

    /// Cluster, score and select one batch of validated items
    ///
    /// An empty batch yields an empty result. Any stage failure aborts the
    /// whole batch; no partially normalized scores are returned.
    pub fn analyze(&self, items: &[Item]) -> Result<BatchResult, EngineError> {
        let stats = RunStats {
            items_received: items.len(),
            ..RunStats::default()
        };
        self.run(items, stats)
    }

    fn run(&self, items: &[Item], mut stats: RunStats) -> Result<BatchResult, EngineError> {
        let start = Instant::now();

        if items.is_empty() {
            tracing::info!("Empty batch, nothing to analyze");
            return Ok(BatchResult::empty(stats));
        }

        tracing::info!("Analyzing batch of {} items", items.len());

        let clusters = self.cluster(items)?;
        stats.clusters_found = clusters.cluster_count();
        stats.noise_items = clusters.noise().len();

        let scorer = TrendScorer::new(
            &self.interest,
            &self.keywords,
            self.config.scoring,
            self.config.interest,
        )?;

        let mut scored: BTreeMap<ClusterLabel, TrendMetrics> = BTreeMap::new();
        for (label, members) in clusters.candidates(MIN_SAMPLES) {
            let outcome = scorer.score(members)?;
            if outcome.interest_source == InterestSource::Fallback {
                stats.record_fallback();
            }
            tracing::debug!(
                "Cluster {} ({} items) scored {:.4}",
                label,
                members.len(),
                outcome.metrics.score
            );
            scored.insert(label, outcome.metrics);
        }
        stats.clusters_scored = scored.len();

        let high_trend =
            TrendSelector::new(self.config.selection.threshold).select(&clusters, &mut scored)?;
        stats.high_trend = high_trend.len();

        let reports = scored
            .into_iter()
            .map(|(label, metrics)| {
                let items = clusters.get(label).unwrap_or_default().to_vec();
                (label, ClusterReport { label, items, metrics })
            })
            .collect();

        let noise = clusters
            .noise()
            .iter()
            .map(|item| item.url().to_string())
            .collect();

        stats.elapsed_ms = start.elapsed().as_millis() as u64;

        let result = BatchResult {
            batch_id: BatchId::new(),
            clusters: reports,
            noise,
            high_trend,
            stats,
        };

        tracing::info!(
            batch_id = %result.batch_id,
            "Batch done: {} clusters, {} high-trend, {} noise",
            result.stats.clusters_found,
            result.stats.high_trend,
            result.stats.noise_items
        );

        Ok(result)
    }
}
