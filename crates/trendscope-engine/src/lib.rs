//! Trendscope Engine
//!
//! Turns a flat batch of items into ranked, deduplicated story clusters.
//!
//! # Overview
//!
//! Each batch goes through one synchronous pass:
//! - **Similarity space**: unit-length title embedding plus a weighted
//!   temporal-decay feature per item
//! - **Clustering**: DBSCAN under cosine distance, `min_samples` fixed at 2,
//!   isolated items labeled `-1`
//! - **Scoring**: recency, velocity, volume, source diversity and search
//!   interest combined into one weighted score per cluster
//! - **Selection**: scores divided by the batch maximum, clusters above the
//!   threshold kept as high-trend
//!
//! Embedding and search-interest providers are injected. An embedding failure
//! aborts the batch and names the failing stage; a search-interest failure
//! falls back to a neutral default.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use trendscope_domain::Item;
//! use trendscope_embed::HashingEmbeddingModel;
//! use trendscope_engine::{EngineConfig, TrendEngine};
//! use trendscope_interest::MockInterestProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TrendEngine::new(
//!     HashingEmbeddingModel::default(),
//!     MockInterestProvider::always_timeout(),
//!     EngineConfig::lenient(),
//! )?;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let items = vec![
//!     Item::new("Earthquake strikes coastal region", day, "wire", "u1")?,
//!     Item::new("Massive earthquake strikes coastal region", day, "daily", "u2")?,
//! ];
//!
//! let result = engine.analyze(&items)?;
//! for cluster in result.ranked() {
//!     println!("{} -> {:.2}", cluster.label, cluster.normalized_score());
//! }
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Presets
//!
//! ```
//! use trendscope_engine::EngineConfig;
//!
//! // Default: eps 0.5, threshold 0.75
//! let config = EngineConfig::default();
//!
//! // Strict: tighter clusters, fewer high-trend picks
//! let config = EngineConfig::strict();
//!
//! // Lenient: looser clusters, more high-trend picks
//! let config = EngineConfig::lenient();
//! ```

#![warn(missing_docs)]

pub mod cluster;
pub mod config;
mod engine;
mod error;
pub mod ingest;
pub mod scorer;
pub mod selector;
pub mod similarity;
mod stats;
pub mod temporal;

pub use config::{
    ClusteringConfig, EngineConfig, InterestConfig, ScoringConfig, SelectionConfig,
    TemporalConfig, TrendWeights, MIN_SAMPLES,
};
pub use engine::{BatchResult, ClusterReport, TrendEngine};
pub use error::{ConfigError, EngineError, Stage};
pub use ingest::{ingest, Ingested};
pub use scorer::{InterestSource, ScoreOutcome, TrendScorer};
pub use selector::TrendSelector;
pub use stats::RunStats;
