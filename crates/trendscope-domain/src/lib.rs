//! Trendscope Domain Layer
//!
//! This crate contains the domain model shared by every other Trendscope crate.
//! It defines the fundamental concepts, value objects, and trait interfaces for
//! the trend-detection engine, and nothing that talks to the network.
//!
//! ## Key Concepts
//!
//! - **Item**: One immutable content unit (title, date, source, url)
//! - **Batch**: The set of items processed together in one engine run
//! - **Clusters**: Run-local label to member mapping, `-1` is noise
//! - **TrendMetrics**: Five sub-metrics plus the weighted score of a cluster
//! - **HighTrendCluster**: A cluster whose batch-relative score beats the threshold
//!
//! ## Architecture
//!
//! - Pure data types and validation only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for external collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod cluster;
pub mod item;
pub mod metrics;
pub mod traits;

// Re-exports for convenience
pub use batch::BatchId;
pub use cluster::{ClusterLabel, Clusters, NOISE};
pub use item::{InputError, Item, RawItem, DATE_FORMAT};
pub use metrics::{HighTrendCluster, TrendMetrics};
