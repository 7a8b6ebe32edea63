//! Error types for engine operations

use std::fmt;
use thiserror::Error;
use trendscope_embed::EmbeddingError;

/// Pipeline stage a batch-level failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Configuration validation before any work
    Configuration,
    /// Obtaining semantic vectors for item titles
    Embedding,
    /// Density-based clustering of composite vectors
    Clustering,
    /// Computing per-cluster trend metrics
    Scoring,
    /// Batch normalization and high-trend selection
    Selection,
}

impl Stage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::Embedding => "embedding",
            Stage::Clustering => "clustering",
            Stage::Scoring => "scoring",
            Stage::Selection => "selection",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Batch-level failures
///
/// Each variant names the stage that failed. A batch that returns an error
/// produces no scores at all.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Embedding provider failed or broke its contract
    #[error("Embedding stage failed: {0}")]
    Embedding(#[source] EmbeddingError),

    /// Clustering could not run on the composite vectors
    #[error("Clustering stage failed: {0}")]
    Clustering(String),

    /// A cluster could not be scored
    #[error("Scoring stage failed: {0}")]
    Scoring(String),

    /// Scores could not be normalized
    #[error("Selection stage failed: {0}")]
    Selection(String),
}

impl EngineError {
    /// The stage this error came from
    pub fn stage(&self) -> Stage {
        match self {
            EngineError::Config(_) => Stage::Configuration,
            EngineError::Embedding(_) => Stage::Embedding,
            EngineError::Clustering(_) => Stage::Clustering,
            EngineError::Scoring(_) => Stage::Scoring,
            EngineError::Selection(_) => Stage::Selection,
        }
    }
}

impl From<EmbeddingError> for EngineError {
    fn from(e: EmbeddingError) -> Self {
        EngineError::Embedding(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_reported() {
        let err = EngineError::from(EmbeddingError::Communication("down".to_string()));
        assert_eq!(err.stage(), Stage::Embedding);
        assert!(err.to_string().starts_with("Embedding stage failed"));

        assert_eq!(EngineError::Clustering("x".into()).stage(), Stage::Clustering);
        assert_eq!(EngineError::Scoring("x".into()).stage(), Stage::Scoring);
        assert_eq!(EngineError::Selection("x".into()).stage(), Stage::Selection);
        assert_eq!(
            EngineError::from(ConfigError::Invalid("x".into())).stage(),
            Stage::Configuration
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Embedding.to_string(), "embedding");
        assert_eq!(Stage::Selection.to_string(), "selection");
    }
}
