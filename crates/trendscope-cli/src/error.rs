//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine error; its message names the failing stage
    #[error("Trend analysis failed: {0}")]
    Engine(#[from] trendscope_engine::EngineError),

    /// Embedding model could not be set up
    #[error("Embedding error: {0}")]
    Embedding(#[from] trendscope_embed::EmbeddingError),

    /// Interest provider could not be set up
    #[error("Interest provider error: {0}")]
    Interest(#[from] trendscope_interest::InterestError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<trendscope_engine::ConfigError> for CliError {
    fn from(e: trendscope_engine::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
