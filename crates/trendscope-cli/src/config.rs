//! Configuration management for the CLI.
//!
//! ```toml
//! [engine.clustering]
//! eps = 0.5
//!
//! [embedding]
//! provider = "hashing"
//! dimension = 512
//! cache = true
//!
//! [interest]
//! endpoint = "http://localhost:8700/interest"
//! timeout_secs = 25
//!
//! [output]
//! color = true
//! format = "table"
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trendscope_engine::EngineConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Engine parameters
    #[serde(default)]
    pub engine: EngineConfig,

    /// Embedding model selection
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Search-interest provider
    #[serde(default)]
    pub interest: InterestSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Which embedding model to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local feature hashing, no network
    Hashing,
    /// Ollama embeddings API
    Ollama,
}

/// Embedding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Model to use
    pub provider: EmbeddingProvider,

    /// Vector length
    pub dimension: usize,

    /// Ollama endpoint
    pub endpoint: String,

    /// Ollama model name
    pub model: String,

    /// Memoize vectors by title text
    pub cache: bool,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Hashing,
            dimension: trendscope_embed::hashing::DEFAULT_DIMENSION,
            endpoint: trendscope_embed::ollama::DEFAULT_ENDPOINT.to_string(),
            model: "nomic-embed-text".to_string(),
            cache: true,
        }
    }
}

/// Search-interest settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestSettings {
    /// Service URL; without one every cluster gets the neutral interest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Total request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Attempts per query
    pub max_retries: u32,

    /// Geography filter
    pub geo: String,

    /// Property filter
    pub property: String,
}

impl Default for InterestSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: trendscope_interest::http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: trendscope_interest::http::DEFAULT_CONNECT_TIMEOUT_SECS,
            max_retries: trendscope_interest::http::DEFAULT_MAX_RETRIES,
            geo: "US".to_string(),
            property: "news".to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (high-trend urls only)
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".trendscope").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
