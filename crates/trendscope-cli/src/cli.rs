//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trendscope - detect trending stories in a batch of news items.
#[derive(Debug, Parser)]
#[command(name = "trendscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TRENDSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (high-trend urls only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a JSON batch of items
    Analyze(AnalyzeArgs),

    /// Show or write the configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// JSON file with the items, `-` for stdin
    pub input: PathBuf,

    /// Start from a preset instead of the configured engine values
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Clustering neighborhood radius
    #[arg(long)]
    pub eps: Option<f32>,

    /// Temporal feature weight in the similarity space
    #[arg(long)]
    pub temporal_weight: Option<f32>,

    /// Normalized score a cluster must exceed
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Recency decay window in days
    #[arg(long)]
    pub time_window: Option<f64>,

    /// Embedding model
    #[arg(long, value_enum)]
    pub embedder: Option<EmbedderArg>,

    /// Search-interest service URL
    #[arg(long, env = "TRENDSCOPE_INTEREST_ENDPOINT")]
    pub interest_endpoint: Option<String>,

    /// Skip the search-interest service even if one is configured
    #[arg(long, conflicts_with = "interest_endpoint")]
    pub no_interest: bool,

    /// Only list high-trend clusters in the table
    #[arg(long)]
    pub high_trend_only: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Engine preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// eps 0.5, threshold 0.75
    Default,
    /// eps 0.35, threshold 0.85
    Strict,
    /// eps 0.6, threshold 0.6
    Lenient,
}

/// Embedding model argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EmbedderArg {
    /// Local feature hashing
    Hashing,
    /// Ollama embeddings API
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for trendscope_engine::EngineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => trendscope_engine::EngineConfig::default(),
            PresetArg::Strict => trendscope_engine::EngineConfig::strict(),
            PresetArg::Lenient => trendscope_engine::EngineConfig::lenient(),
        }
    }
}

impl From<EmbedderArg> for crate::config::EmbeddingProvider {
    fn from(embedder: EmbedderArg) -> Self {
        match embedder {
            EmbedderArg::Hashing => crate::config::EmbeddingProvider::Hashing,
            EmbedderArg::Ollama => crate::config::EmbeddingProvider::Ollama,
        }
    }
}
