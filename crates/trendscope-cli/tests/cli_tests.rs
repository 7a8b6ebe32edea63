//! Integration tests for trendscope-cli
//!
//! These run the analyze pipeline against batch files on disk and exercise
//! configuration files in temporary directories.

use clap::Parser;
use std::fs;
use tempfile::TempDir;
use trendscope_cli::cli::{Cli, Command};
use trendscope_cli::commands::analyze::run_analysis;
use trendscope_cli::commands::config::init_config;
use trendscope_cli::config::{Config, EmbeddingProvider, OutputFormat};
use trendscope_cli::{CliError, Formatter};

const BATCH: &str = r#"[
    {"title": "Earthquake strikes region", "date": "2024-01-01", "source": "wire", "url": "eq-1"},
    {"title": "Stock market rallies", "date": "2024-01-01", "source": "money", "url": "mk-1"},
    {"title": "Earthquake strikes region overnight", "date": "2024-01-01", "source": "daily", "url": "eq-2"},
    {"title": "Strong earthquake strikes region", "date": "2024-01-01", "source": "herald", "url": "eq-3"},
    {"title": "Stock market rallies again", "date": "2024-01-01", "source": "money", "url": "mk-2"},
    {"title": "Broken record", "date": "01/01/2024", "url": "bad-1"}
]"#;

fn analyze_args(input: &std::path::Path, extra: &[&str]) -> trendscope_cli::cli::AnalyzeArgs {
    let input = input.to_string_lossy().to_string();
    let mut argv = vec!["trendscope", "analyze", input.as_str()];
    argv.extend_from_slice(extra);
    match Cli::parse_from(argv).command {
        Command::Analyze(args) => args,
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn test_analyze_batch_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch.json");
    fs::write(&input, BATCH).unwrap();

    let result = run_analysis(&analyze_args(&input, &["--no-interest"]), &Config::default()).unwrap();

    assert_eq!(result.stats.items_received, 6);
    assert_eq!(result.stats.items_rejected, 1);
    assert_eq!(result.clusters.len(), 2);
    assert_eq!(result.high_trend[0].urls, vec!["eq-1", "eq-2", "eq-3"]);

    let formatter = Formatter::new(OutputFormat::Quiet, false);
    let output = formatter.format_result(&result, false).unwrap();
    assert!(output.starts_with("eq-1\neq-2\neq-3"));
}

#[test]
fn test_unreachable_interest_service_falls_back() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch.json");
    fs::write(&input, BATCH).unwrap();

    let mut config = Config::default();
    config.interest.endpoint = Some("http://localhost:99999/interest".to_string());
    config.interest.timeout_secs = 1;
    config.interest.connect_timeout_secs = 1;

    let result = run_analysis(&analyze_args(&input, &[]), &config).unwrap();

    assert_eq!(result.stats.interest_fallbacks, 2);
    assert!(result
        .clusters
        .values()
        .all(|c| c.metrics.search_interest == 0.5));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.json");

    let result = run_analysis(&analyze_args(&input, &[]), &Config::default());
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_malformed_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch.json");
    fs::write(&input, "{ not json").unwrap();

    let result = run_analysis(&analyze_args(&input, &[]), &Config::default());
    assert!(matches!(result, Err(CliError::Serialization(_))));
}

#[test]
fn test_config_init_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    init_config(&path, false).unwrap();
    assert!(path.exists());
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    // Refuses to overwrite without force
    assert!(matches!(init_config(&path, false), Err(CliError::Config(_))));
    init_config(&path, true).unwrap();
}

#[test]
fn test_config_file_values_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [engine.clustering]
        eps = 0.3

        [embedding]
        provider = "hashing"
        dimension = 128
        cache = false

        [output]
        format = "json"
        color = false
        "#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.engine.clustering.eps, 0.3);
    assert_eq!(config.embedding.provider, EmbeddingProvider::Hashing);
    assert_eq!(config.embedding.dimension, 128);
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(!config.output.color);
}

#[test]
fn test_invalid_config_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[engine.selection]\nthreshold = 2.0\n").unwrap();

    assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}
