//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::read_batch;
use crate::output::Formatter;
use crate::providers::{build_embedder, build_interest};
use trendscope_engine::{BatchResult, TrendEngine};

/// Apply command-line overrides on top of the loaded configuration.
pub fn effective_config(args: &AnalyzeArgs, config: &Config) -> Result<Config> {
    let mut config = config.clone();

    if let Some(preset) = args.preset {
        config.engine = preset.into();
    }
    if let Some(eps) = args.eps {
        config.engine.clustering.eps = eps;
    }
    if let Some(weight) = args.temporal_weight {
        config.engine.temporal.weight = weight;
    }
    if let Some(threshold) = args.threshold {
        config.engine.selection.threshold = threshold;
    }
    if let Some(window) = args.time_window {
        config.engine.scoring.time_window_days = window;
    }
    if let Some(embedder) = args.embedder {
        config.embedding.provider = embedder.into();
    }
    if let Some(endpoint) = &args.interest_endpoint {
        config.interest.endpoint = Some(endpoint.clone());
    }
    if args.no_interest {
        config.interest.endpoint = None;
    }

    config
        .engine
        .validate()
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(config)
}

/// Run the engine over the batch named by `args`.
pub fn run_analysis(args: &AnalyzeArgs, config: &Config) -> Result<BatchResult> {
    let config = effective_config(args, config)?;

    let raw = read_batch(&args.input)?;
    tracing::info!("Read {} records from {}", raw.len(), args.input.display());

    let engine = TrendEngine::new(build_embedder(&config)?, build_interest(&config)?, config.engine)?;
    Ok(engine.analyze_raw(raw)?)
}

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let result = run_analysis(&args, config)?;

    if result.stats.items_rejected > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} of {} records rejected",
                result.stats.items_rejected, result.stats.items_received
            ))
        );
    }

    println!("{}", formatter.format_result(&result, args.high_trend_only)?);
    tracing::debug!("\n{}", result.stats.summary());

    Ok(())
}
