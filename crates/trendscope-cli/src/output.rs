//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use trendscope_domain::DATE_FORMAT;
use trendscope_engine::{BatchResult, ClusterReport};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a batch result.
    pub fn format_result(&self, result: &BatchResult, high_trend_only: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result, high_trend_only)),
            OutputFormat::Quiet => Ok(self.format_result_quiet(result)),
        }
    }

    /// Summary table plus the member items of every listed cluster.
    fn format_result_table(&self, result: &BatchResult, high_trend_only: bool) -> String {
        let clusters: Vec<&ClusterReport> = result
            .ranked()
            .into_iter()
            .filter(|c| !high_trend_only || result.is_high_trend(c.label))
            .collect();

        if clusters.is_empty() {
            return self.colorize("No trending clusters found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Cluster",
            "Trend Score",
            "Recency",
            "Velocity (days/item)",
            "Volume",
            "Diversity",
            "Search Interest",
            "High",
        ]);

        for cluster in &clusters {
            let m = &cluster.metrics;
            builder.push_record([
                cluster.label.to_string(),
                format!("{:.2}", cluster.normalized_score()),
                format!("{:.2}", m.recency),
                format!("{:.2}", m.velocity),
                m.volume.to_string(),
                format!("{:.1}%", m.diversity * 100.0),
                format!("{:.1}%", m.search_interest * 100.0),
                if result.is_high_trend(cluster.label) { "yes" } else { "" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![table.to_string()];

        for cluster in &clusters {
            let heading = format!(
                "Cluster {} (Trend Score: {:.2})",
                cluster.label,
                cluster.normalized_score()
            );
            let heading = if result.is_high_trend(cluster.label) {
                self.colorize(&heading, "green")
            } else {
                heading
            };
            lines.push(String::new());
            lines.push(heading);
            for item in &cluster.items {
                lines.push(format!(
                    "  - {}: {}",
                    item.date().format(DATE_FORMAT),
                    item.title()
                ));
            }
        }

        lines.push(String::new());
        lines.push(self.info(&format!(
            "{} high-trend of {} clusters, {} noise items (batch {})",
            result.high_trend.len(),
            result.clusters.len(),
            result.noise.len(),
            result.batch_id
        )));

        lines.join("\n")
    }

    /// High-trend member urls, one per line.
    fn format_result_quiet(&self, result: &BatchResult) -> String {
        result
            .high_trend
            .iter()
            .flat_map(|h| h.urls.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trendscope_domain::Item;
    use trendscope_embed::HashingEmbeddingModel;
    use trendscope_engine::{EngineConfig, TrendEngine};
    use trendscope_interest::StaticInterestProvider;

    fn result() -> BatchResult {
        let engine = TrendEngine::new(
            HashingEmbeddingModel::default(),
            StaticInterestProvider::neutral(),
            EngineConfig::default(),
        )
        .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items = vec![
            Item::new("Earthquake strikes region", day, "wire", "eq-1").unwrap(),
            Item::new("Earthquake strikes region overnight", day, "daily", "eq-2").unwrap(),
            Item::new("Stock market rallies", day, "money", "mk-1").unwrap(),
        ];
        engine.analyze(&items).unwrap()
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_result(&result(), false).unwrap();
        assert!(output.contains("Trend Score"));
        assert!(output.contains("Cluster 0 (Trend Score: 1.00)"));
        assert!(output.contains("  - 2024-01-01: Earthquake strikes region overnight"));
        assert!(output.contains("100.0%"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_result(&result(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["high_trend"][0]["urls"][0], "eq-1");
        assert_eq!(value["noise"][0], "mk-1");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_result(&result(), false).unwrap();
        assert_eq!(output, "eq-1\neq-2");
    }

    #[test]
    fn test_empty_result() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut empty = result();
        empty.clusters.clear();
        let output = formatter.format_result(&empty, false).unwrap();
        assert!(output.contains("No trending clusters found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
