//! Configuration for the trend engine
//!
//! Every value has a documented default and can be overridden on its own,
//! either in code or through TOML:
//!
//! ```toml
//! [clustering]
//! eps = 0.5
//!
//! [temporal]
//! weight = 0.3
//! steepness = 0.3
//!
//! [scoring]
//! time_window_days = 7.0
//!
//! [scoring.weights]
//! recency = 0.25
//! velocity = 0.25
//! volume = 0.2
//! diversity = 0.1
//! search_interest = 0.2
//!
//! [selection]
//! threshold = 0.75
//!
//! [interest]
//! default_interest = 0.5
//! max_keywords = 3
//! min_keyword_len = 5
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use trendscope_domain::traits::MAX_KEYWORDS;
use trendscope_interest::LongWordKeywords;

/// Minimum neighborhood size, the point itself included
///
/// Fixed at 2: a story needs at least a pair of mutually close items.
pub const MIN_SAMPLES: usize = 2;

/// Clustering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Cosine-distance neighborhood radius, in (0, 2]
    /// Default: 0.5
    pub eps: f32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { eps: 0.5 }
    }
}

/// Temporal feature parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Multiplier on the temporal feature in the composite vector
    /// Default: 0.3 (topical similarity dominates)
    pub weight: f32,

    /// Steepness `k` of the `exp(-k * (1 - normalized))` decay
    /// Default: 0.3
    pub steepness: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            weight: 0.3,
            steepness: 0.3,
        }
    }
}

/// Weights of the five trend sub-metrics
///
/// Conventionally they sum to 1.0, but only non-negativity and a positive
/// total are required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendWeights {
    /// Weight of recency. Default: 0.25
    pub recency: f64,
    /// Weight of velocity. Default: 0.25
    pub velocity: f64,
    /// Weight of volume. Default: 0.2
    pub volume: f64,
    /// Weight of source diversity. Default: 0.1
    pub diversity: f64,
    /// Weight of search interest. Default: 0.2
    pub search_interest: f64,
}

impl Default for TrendWeights {
    fn default() -> Self {
        Self {
            recency: 0.25,
            velocity: 0.25,
            volume: 0.2,
            diversity: 0.1,
            search_interest: 0.2,
        }
    }
}

impl TrendWeights {
    /// Sum of all five weights
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.recency,
            self.velocity,
            self.volume,
            self.diversity,
            self.search_interest,
        ]
    }
}

/// Trend scoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Decay constant for recency, in days; values below 1 are treated as 1
    /// Default: 7.0
    pub time_window_days: f64,

    /// Sub-metric weights
    pub weights: TrendWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            time_window_days: 7.0,
            weights: TrendWeights::default(),
        }
    }
}

impl ScoringConfig {
    /// Time window with the floor of one day applied
    pub fn effective_time_window(&self) -> f64 {
        self.time_window_days.max(1.0)
    }

    /// Validate the window and weights
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = self.time_window_days;
        if !(window.is_finite() && window > 0.0) {
            return Err(invalid(format!("scoring.time_window_days must be > 0, got {}", window)));
        }

        let weights = self.weights;
        if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("scoring.weights must all be finite and >= 0".to_string()));
        }
        if weights.total() <= 0.0 {
            return Err(invalid("scoring.weights must not all be zero".to_string()));
        }

        Ok(())
    }
}

/// High-trend selection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Normalized score a cluster must exceed, in [0, 1]
    /// Default: 0.75
    pub threshold: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { threshold: 0.75 }
    }
}

/// Search-interest parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    /// Interest used when the provider fails, in [0, 1]
    /// Default: 0.5
    pub default_interest: f64,

    /// Keywords sent per cluster, in 1..=3
    /// Default: 3
    pub max_keywords: usize,

    /// Minimum keyword length in characters
    /// Default: 5 (words longer than 4)
    pub min_keyword_len: usize,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            default_interest: 0.5,
            max_keywords: 3,
            min_keyword_len: 5,
        }
    }
}

impl InterestConfig {
    /// Keyword strategy described by this configuration
    pub fn keyword_strategy(&self) -> LongWordKeywords {
        LongWordKeywords::new(self.min_keyword_len, self.max_keywords)
    }

    /// Validate the default interest and keyword limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let default_interest = self.default_interest;
        if !(0.0..=1.0).contains(&default_interest) {
            return Err(invalid(format!(
                "interest.default_interest must be in [0, 1], got {}",
                default_interest
            )));
        }

        let max_keywords = self.max_keywords;
        if !(1..=MAX_KEYWORDS).contains(&max_keywords) {
            return Err(invalid(format!(
                "interest.max_keywords must be in 1..={}, got {}",
                MAX_KEYWORDS, max_keywords
            )));
        }

        Ok(())
    }
}

/// Complete engine configuration
///
/// # Examples
///
/// ```
/// use trendscope_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.clustering.eps, 0.5);
/// assert_eq!(config.selection.threshold, 0.75);
///
/// // Override a single value
/// let config = EngineConfig::from_toml("[clustering]\neps = 0.4").unwrap();
/// assert_eq!(config.clustering.eps, 0.4);
/// assert_eq!(config.temporal.weight, 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Clustering parameters
    pub clustering: ClusteringConfig,
    /// Temporal feature parameters
    pub temporal: TemporalConfig,
    /// Scoring parameters
    pub scoring: ScoringConfig,
    /// Selection parameters
    pub selection: SelectionConfig,
    /// Search-interest parameters
    pub interest: InterestConfig,
}

impl EngineConfig {
    /// Strict preset: tighter clusters, fewer high-trend picks
    ///
    /// - eps: 0.35
    /// - threshold: 0.85
    pub fn strict() -> Self {
        Self {
            clustering: ClusteringConfig { eps: 0.35 },
            selection: SelectionConfig { threshold: 0.85 },
            ..Self::default()
        }
    }

    /// Lenient preset: looser clusters, more high-trend picks
    ///
    /// - eps: 0.6
    /// - threshold: 0.6
    pub fn lenient() -> Self {
        Self {
            clustering: ClusteringConfig { eps: 0.6 },
            selection: SelectionConfig { threshold: 0.6 },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.clustering.eps;
        if !(eps.is_finite() && eps > 0.0 && eps <= 2.0) {
            return Err(invalid(format!("clustering.eps must be in (0, 2], got {}", eps)));
        }

        let weight = self.temporal.weight;
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(invalid(format!("temporal.weight must be >= 0, got {}", weight)));
        }
        let steepness = self.temporal.steepness;
        if !(steepness.is_finite() && steepness >= 0.0) {
            return Err(invalid(format!("temporal.steepness must be >= 0, got {}", steepness)));
        }

        self.scoring.validate()?;

        let threshold = self.selection.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid(format!("selection.threshold must be in [0, 1], got {}", threshold)));
        }

        self.interest.validate()
    }

    /// Load configuration from a TOML string; missing values take defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.clustering.eps, 0.5);
        assert_eq!(config.temporal.weight, 0.3);
        assert_eq!(config.temporal.steepness, 0.3);
        assert_eq!(config.scoring.time_window_days, 7.0);
        assert_eq!(config.scoring.weights.recency, 0.25);
        assert_eq!(config.scoring.weights.velocity, 0.25);
        assert_eq!(config.scoring.weights.volume, 0.2);
        assert_eq!(config.scoring.weights.diversity, 0.1);
        assert_eq!(config.scoring.weights.search_interest, 0.2);
        assert_eq!(config.selection.threshold, 0.75);
        assert_eq!(config.interest.default_interest, 0.5);
        assert_eq!(config.interest.max_keywords, 3);
        assert!((config.scoring.weights.total() - 1.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        let strict = EngineConfig::strict();
        let lenient = EngineConfig::lenient();
        assert!(strict.validate().is_ok());
        assert!(lenient.validate().is_ok());
        assert!(strict.clustering.eps < EngineConfig::default().clustering.eps);
        assert!(lenient.selection.threshold < EngineConfig::default().selection.threshold);
    }

    #[test]
    fn test_time_window_floor() {
        let scoring = ScoringConfig {
            time_window_days: 0.25,
            ..Default::default()
        };
        assert_eq!(scoring.effective_time_window(), 1.0);
        assert_eq!(ScoringConfig::default().effective_time_window(), 7.0);
    }

    #[test]
    fn test_invalid_eps() {
        let mut config = EngineConfig::default();
        config.clustering.eps = 0.0;
        assert!(config.validate().is_err());
        config.clustering.eps = 2.5;
        assert!(config.validate().is_err());
        config.clustering.eps = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_weights() {
        let mut config = EngineConfig::default();
        config.scoring.weights.volume = -0.1;
        assert!(config.validate().is_err());

        config.scoring.weights = TrendWeights {
            recency: 0.0,
            velocity: 0.0,
            volume: 0.0,
            diversity: 0.0,
            search_interest: 0.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let mut config = EngineConfig::default();
        config.scoring.weights.volume = 2.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold_and_default_interest() {
        let mut config = EngineConfig::default();
        config.selection.threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.interest.default_interest = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_keywords_bounded_by_provider_limit() {
        let mut config = EngineConfig::default();
        config.interest.max_keywords = 8;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.interest.max_keywords = 0;
        assert!(config.validate().is_err());

        config.interest.max_keywords = 1;
        assert!(config.validate().is_ok());

        let result = EngineConfig::from_toml("[interest]\nmax_keywords = 4");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml(
            r#"
            [scoring.weights]
            volume = 0.5

            [selection]
            threshold = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.weights.volume, 0.5);
        assert_eq!(config.scoring.weights.recency, 0.25);
        assert_eq!(config.selection.threshold, 0.9);
        assert_eq!(config.clustering.eps, 0.5);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let result = EngineConfig::from_toml("[clustering]\neps = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_keyword_strategy_from_config() {
        let config = InterestConfig {
            max_keywords: 2,
            min_keyword_len: 6,
            ..Default::default()
        };
        assert_eq!(config.keyword_strategy(), LongWordKeywords::new(6, 2));
    }
}
