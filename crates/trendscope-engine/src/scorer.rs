//! Trend Scorer
//!
//! Computes five sub-metrics for one cluster and combines them into a
//! weighted score:
//!
//! | Metric | Definition |
//! |--------|------------|
//! | recency | mean `exp(-age / time_window)`, age in days from the cluster's newest item |
//! | velocity | mean gap in days between consecutive sorted dates |
//! | volume | item count |
//! | diversity | distinct sources / item count |
//! | search_interest | provider mean interest / 100, or the default on failure |
//!
//! Recency is measured against the cluster's own newest date, never the
//! wall clock, so scoring the same cluster twice gives bit-identical results.

use crate::config::{InterestConfig, ScoringConfig};
use crate::error::EngineError;
use chrono::NaiveDate;
use std::collections::HashSet;
use trendscope_domain::traits::{KeywordStrategy, SearchInterestProvider, MAX_INTEREST, MAX_KEYWORDS};
use trendscope_domain::{Item, TrendMetrics};

/// How the search-interest value of a cluster was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestSource {
    /// The provider answered
    Provider,
    /// The provider failed and the default was used
    Fallback,
    /// No keyword qualified, so the provider was not asked
    NoKeywords,
}

/// Metrics of one cluster plus how its search interest was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    /// The metrics; `normalized_score` is still `None`
    pub metrics: TrendMetrics,
    /// Origin of `metrics.search_interest`
    pub interest_source: InterestSource,
}

/// Scores clusters with an injected interest provider and keyword strategy
pub struct TrendScorer<'a, P, K> {
    provider: &'a P,
    keywords: &'a K,
    scoring: ScoringConfig,
    interest: InterestConfig,
}

impl<'a, P, K> TrendScorer<'a, P, K>
where
    P: SearchInterestProvider,
    K: KeywordStrategy,
{
    /// Create a scorer
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either section fails validation, so
    /// a default interest outside `[0, 1]` is never reported.
    pub fn new(
        provider: &'a P,
        keywords: &'a K,
        scoring: ScoringConfig,
        interest: InterestConfig,
    ) -> Result<Self, EngineError> {
        scoring.validate()?;
        interest.validate()?;
        Ok(Self {
            provider,
            keywords,
            scoring,
            interest,
        })
    }

    /// Score one cluster of at least two items
    ///
    /// # Errors
    ///
    /// Returns a scoring-stage error for clusters smaller than two items or if
    /// any metric comes out non-finite.
    pub fn score(&self, cluster: &[Item]) -> Result<ScoreOutcome, EngineError> {
        if cluster.len() < 2 {
            return Err(EngineError::Scoring(format!(
                "a cluster needs at least two items, got {}",
                cluster.len()
            )));
        }

        let dates: Vec<NaiveDate> = cluster.iter().map(Item::date).collect();
        let sources: Vec<&str> = cluster.iter().map(Item::source).collect();

        let recency = recency(&dates, self.scoring.effective_time_window());
        let velocity = velocity(&dates);
        let volume = cluster.len();
        let diversity = diversity(&sources);
        let (search_interest, interest_source) = self.search_interest(cluster, &dates);

        let weights = self.scoring.weights;
        let score = recency * weights.recency
            + velocity * weights.velocity
            + volume as f64 * weights.volume
            + diversity * weights.diversity
            + search_interest * weights.search_interest;

        let metrics = TrendMetrics {
            recency,
            velocity,
            volume,
            diversity,
            search_interest,
            score,
            normalized_score: None,
        };

        if !metrics.is_finite() {
            return Err(EngineError::Scoring(format!(
                "non-finite metrics: {:?}",
                metrics
            )));
        }

        Ok(ScoreOutcome {
            metrics,
            interest_source,
        })
    }

    /// Provider interest scaled to `[0, 1]`, or the configured default
    fn search_interest(&self, cluster: &[Item], dates: &[NaiveDate]) -> (f64, InterestSource) {
        let default = self.interest.default_interest;

        let titles: Vec<&str> = cluster.iter().map(Item::title).collect();
        let mut keywords = self.keywords.keywords(&titles);
        keywords.truncate(self.interest.max_keywords.min(MAX_KEYWORDS));
        if keywords.is_empty() {
            tracing::debug!("No keywords for cluster, using default interest {}", default);
            return (default, InterestSource::NoKeywords);
        }

        let (Some(&start), Some(&end)) = (dates.iter().min(), dates.iter().max()) else {
            return (default, InterestSource::NoKeywords);
        };

        match self.provider.mean_interest(&keywords, start, end) {
            Ok(value) if value.is_finite() => {
                (value.clamp(0.0, MAX_INTEREST) / MAX_INTEREST, InterestSource::Provider)
            }
            Ok(value) => {
                tracing::warn!(
                    ?keywords,
                    "Search interest provider returned {}, using default {}",
                    value,
                    default
                );
                (default, InterestSource::Fallback)
            }
            Err(e) => {
                tracing::warn!(
                    ?keywords,
                    "Search interest provider failed ({}), using default {}",
                    e,
                    default
                );
                (default, InterestSource::Fallback)
            }
        }
    }
}

/// Mean `exp(-age / time_window)` with age measured from the newest date
///
/// `time_window` is floored at one day. An empty slice scores 0.
pub fn recency(dates: &[NaiveDate], time_window: f64) -> f64 {
    let Some(&latest) = dates.iter().max() else {
        return 0.0;
    };
    let time_window = time_window.max(1.0);

    let total: f64 = dates
        .iter()
        .map(|date| {
            let age = (latest - *date).num_days().max(0) as f64;
            (-age / time_window).exp()
        })
        .sum();
    total / dates.len() as f64
}

/// Mean gap in days between consecutive sorted dates
///
/// Zero when there are fewer than two dates; repeated dates contribute
/// zero-length gaps.
pub fn velocity(dates: &[NaiveDate]) -> f64 {
    if dates.len() < 2 {
        return 0.0;
    }

    let mut sorted = dates.to_vec();
    sorted.sort_unstable();

    let total: i64 = sorted
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .sum();
    total as f64 / (sorted.len() - 1) as f64
}

/// Distinct sources over total count; zero for an empty slice
pub fn diversity(sources: &[&str]) -> f64 {
    if sources.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = sources.iter().copied().collect();
    unique.len() as f64 / sources.len() as f64
}
