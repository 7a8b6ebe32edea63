//! High-trend selection
//!
//! Scores are made batch-relative by dividing each by the largest score of
//! the batch, so the top cluster always sits at 1.0. Clusters whose
//! normalized score strictly exceeds the threshold are selected.

use crate::error::EngineError;
use std::collections::BTreeMap;
use trendscope_domain::{ClusterLabel, Clusters, HighTrendCluster, Item, TrendMetrics};

/// Fill in `normalized_score` for every scored cluster of one batch
///
/// When the batch maximum is zero or negative every cluster is assigned 1.0.
/// An empty map is left untouched.
///
/// # Errors
///
/// Returns a selection-stage error if any score is non-finite.
pub fn normalize_scores(scored: &mut BTreeMap<ClusterLabel, TrendMetrics>) -> Result<(), EngineError> {
    if let Some((label, metrics)) = scored.iter().find(|(_, m)| !m.score.is_finite()) {
        return Err(EngineError::Selection(format!(
            "cluster {} has non-finite score {}",
            label, metrics.score
        )));
    }

    let Some(max_score) = scored.values().map(|m| m.score).reduce(f64::max) else {
        return Ok(());
    };

    for metrics in scored.values_mut() {
        let normalized = if max_score > 0.0 {
            (metrics.score / max_score).clamp(0.0, 1.0)
        } else {
            1.0
        };
        metrics.normalized_score = Some(normalized);
    }
    Ok(())
}

/// Picks the clusters whose batch-relative score beats a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSelector {
    threshold: f64,
}

impl TrendSelector {
    /// Create a selector; `threshold` is compared with strict `>`
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalize `scored` in place and return the high-trend clusters
    ///
    /// Results are ordered by normalized score, highest first, with ties
    /// broken by ascending label. Member urls keep batch order.
    pub fn select(
        &self,
        clusters: &Clusters,
        scored: &mut BTreeMap<ClusterLabel, TrendMetrics>,
    ) -> Result<Vec<HighTrendCluster>, EngineError> {
        normalize_scores(scored)?;

        let mut selected: Vec<HighTrendCluster> = scored
            .iter()
            .filter(|(_, m)| m.normalized_score.unwrap_or(0.0) > self.threshold)
            .map(|(&label, &metrics)| {
                let urls = clusters
                    .get(label)
                    .unwrap_or_default()
                    .iter()
                    .map(|item: &Item| item.url().to_string())
                    .collect();
                HighTrendCluster {
                    cluster_id: label,
                    urls,
                    metrics,
                }
            })
            .collect();

        selected.sort_by(|a, b| {
            b.normalized_score()
                .total_cmp(&a.normalized_score())
                .then(a.cluster_id.cmp(&b.cluster_id))
        });

        tracing::debug!(
            "Selected {} of {} scored clusters above {}",
            selected.len(),
            scored.len(),
            self.threshold
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metrics(score: f64) -> TrendMetrics {
        TrendMetrics {
            recency: 1.0,
            velocity: 0.0,
            volume: 2,
            diversity: 1.0,
            search_interest: 0.5,
            score,
            normalized_score: None,
        }
    }

    fn clusters(labels: &[ClusterLabel]) -> Clusters {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items: Vec<Item> = (0..labels.len())
            .map(|i| Item::new(format!("t{}", i), d, "s", format!("u{}", i)).unwrap())
            .collect();
        Clusters::from_labels(&items, labels)
    }

    fn scored(scores: &[(ClusterLabel, f64)]) -> BTreeMap<ClusterLabel, TrendMetrics> {
        scores.iter().map(|&(l, s)| (l, metrics(s))).collect()
    }

    #[test]
    fn test_normalize_max_is_one() {
        let mut map = scored(&[(0, 2.0), (1, 1.0), (2, 0.5)]);
        normalize_scores(&mut map).unwrap();
        assert_eq!(map[&0].normalized_score, Some(1.0));
        assert_eq!(map[&1].normalized_score, Some(0.5));
        assert_eq!(map[&2].normalized_score, Some(0.25));
    }

    #[test]
    fn test_normalize_zero_max() {
        let mut map = scored(&[(0, 0.0), (1, 0.0)]);
        normalize_scores(&mut map).unwrap();
        assert!(map.values().all(|m| m.normalized_score == Some(1.0)));
    }

    #[test]
    fn test_normalize_rejects_nan() {
        let mut map = scored(&[(0, 1.0), (1, f64::NAN)]);
        let err = normalize_scores(&mut map).unwrap_err();
        assert!(matches!(err, EngineError::Selection(_)));
    }

    #[test]
    fn test_normalize_empty() {
        let mut map = BTreeMap::new();
        normalize_scores(&mut map).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_select_threshold_is_strict() {
        let clusters = clusters(&[0, 0, 1, 1, 2, 2]);
        let mut map = scored(&[(0, 4.0), (1, 3.0), (2, 3.5)]);
        let selected = TrendSelector::new(0.75).select(&clusters, &mut map).unwrap();

        // 3.0 / 4.0 == 0.75 is not above the threshold
        let labels: Vec<_> = selected.iter().map(|h| h.cluster_id).collect();
        assert_eq!(labels, vec![0, 2]);
        assert_eq!(selected[0].urls, vec!["u0", "u1"]);
        assert_eq!(selected[1].normalized_score(), 0.875);
    }

    #[test]
    fn test_select_single_cluster_always_selected() {
        let clusters = clusters(&[0, 0, -1]);
        let mut map = scored(&[(0, 0.01)]);
        let selected = TrendSelector::new(0.75).select(&clusters, &mut map).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].normalized_score(), 1.0);
    }

    #[test]
    fn test_select_ties_by_label() {
        let clusters = clusters(&[0, 0, 1, 1, 2, 2]);
        let mut map = scored(&[(2, 5.0), (0, 5.0), (1, 5.0)]);
        let selected = TrendSelector::new(0.75).select(&clusters, &mut map).unwrap();
        let labels: Vec<_> = selected.iter().map(|h| h.cluster_id).collect();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_select_empty() {
        let clusters = Clusters::new();
        let mut map = BTreeMap::new();
        assert!(TrendSelector::new(0.75).select(&clusters, &mut map).unwrap().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn scored_map(scores: &[f64]) -> BTreeMap<ClusterLabel, TrendMetrics> {
        scores
            .iter()
            .enumerate()
            .map(|(label, &score)| {
                let metrics = TrendMetrics {
                    recency: 1.0,
                    velocity: 0.0,
                    volume: 2,
                    diversity: 1.0,
                    search_interest: 0.5,
                    score,
                    normalized_score: None,
                };
                (label as ClusterLabel, metrics)
            })
            .collect()
    }

    fn pairs(count: usize) -> Clusters {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items: Vec<Item> = (0..count * 2)
            .map(|i| Item::new(format!("t{}", i), d, "s", format!("u{}", i)).unwrap())
            .collect();
        let labels: Vec<ClusterLabel> = (0..count * 2).map(|i| (i / 2) as ClusterLabel).collect();
        Clusters::from_labels(&items, &labels)
    }

    proptest! {
        /// Property: the batch maximum normalizes to exactly 1.0, everything else into [0, 1]
        #[test]
        fn test_normalization_bounded(scores in prop::collection::vec(0.0f64..100.0, 1..20)) {
            let mut map = scored_map(&scores);
            normalize_scores(&mut map).unwrap();

            let normalized: Vec<f64> = map.values().map(|m| m.normalized_score.unwrap()).collect();
            prop_assert!(normalized.iter().all(|n| (0.0..=1.0).contains(n)));
            prop_assert_eq!(normalized.iter().copied().fold(f64::MIN, f64::max), 1.0);
        }

        /// Property: selection keeps exactly the clusters above the threshold, best first
        #[test]
        fn test_selection_matches_threshold(
            scores in prop::collection::vec(0.0f64..100.0, 1..20),
            threshold in 0.0f64..1.0,
        ) {
            let clusters = pairs(scores.len());
            let mut map = scored_map(&scores);
            let selected = TrendSelector::new(threshold).select(&clusters, &mut map).unwrap();

            let expected = map
                .values()
                .filter(|m| m.normalized_score.unwrap() > threshold)
                .count();
            prop_assert_eq!(selected.len(), expected);
            prop_assert!(selected.iter().all(|h| h.normalized_score() > threshold));
            prop_assert!(selected.iter().all(|h| h.urls.len() == 2));
            prop_assert!(selected
                .windows(2)
                .all(|w| w[0].normalized_score() >= w[1].normalized_score()));
        }
    }
}
