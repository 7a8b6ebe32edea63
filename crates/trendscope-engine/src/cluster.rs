//! Cluster Engine
//!
//! DBSCAN over cosine distance. Points with at least `min_samples` points
//! (themselves included) within `eps` are core points; clusters grow from
//! core points through their neighborhoods, and everything unreached is
//! noise. No cluster count is declared up front and outliers are never forced
//! into a group.
//!
//! Points are visited in input order and labels are handed out in discovery
//! order, so identical input always yields identical labels.

use crate::config::MIN_SAMPLES;
use crate::error::EngineError;
use std::collections::VecDeque;
use trendscope_domain::{ClusterLabel, NOISE};
use trendscope_embed::cosine_distance;

/// Density-based clusterer under cosine distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dbscan {
    eps: f32,
    min_samples: usize,
}

impl Dbscan {
    /// Clusterer with radius `eps` and the fixed minimum of two samples
    pub fn new(eps: f32) -> Self {
        Self {
            eps,
            min_samples: MIN_SAMPLES,
        }
    }

    /// Neighborhood radius
    pub fn eps(&self) -> f32 {
        self.eps
    }

    /// Minimum neighborhood size, the point itself included
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Assign a label to every point; [`NOISE`] marks unclustered points
    ///
    /// # Errors
    ///
    /// Returns a clustering-stage error if the points differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use trendscope_engine::cluster::Dbscan;
    /// use trendscope_domain::NOISE;
    ///
    /// let points = vec![
    ///     vec![1.0, 0.0],
    ///     vec![0.99, 0.05],
    ///     vec![0.0, 1.0],
    /// ];
    /// let labels = Dbscan::new(0.1).fit_predict(&points).unwrap();
    /// assert_eq!(labels, vec![0, 0, NOISE]);
    /// ```
    pub fn fit_predict(&self, points: &[Vec<f32>]) -> Result<Vec<ClusterLabel>, EngineError> {
        if let Some(first) = points.first() {
            let dimension = first.len();
            if let Some(bad) = points.iter().find(|p| p.len() != dimension) {
                return Err(EngineError::Clustering(format!(
                    "inconsistent vector lengths: {} and {}",
                    dimension,
                    bad.len()
                )));
            }
        }

        let neighborhoods = self.neighborhoods(points);
        let is_core: Vec<bool> = neighborhoods
            .iter()
            .map(|n| n.len() >= self.min_samples)
            .collect();

        let mut labels: Vec<Option<ClusterLabel>> = vec![None; points.len()];
        let mut next_label: ClusterLabel = 0;

        for start in 0..points.len() {
            if labels[start].is_some() || !is_core[start] {
                continue;
            }

            let label = next_label;
            next_label += 1;
            labels[start] = Some(label);

            let mut queue: VecDeque<usize> = VecDeque::from([start]);
            while let Some(point) = queue.pop_front() {
                // Border points join the cluster but do not expand it
                if !is_core[point] {
                    continue;
                }
                for &neighbor in &neighborhoods[point] {
                    if labels[neighbor].is_none() {
                        labels[neighbor] = Some(label);
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        let labels: Vec<ClusterLabel> = labels
            .into_iter()
            .map(|label| label.unwrap_or(NOISE))
            .collect();

        tracing::debug!(clusters = next_label, "DBSCAN labels: {:?}", labels);
        Ok(labels)
    }

    /// Indices within `eps` of each point, the point itself included
    fn neighborhoods(&self, points: &[Vec<f32>]) -> Vec<Vec<usize>> {
        let n = points.len();
        let mut neighborhoods: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

        for i in 0..n {
            for j in (i + 1)..n {
                if cosine_distance(&points[i], &points[j]) <= self.eps {
                    neighborhoods[i].push(j);
                    neighborhoods[j].push(i);
                }
            }
        }

        for neighborhood in &mut neighborhoods {
            neighborhood.sort_unstable();
        }
        neighborhoods
    }
}
