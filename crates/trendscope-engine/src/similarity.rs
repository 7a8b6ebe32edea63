//! Similarity Space Builder
//!
//! Builds one composite vector per item: the title embedding scaled to unit
//! length, followed by the item's temporal feature multiplied by the temporal
//! weight. Cosine distance over these vectors blends topical similarity with
//! publish-date proximity.

use crate::config::TemporalConfig;
use crate::error::EngineError;
use crate::temporal::temporal_features;
use trendscope_domain::Item;
use trendscope_embed::{EmbeddingError, EmbeddingModel};

/// Feature vector of one item within one clustering run
///
/// Invariants: `semantic` has unit L2 norm (or is all zeros for degenerate
/// text) and `temporal` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeVector {
    semantic: Vec<f32>,
    temporal: f32,
    weight: f32,
}

impl CompositeVector {
    /// Normalized title embedding
    pub fn semantic(&self) -> &[f32] {
        &self.semantic
    }

    /// Unweighted temporal feature
    pub fn temporal(&self) -> f32 {
        self.temporal
    }

    /// `[semantic..., weight * temporal]`, the clustering feature vector
    pub fn to_features(&self) -> Vec<f32> {
        let mut features = Vec::with_capacity(self.semantic.len() + 1);
        features.extend_from_slice(&self.semantic);
        features.push(self.weight * self.temporal);
        features
    }
}

/// Builds composite vectors with an injected embedding model
///
/// The model is borrowed per build; nothing is cached across batches here.
pub struct SimilaritySpace<'a, E> {
    embedder: &'a E,
    config: TemporalConfig,
}

impl<'a, E: EmbeddingModel> SimilaritySpace<'a, E> {
    /// Create a builder around an embedding model
    pub fn new(embedder: &'a E, config: TemporalConfig) -> Self {
        Self { embedder, config }
    }

    /// Composite vectors for a batch, in batch order
    ///
    /// # Errors
    ///
    /// Returns an embedding-stage error if the model fails, returns the wrong
    /// number of vectors, vectors of the wrong length, or non-finite values.
    pub fn build(&self, items: &[Item]) -> Result<Vec<CompositeVector>, EngineError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let titles: Vec<&str> = items.iter().map(Item::title).collect();
        let embeddings = self.embedder.embed_batch(&titles)?;

        if embeddings.len() != items.len() {
            return Err(EngineError::Embedding(EmbeddingError::InferenceFailed(format!(
                "expected {} vectors, got {}",
                items.len(),
                embeddings.len()
            ))));
        }

        let dimension = self.embedder.dimension();
        let dates: Vec<_> = items.iter().map(Item::date).collect();
        let temporal = temporal_features(&dates, self.config.steepness);

        embeddings
            .into_iter()
            .zip(temporal)
            .map(|(embedding, temporal)| {
                if embedding.len() != dimension {
                    return Err(EngineError::Embedding(EmbeddingError::DimensionMismatch {
                        expected: dimension,
                        actual: embedding.len(),
                    }));
                }
                if embedding.iter().any(|v| !v.is_finite()) {
                    return Err(EngineError::Embedding(EmbeddingError::InferenceFailed(
                        "embedding contains non-finite values".to_string(),
                    )));
                }
                Ok(CompositeVector {
                    semantic: l2_normalize(embedding),
                    temporal: temporal.clamp(0.0, 1.0) as f32,
                    weight: self.config.weight,
                })
            })
            .collect()
    }
}

/// Scale a vector to unit length; a zero vector stays zero
pub fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 && magnitude.is_finite() {
        for value in &mut vector {
            *value /= magnitude;
        }
    } else {
        vector.iter_mut().for_each(|value| *value = 0.0);
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trendscope_embed::HashingEmbeddingModel;

    struct FixedModel {
        vectors: Vec<Vec<f32>>,
        dimension: usize,
    }

    impl EmbeddingModel for FixedModel {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Err(EmbeddingError::InferenceFailed("use embed_batch".to_string()))
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(self.vectors.clone())
        }
    }

    fn item(title: &str, day: u32) -> Item {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        Item::new(title, date, "s", format!("u-{}-{}", title, day)).unwrap()
    }

    #[test]
    fn test_l2_normalize() {
        let v = l2_normalize(vec![3.0, 4.0]);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
        assert_eq!(l2_normalize(vec![0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_composite_layout() {
        let model = FixedModel {
            vectors: vec![vec![3.0, 4.0], vec![0.0, 2.0]],
            dimension: 2,
        };
        let config = TemporalConfig { weight: 0.5, steepness: 0.3 };
        let items = vec![item("a", 1), item("b", 2)];

        let vectors = SimilaritySpace::new(&model, config).build(&items).unwrap();
        assert_eq!(vectors.len(), 2);

        let features = vectors[1].to_features();
        assert_eq!(features.len(), 3);
        assert_eq!(&features[..2], &[0.0, 1.0]);
        // Newest item: temporal feature 1.0 times weight 0.5
        assert_eq!(features[2], 0.5);
        assert!((vectors[0].temporal() - (-0.3f64).exp() as f32).abs() < 1e-6);
    }

    #[test]
    fn test_zero_embedding_stays_zero() {
        let model = FixedModel {
            vectors: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            dimension: 2,
        };
        let items = vec![item("a", 1), item("b", 1)];
        let vectors = SimilaritySpace::new(&model, TemporalConfig::default())
            .build(&items)
            .unwrap();
        assert_eq!(vectors[0].semantic(), &[0.0, 0.0]);
        assert_eq!(vectors[0].temporal(), 1.0);
    }

    #[test]
    fn test_semantic_is_unit_length() {
        let model = HashingEmbeddingModel::new(64);
        let items = vec![item("Earthquake strikes region", 1), item("Stock market rallies", 3)];
        let vectors = SimilaritySpace::new(&model, TemporalConfig::default())
            .build(&items)
            .unwrap();
        for v in &vectors {
            let norm: f32 = v.semantic().iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
            assert!((0.0..=1.0).contains(&v.temporal()));
        }
    }

    #[test]
    fn test_dimension_mismatch_is_embedding_error() {
        let model = FixedModel {
            vectors: vec![vec![1.0, 0.0], vec![1.0]],
            dimension: 2,
        };
        let items = vec![item("a", 1), item("b", 1)];
        let err = SimilaritySpace::new(&model, TemporalConfig::default())
            .build(&items)
            .unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Embedding);
    }

    #[test]
    fn test_wrong_vector_count_is_embedding_error() {
        let model = FixedModel {
            vectors: vec![vec![1.0, 0.0]],
            dimension: 2,
        };
        let items = vec![item("a", 1), item("b", 1)];
        assert!(matches!(
            SimilaritySpace::new(&model, TemporalConfig::default()).build(&items),
            Err(EngineError::Embedding(_))
        ));
    }

    #[test]
    fn test_non_finite_embedding_rejected() {
        let model = FixedModel {
            vectors: vec![vec![f32::NAN, 0.0], vec![1.0, 0.0]],
            dimension: 2,
        };
        let items = vec![item("a", 1), item("b", 1)];
        assert!(SimilaritySpace::new(&model, TemporalConfig::default())
            .build(&items)
            .is_err());
    }

    #[test]
    fn test_empty_batch() {
        let model = HashingEmbeddingModel::new(8);
        let vectors = SimilaritySpace::new(&model, TemporalConfig::default())
            .build(&[])
            .unwrap();
        assert!(vectors.is_empty());
    }
}
