//! Feature-hashing embedding model
//!
//! Titles are lowercased and split into alphanumeric tokens; each token adds
//! `+1` or `-1` to one bucket chosen by its FNV-1a hash. Titles that share
//! words point in similar directions, which is enough for near-duplicate
//! headlines to land close together without shipping a neural model.

use crate::{fingerprint, EmbeddingError, EmbeddingModel};

/// Default bucket count
pub const DEFAULT_DIMENSION: usize = 512;

/// Deterministic bag-of-words embedding model
///
/// The embeddings are:
///
/// - **Deterministic**: Same text always produces same embedding
/// - **Normalized**: Non-degenerate vectors have unit length
/// - **Lexical**: Shared words raise cosine similarity
///
/// Text without any alphanumeric token yields the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbeddingModel {
    dimension: usize,
}

impl HashingEmbeddingModel {
    /// Create a new hashing model
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "Embedding dimension must be positive");
        Self { dimension }
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
    }
}

impl Default for HashingEmbeddingModel {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingModel for HashingEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut embedding = vec![0.0f32; self.dimension];
        for token in Self::tokens(text) {
            let hash = fingerprint(&token);
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
            embedding[bucket] += sign;
        }

        // Normalize to unit length for cosine similarity
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
