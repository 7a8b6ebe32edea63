//! Embedding Models for Title Vectorization
//!
//! This crate maps item titles to fixed-length vectors for the similarity
//! space. Models are passed to the engine explicitly; none of them keeps
//! process-wide state.
//!
//! # Models
//!
//! - **HashingEmbeddingModel**: Local, deterministic bag-of-words feature hashing
//! - **OllamaEmbeddingModel**: Embeddings from an Ollama server
//! - **CachedEmbeddingModel**: Bounded, text-keyed memo wrapper around any model
//!
//! # Examples
//!
//! ```rust
//! use trendscope_embed::{EmbeddingModel, HashingEmbeddingModel};
//!
//! let model = HashingEmbeddingModel::new(256);
//! let embedding = model.embed("Earthquake strikes region").unwrap();
//! assert_eq!(embedding.len(), 256);
//!
//! // Same text always produces same embedding
//! assert_eq!(embedding, model.embed("Earthquake strikes region").unwrap());
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod hashing;
pub mod ollama;

use thiserror::Error;

pub use cache::{CachedEmbeddingModel, DEFAULT_CACHE_CAPACITY};
pub use hashing::HashingEmbeddingModel;
pub use ollama::OllamaEmbeddingModel;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Invalid input text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Model inference error
    #[error("Model inference failed: {0}")]
    InferenceFailed(String),

    /// The model returned a vector of unexpected length
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the model advertises
        expected: usize,
        /// Dimension actually returned
        actual: usize,
    },
}

/// Trait for embedding models
///
/// Contract: identical input text yields an identical vector, and every
/// vector has [`EmbeddingModel::dimension`] components. Vectors need not be
/// unit length; the similarity space normalizes them.
pub trait EmbeddingModel {
    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Get the dimension of embeddings produced by this model
    fn dimension(&self) -> usize;

    /// Embed a whole batch, stopping at the first failure
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

impl<M: EmbeddingModel + ?Sized> EmbeddingModel for Box<M> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

/// 64-bit FNV-1a hash of a string
///
/// Stable across platforms and compiler versions, unlike `DefaultHasher`,
/// so hashed embeddings and cache keys never change between builds.
pub fn fingerprint(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// Calculate cosine similarity between two vectors
///
/// Returns a value in `[-1, 1]`, or `0.0` if either vector has zero length.
///
/// # Panics
///
/// Panics if vectors have different lengths
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Cosine distance `1 - cosine_similarity`, in `[0, 2]`
///
/// A zero vector is at distance 1 from everything, itself included.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}
