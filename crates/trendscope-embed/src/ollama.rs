//! Ollama Embedding Model
//!
//! Requests title embeddings from an Ollama server's `/api/embeddings`
//! endpoint. Calls are blocking with a bounded timeout and a small number of
//! retries with exponential backoff.
//!
//! # Examples
//!
//! ```no_run
//! use trendscope_embed::{EmbeddingModel, OllamaEmbeddingModel};
//!
//! let model = OllamaEmbeddingModel::new("http://localhost:11434", "nomic-embed-text", 768).unwrap();
//! let vector = model.embed("Earthquake strikes region").unwrap();
//! assert_eq!(vector.len(), 768);
//! ```

use crate::{EmbeddingError, EmbeddingModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for embedding requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per title
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API embedding model
pub struct OllamaEmbeddingModel {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::blocking::Client,
    max_retries: u32,
}

/// Request body for the Ollama embeddings API
#[derive(Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response from the Ollama embeddings API
#[derive(Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

impl OllamaEmbeddingModel {
    /// Create a new Ollama embedding model
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Embedding model name (e.g., "nomic-embed-text")
    /// - `dimension`: Vector length the model produces
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        Self::with_timeout(endpoint, model, dimension, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a model with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimension,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts per title
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn request(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let body = OllamaEmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| EmbeddingError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EmbeddingError::InferenceFailed(format!(
                "Model not available: {}",
                self.model
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbeddingError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: OllamaEmbeddingResponse = response.json().map_err(|e| {
            EmbeddingError::InferenceFailed(format!("Failed to parse response: {}", e))
        })?;

        if parsed.embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: parsed.embedding.len(),
            });
        }

        Ok(parsed.embedding)
    }
}

impl EmbeddingModel for OllamaEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Empty text cannot be embedded".to_string(),
            ));
        }

        let mut attempts = 0;
        loop {
            match self.request(text) {
                Ok(embedding) => return Ok(embedding),
                // Only transport failures are worth another attempt
                Err(EmbeddingError::Communication(message)) => {
                    attempts += 1;
                    if attempts >= self.max_retries {
                        return Err(EmbeddingError::Communication(message));
                    }
                    tracing::debug!(attempt = attempts, "Embedding request failed: {}", message);
                    // Exponential backoff: 1s, 2s, 4s, etc.
                    std::thread::sleep(Duration::from_secs(2u64.pow(attempts - 1)));
                }
                Err(other) => return Err(other),
            }
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
