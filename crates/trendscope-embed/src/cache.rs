//! Memoizing embedding cache
//!
//! Batches from overlapping collector runs repeat many titles. The cache
//! wraps any [`EmbeddingModel`] and remembers vectors keyed by the exact
//! title text, so a repeated title is embedded once. The table holds at most
//! `capacity` vectors; once full, the oldest entry is evicted first. The memo
//! table is the only state; results are identical with or without it.

use crate::{EmbeddingError, EmbeddingModel};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Default maximum number of cached vectors
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Memoizing wrapper around an embedding model
pub struct CachedEmbeddingModel<M> {
    inner: M,
    capacity: usize,
    entries: Mutex<CacheState>,
}

#[derive(Default)]
struct CacheState {
    vectors: HashMap<String, Vec<f32>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl CacheState {
    fn insert(&mut self, text: &str, vector: Vec<f32>, capacity: usize) {
        if capacity == 0 || self.vectors.contains_key(text) {
            return;
        }
        while self.vectors.len() >= capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.vectors.remove(&oldest);
        }
        self.order.push_back(text.to_string());
        self.vectors.insert(text.to_string(), vector);
    }
}

impl<M: EmbeddingModel> CachedEmbeddingModel<M> {
    /// Wrap a model with an empty cache of [`DEFAULT_CACHE_CAPACITY`] entries
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wrap a model with an empty cache holding at most `capacity` vectors
    ///
    /// A capacity of zero disables caching.
    pub fn with_capacity(inner: M, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            entries: Mutex::new(CacheState::default()),
        }
    }

    /// Number of cached vectors
    pub fn len(&self) -> usize {
        self.state().vectors.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached vectors
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(hits, misses)` since creation or the last clear
    pub fn stats(&self) -> (u64, u64) {
        let state = self.state();
        (state.hits, state.misses)
    }

    /// Drop every cached vector and reset counters
    pub fn clear(&self) {
        *self.state() = CacheState::default();
    }

    /// The wrapped model
    pub fn inner(&self) -> &M {
        &self.inner
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // The table holds plain data, so a poisoned lock is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<M: EmbeddingModel> EmbeddingModel for CachedEmbeddingModel<M> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        {
            let mut state = self.state();
            if let Some(vector) = state.vectors.get(text).cloned() {
                state.hits += 1;
                return Ok(vector);
            }
            state.misses += 1;
        }

        // Compute outside the lock; failures are not cached
        let vector = self.inner.embed(text)?;
        self.state().insert(text, vector.clone(), self.capacity);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}
