//! Batch identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one engine run, based on UUIDv7
///
/// Cluster labels are only meaningful inside a batch; the batch id lets logs
/// and downstream persistence tell two runs apart. UUIDv7 keeps ids sortable
/// by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(uuid::Uuid);

impl BatchId {
    /// Generate a new time-ordered BatchId
    ///
    /// # Examples
    ///
    /// ```
    /// use trendscope_domain::BatchId;
    ///
    /// let first = BatchId::new();
    /// let second = BatchId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a BatchId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid batch id: {}", e))
    }

    /// Milliseconds since the Unix epoch encoded in the id
    pub fn timestamp_ms(&self) -> u64 {
        (self.0.as_u128() >> 80) as u64
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
