//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and the services it
//! consumes. Implementations live in infrastructure crates.

use chrono::NaiveDate;

/// Upper end of the raw interest scale reported by providers
pub const MAX_INTEREST: f64 = 100.0;

/// Most keywords a single interest query may carry
pub const MAX_KEYWORDS: usize = 3;

/// Public-interest time-series provider
///
/// Implemented by the infrastructure layer (trendscope-interest)
pub trait SearchInterestProvider {
    /// Error type for provider operations
    type Error: std::fmt::Display;

    /// Mean interest in `[0, 100]` for up to three keywords over `[start, end]`
    ///
    /// Implementations must bound how long a call may block.
    fn mean_interest(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, Self::Error>;
}

/// Strategy choosing the keywords sent to a [`SearchInterestProvider`]
pub trait KeywordStrategy {
    /// Pick representative keywords from the titles of one cluster
    ///
    /// Returns at most [`MAX_KEYWORDS`] keywords.
    fn keywords(&self, titles: &[&str]) -> Vec<String>;
}

impl<T: SearchInterestProvider + ?Sized> SearchInterestProvider for &T {
    type Error = T::Error;

    fn mean_interest(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, Self::Error> {
        (**self).mean_interest(keywords, start, end)
    }
}
