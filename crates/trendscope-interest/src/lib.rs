//! Trendscope Search-Interest Providers
//!
//! Implementations of the `SearchInterestProvider` and `KeywordStrategy`
//! traits from `trendscope-domain`. The engine treats search interest as an
//! optional signal: whatever a provider returns is clamped and scaled, and any
//! error is replaced by a neutral default by the caller.
//!
//! # Providers
//!
//! - `HttpInterestProvider`: Bounded-timeout HTTP time-series client
//! - `StaticInterestProvider`: Fixed value, e.g. the neutral 50
//! - `MockInterestProvider`: Scripted responses and failures for testing
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use trendscope_domain::traits::SearchInterestProvider;
//! use trendscope_interest::StaticInterestProvider;
//!
//! let provider = StaticInterestProvider::neutral();
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let value = provider.mean_interest(&["earthquake".to_string()], day, day).unwrap();
//! assert_eq!(value, 50.0);
//! ```

#![warn(missing_docs)]

pub mod http;
pub mod keywords;
pub mod mock;

use thiserror::Error;

pub use http::{HttpInterestProvider, HttpInterestSettings};
pub use keywords::LongWordKeywords;
pub use mock::{MockInterestProvider, StaticInterestProvider};

/// Errors that can occur while querying an interest provider
#[derive(Error, Debug)]
pub enum InterestError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider did not answer within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider answered but had no data points for the query
    #[error("No interest data for the requested keywords")]
    NoData,

    /// The query itself was unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error
    #[error("Interest provider error: {0}")]
    Other(String),
}
