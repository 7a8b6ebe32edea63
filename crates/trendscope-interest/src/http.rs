//! HTTP Search-Interest Provider
//!
//! Queries a public-interest time-series service for a set of keywords over a
//! date range and reduces the answer to one mean value in `[0, 100]`.
//!
//! # Features
//!
//! - Blocking HTTP with separate connect and total timeouts
//! - Retry with exponential backoff on transport failures
//! - Exact-phrase keyword quoting, geography and property filters
//!
//! # Wire format
//!
//! `GET {endpoint}?q="kw1"&q="kw2"&start=YYYY-MM-DD&end=YYYY-MM-DD&geo=US&property=news`
//!
//! ```json
//! { "timeline": [ { "date": "2024-01-01", "values": [12, 40, 7] } ] }
//! ```
//!
//! Each point holds one value per keyword. The reported interest is the mean
//! over keywords per point, averaged over all points.

use crate::InterestError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use trendscope_domain::traits::{SearchInterestProvider, MAX_KEYWORDS};
use trendscope_domain::DATE_FORMAT;

/// Default connect timeout (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout (25 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Connection settings for [`HttpInterestProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpInterestSettings {
    /// Service URL
    pub endpoint: String,
    /// Geography filter (e.g., "US")
    pub geo: String,
    /// Property filter (e.g., "news")
    pub property: String,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Total per-request timeout
    pub timeout: Duration,
    /// Attempts per query, at least one
    pub max_retries: u32,
}

impl HttpInterestSettings {
    /// Settings for an endpoint with every other value at its default
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            geo: "US".to_string(),
            property: "news".to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Interest time-series response body
#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    #[allow(dead_code)]
    date: Option<String>,
    #[serde(default)]
    values: Vec<f64>,
}

/// Search-interest provider backed by an HTTP time-series service
pub struct HttpInterestProvider {
    settings: HttpInterestSettings,
    client: reqwest::blocking::Client,
}

impl HttpInterestProvider {
    /// Create a provider from settings
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trendscope_interest::{HttpInterestProvider, HttpInterestSettings};
    ///
    /// let provider = HttpInterestProvider::new(
    ///     HttpInterestSettings::new("http://localhost:8700/interest"),
    /// ).unwrap();
    /// ```
    pub fn new(settings: HttpInterestSettings) -> Result<Self, InterestError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| InterestError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self { settings, client })
    }

    /// The settings this provider was built with
    pub fn settings(&self) -> &HttpInterestSettings {
        &self.settings
    }

    fn query(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, InterestError> {
        let mut params: Vec<(&str, String)> = keywords
            .iter()
            .map(|k| ("q", format!("\"{}\"", k)))
            .collect();
        params.push(("start", start.format(DATE_FORMAT).to_string()));
        params.push(("end", end.format(DATE_FORMAT).to_string()));
        params.push(("geo", self.settings.geo.clone()));
        params.push(("property", self.settings.property.clone()));

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&params)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    InterestError::Timeout
                } else {
                    InterestError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InterestError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .map_err(|e| InterestError::InvalidResponse(format!("Failed to read body: {}", e)))?;
        parse_timeline(&body)
    }
}

impl SearchInterestProvider for HttpInterestProvider {
    type Error = InterestError;

    fn mean_interest(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, Self::Error> {
        if keywords.is_empty() {
            return Err(InterestError::InvalidRequest("No keywords given".to_string()));
        }
        if keywords.len() > MAX_KEYWORDS {
            return Err(InterestError::InvalidRequest(format!(
                "At most {} keywords per query, got {}",
                MAX_KEYWORDS,
                keywords.len()
            )));
        }
        if start > end {
            return Err(InterestError::InvalidRequest(format!(
                "Start {} is after end {}",
                start, end
            )));
        }

        let max_retries = self.settings.max_retries.max(1);
        let mut attempts = 0;
        loop {
            match self.query(keywords, start, end) {
                Ok(value) => return Ok(value),
                Err(e @ (InterestError::Communication(_) | InterestError::Timeout)) => {
                    attempts += 1;
                    if attempts >= max_retries {
                        return Err(e);
                    }
                    tracing::debug!(attempt = attempts, "Interest query failed: {}", e);
                    // Exponential backoff: 1s, 2s, 4s, etc.
                    std::thread::sleep(Duration::from_secs(2u64.pow(attempts - 1)));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Reduce a timeline body to the mean over keywords, then over points
pub fn parse_timeline(body: &str) -> Result<f64, InterestError> {
    let response: TimelineResponse = serde_json::from_str(body)
        .map_err(|e| InterestError::InvalidResponse(format!("Failed to parse timeline: {}", e)))?;

    let point_means: Vec<f64> = response
        .timeline
        .iter()
        .filter(|point| !point.values.is_empty())
        .map(|point| point.values.iter().sum::<f64>() / point.values.len() as f64)
        .collect();

    if point_means.is_empty() {
        return Err(InterestError::NoData);
    }

    let mean = point_means.iter().sum::<f64>() / point_means.len() as f64;
    if !mean.is_finite() {
        return Err(InterestError::InvalidResponse("Non-finite interest value".to_string()));
    }
    Ok(mean)
}
