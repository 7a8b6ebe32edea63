//! Offline interest providers
//!
//! `StaticInterestProvider` answers every query with one value and is what
//! the engine runs with when no interest service is configured.
//! `MockInterestProvider` returns pre-configured answers per keyword set and
//! can be told to fail, which lets tests exercise the fallback path.

use crate::InterestError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use trendscope_domain::traits::SearchInterestProvider;

/// Neutral interest on the provider's 0-100 scale
pub const NEUTRAL_INTEREST: f64 = 50.0;

/// Provider that answers every query with the same value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticInterestProvider {
    value: f64,
}

impl StaticInterestProvider {
    /// Always answer `value` (0-100 scale)
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Always answer the neutral 50
    pub fn neutral() -> Self {
        Self::new(NEUTRAL_INTEREST)
    }
}

impl Default for StaticInterestProvider {
    fn default() -> Self {
        Self::neutral()
    }
}

impl SearchInterestProvider for StaticInterestProvider {
    type Error = InterestError;

    fn mean_interest(
        &self,
        _keywords: &[String],
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<f64, Self::Error> {
        Ok(self.value)
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Value(f64),
    Timeout,
}

/// Scripted provider for deterministic testing
///
/// Answers are keyed by the comma-joined keyword list. Unknown keyword sets
/// get the default answer.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trendscope_domain::traits::SearchInterestProvider;
/// use trendscope_interest::MockInterestProvider;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let mut provider = MockInterestProvider::new(20.0);
/// provider.add_response(&["storm"], 90.0);
///
/// assert_eq!(provider.mean_interest(&["storm".to_string()], day, day).unwrap(), 90.0);
/// assert_eq!(provider.mean_interest(&["other".to_string()], day, day).unwrap(), 20.0);
///
/// let failing = MockInterestProvider::always_timeout();
/// assert!(failing.mean_interest(&["storm".to_string()], day, day).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockInterestProvider {
    default_response: Scripted,
    responses: Arc<Mutex<HashMap<String, Scripted>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockInterestProvider {
    /// Create a mock answering `value` for unknown keyword sets
    pub fn new(value: f64) -> Self {
        Self::with_default(Scripted::Value(value))
    }

    /// Create a mock that times out on every call
    pub fn always_timeout() -> Self {
        Self::with_default(Scripted::Timeout)
    }

    fn with_default(default_response: Scripted) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Answer `value` for exactly this keyword list
    pub fn add_response(&mut self, keywords: &[&str], value: f64) {
        lock(&self.responses).insert(keywords.join(","), Scripted::Value(value));
    }

    /// Time out for exactly this keyword list
    pub fn add_timeout(&mut self, keywords: &[&str]) {
        lock(&self.responses).insert(keywords.join(","), Scripted::Timeout);
    }

    /// Get the number of times the provider was queried
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }
}

impl Default for MockInterestProvider {
    fn default() -> Self {
        Self::new(NEUTRAL_INTEREST)
    }
}

impl SearchInterestProvider for MockInterestProvider {
    type Error = InterestError;

    fn mean_interest(
        &self,
        keywords: &[String],
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<f64, Self::Error> {
        *lock(&self.call_count) += 1;

        let scripted = lock(&self.responses)
            .get(&keywords.join(","))
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        match scripted {
            Scripted::Value(value) => Ok(value),
            Scripted::Timeout => Err(InterestError::Timeout),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticInterestProvider::new(73.0);
        assert_eq!(provider.mean_interest(&kw(&["x"]), day(), day()).unwrap(), 73.0);
        assert_eq!(StaticInterestProvider::default().value, NEUTRAL_INTEREST);
    }

    #[test]
    fn test_mock_specific_responses() {
        let mut provider = MockInterestProvider::default();
        provider.add_response(&["storm", "coast"], 80.0);
        provider.add_timeout(&["market"]);

        assert_eq!(provider.mean_interest(&kw(&["storm", "coast"]), day(), day()).unwrap(), 80.0);
        assert!(matches!(
            provider.mean_interest(&kw(&["market"]), day(), day()),
            Err(InterestError::Timeout)
        ));
        assert_eq!(provider.mean_interest(&kw(&["other"]), day(), day()).unwrap(), NEUTRAL_INTEREST);
    }

    #[test]
    fn test_mock_call_count_shared_between_clones() {
        let provider = MockInterestProvider::always_timeout();
        let clone = provider.clone();

        let _ = provider.mean_interest(&kw(&["a"]), day(), day());
        let _ = clone.mean_interest(&kw(&["b"]), day(), day());

        assert_eq!(provider.call_count(), 2);
        assert_eq!(clone.call_count(), 2);
    }
}
