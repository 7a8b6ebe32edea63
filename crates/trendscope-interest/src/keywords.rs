//! Keyword extraction for search-interest queries

use trendscope_domain::traits::{KeywordStrategy, MAX_KEYWORDS};

/// Default number of keywords sent per cluster
pub const DEFAULT_MAX_KEYWORDS: usize = MAX_KEYWORDS;

/// Default minimum keyword length (words longer than 4 characters)
pub const DEFAULT_MIN_LEN: usize = 5;

/// Picks long, purely alphabetic words from cluster titles
///
/// Titles are split on whitespace. A token qualifies when every character is
/// alphabetic and it has at least `min_len` characters, so `"region,"` does not
/// qualify while `"region"` does. Duplicates are dropped keeping the first
/// occurrence, and at most `max_keywords` are returned, in title order. The
/// limit never exceeds [`MAX_KEYWORDS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongWordKeywords {
    /// Minimum character count for a keyword
    pub min_len: usize,
    /// Maximum keywords returned
    pub max_keywords: usize,
}

impl LongWordKeywords {
    /// Create a strategy with explicit limits
    ///
    /// `max_keywords` is capped at [`MAX_KEYWORDS`].
    pub fn new(min_len: usize, max_keywords: usize) -> Self {
        Self {
            min_len,
            max_keywords: max_keywords.min(MAX_KEYWORDS),
        }
    }
}

impl Default for LongWordKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LEN, DEFAULT_MAX_KEYWORDS)
    }
}

impl KeywordStrategy for LongWordKeywords {
    fn keywords(&self, titles: &[&str]) -> Vec<String> {
        let limit = self.max_keywords.min(MAX_KEYWORDS);
        let mut keywords: Vec<String> = Vec::new();

        for word in titles.iter().flat_map(|title| title.split_whitespace()) {
            if keywords.len() >= limit {
                break;
            }
            let qualifies = word.chars().all(char::is_alphabetic)
                && word.chars().count() >= self.min_len;
            if qualifies && !keywords.iter().any(|k| k == word) {
                keywords.push(word.to_string());
            }
        }

        keywords
    }
}
