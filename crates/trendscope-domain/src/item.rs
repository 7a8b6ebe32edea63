//! Item module - the content unit the engine consumes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only accepted date layout at the engine boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source recorded for items whose collector did not name one
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Errors raised when a collector hands over a malformed item
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A required field was absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A required field was present but blank
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),

    /// The date did not parse as YYYY-MM-DD
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected value
        value: String,
    },
}

/// An item exactly as an upstream collector delivered it
///
/// Every field is optional so a whole batch can be deserialized before the
/// individual items are validated with [`Item::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Headline text
    #[serde(default)]
    pub title: Option<String>,

    /// Publish date, expected as YYYY-MM-DD
    #[serde(default)]
    pub date: Option<String>,

    /// Origin feed or platform
    #[serde(default)]
    pub source: Option<String>,

    /// Opaque external identifier
    #[serde(default)]
    pub url: Option<String>,
}

impl RawItem {
    /// Short description used when logging a rejected item
    pub fn describe(&self) -> String {
        match (&self.url, &self.title) {
            (Some(url), _) if !url.trim().is_empty() => url.clone(),
            (_, Some(title)) if !title.trim().is_empty() => format!("\"{}\"", title),
            _ => "<unidentified item>".to_string(),
        }
    }
}

/// A validated, immutable content item
///
/// Items are created once at ingestion and read by the engine without
/// modification. The url is treated as an opaque identifier and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct Item {
    title: String,
    date: NaiveDate,
    source: String,
    url: String,
}

impl Item {
    /// Create a new item from already-typed parts
    ///
    /// # Errors
    /// Returns an error if the title or url is blank
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use trendscope_domain::Item;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let item = Item::new("Earthquake strikes region", date, "wire", "https://a.example/1").unwrap();
    /// assert_eq!(item.source(), "wire");
    /// ```
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, InputError> {
        let title = title.into().trim().to_string();
        let url = url.into().trim().to_string();
        let source = source.into().trim().to_string();

        if title.is_empty() {
            return Err(InputError::EmptyField("title"));
        }
        if url.is_empty() {
            return Err(InputError::EmptyField("url"));
        }

        let source = if source.is_empty() {
            UNKNOWN_SOURCE.to_string()
        } else {
            source
        };

        Ok(Self { title, date, source, url })
    }

    /// Validate a collector record against the strict ingestion contract
    ///
    /// Title, date and url are required. A missing source is recorded as
    /// `"unknown"`. Dates must already be normalized to YYYY-MM-DD; format
    /// guessing belongs to the collector.
    pub fn from_raw(raw: RawItem) -> Result<Self, InputError> {
        let title = raw.title.ok_or(InputError::MissingField("title"))?;
        let date = raw.date.ok_or(InputError::MissingField("date"))?;
        let url = raw.url.ok_or(InputError::MissingField("url"))?;

        let date = parse_date(&date)?;

        Self::new(title, date, raw.source.unwrap_or_default(), url)
    }

    /// Headline text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publish date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Origin feed or platform
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Opaque external identifier
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TryFrom<RawItem> for Item {
    type Error = InputError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        Item::from_raw(raw)
    }
}

/// Parse a date in the strict YYYY-MM-DD layout
pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField("date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| InputError::InvalidDate {
        value: value.to_string(),
    })
}
