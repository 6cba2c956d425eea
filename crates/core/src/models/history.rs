use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::TrackerError;

/// One country's standing inside a single history snapshot.
///
/// `percentage` is supplied by the feed as-is; it is not derived from
/// `total_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPoint {
    /// Two-letter country code (e.g., "de", "fr")
    pub country_code: String,

    /// Cumulative number of signatures collected in this country
    pub total_count: u64,

    /// Feed-provided percentage of the country's threshold (0–100 nominal)
    pub percentage: f64,
}

/// One fetched snapshot of the whole feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// When the snapshot was taken
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    /// All countries reported in this snapshot
    #[serde(rename = "data")]
    pub entries: Vec<CountryPoint>,
}

impl HistoryRecord {
    pub fn new(timestamp: DateTime<Utc>, entries: Vec<CountryPoint>) -> Self {
        Self { timestamp, entries }
    }

    /// Sum of every country's `total_count` in this snapshot.
    pub fn total_count(&self) -> Result<u64, TrackerError> {
        self.entries.iter().try_fold(0u64, |sum, e| {
            sum.checked_add(e.total_count).ok_or_else(|| {
                TrackerError::ValidationError(format!(
                    "Signature total overflows at {} ({})",
                    self.timestamp, e.country_code
                ))
            })
        })
    }
}

/// Parse a feed timestamp.
///
/// Accepted forms, in order:
/// - RFC 3339 (`2024-01-02T10:00:00Z`, `2024-01-02T10:00:00+02:00`)
/// - naive date-time (`2024-01-02T10:00:00`, fractional seconds allowed), read as UTC
/// - bare date (`2024-01-02`), read as UTC midnight
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TrackerError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(TrackerError::InvalidTimestamp(raw.to_string()))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
