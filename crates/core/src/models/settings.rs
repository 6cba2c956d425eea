use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::TrackerError;

pub const DEFAULT_HISTORY_URL: &str =
    "https://stopkillinggameshistoricdata.montoria.se/historic-data";

pub const ENV_HISTORY_URL: &str = "PETITION_HISTORY_URL";
pub const ENV_HISTORY_FILE: &str = "PETITION_HISTORY_FILE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "PETITION_REQUEST_TIMEOUT_SECS";
pub const ENV_UTC_OFFSET_MINUTES: &str = "PETITION_UTC_OFFSET_MINUTES";
pub const ENV_RECENT_WINDOW_DAYS: &str = "PETITION_RECENT_WINDOW_DAYS";

/// Runtime configuration for fetching and bucketing the history feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Endpoint returning the full history as a JSON array.
    pub history_url: String,

    /// Local JSON file to read instead of calling `history_url`.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Offset (minutes east of UTC) used to decide which calendar day a
    /// timestamp belongs to.
    pub calendar_utc_offset_minutes: i32,

    /// Width of the "recent" zoom window in days.
    pub recent_window_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_url: DEFAULT_HISTORY_URL.to_string(),
            history_file: None,
            request_timeout_secs: 30,
            calendar_utc_offset_minutes: 0,
            recent_window_days: 30,
        }
    }
}

impl Settings {
    /// Defaults overlaid with any `PETITION_*` environment variables.
    pub fn from_env() -> Result<Self, TrackerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TrackerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(ENV_HISTORY_URL).filter(|v| !v.trim().is_empty()) {
            settings.history_url = url.trim().to_string();
        }
        if let Some(path) = lookup(ENV_HISTORY_FILE).filter(|v| !v.trim().is_empty()) {
            settings.history_file = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            settings.request_timeout_secs = parse_var(ENV_REQUEST_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            settings.calendar_utc_offset_minutes = parse_var(ENV_UTC_OFFSET_MINUTES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RECENT_WINDOW_DAYS) {
            settings.recent_window_days = parse_var(ENV_RECENT_WINDOW_DAYS, &raw)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that cannot be used.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.history_file.is_none() && !self.history_url.starts_with("http") {
            return Err(TrackerError::ValidationError(format!(
                "History URL '{}' must be an http(s) URL",
                self.history_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(TrackerError::ValidationError(
                "Request timeout must be at least 1 second".into(),
            ));
        }
        if self.calendar_offset().is_none() {
            return Err(TrackerError::ValidationError(format!(
                "UTC offset of {} minutes is out of range (must be within ±24h)",
                self.calendar_utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// The calendar offset as a `chrono` time zone.
    pub fn calendar_offset(&self) -> Option<FixedOffset> {
        self.calendar_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, TrackerError> {
    raw.trim().parse().map_err(|_| {
        TrackerError::ValidationError(format!("Invalid value '{raw}' for {key}"))
    })
}
