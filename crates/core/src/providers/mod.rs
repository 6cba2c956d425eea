pub mod file;
pub mod http;
pub mod traits;

use crate::errors::TrackerError;
use crate::models::history::HistoryRecord;
use crate::models::settings::Settings;
use file::FileHistoryProvider;
use http::HttpHistoryProvider;
use traits::HistoryProvider;

/// Parse the feed's JSON: an array of `{ timestamp, data: [...] }` objects.
pub fn parse_history(json: &str) -> Result<Vec<HistoryRecord>, TrackerError> {
    Ok(serde_json::from_str(json)?)
}

/// The configured history source: the local file if one is set, else the HTTP feed.
pub fn provider_from_settings(settings: &Settings) -> Box<dyn HistoryProvider> {
    match &settings.history_file {
        Some(path) => Box::new(FileHistoryProvider::new(path.clone())),
        None => Box::new(HttpHistoryProvider::new(
            settings.history_url.clone(),
            settings.request_timeout_secs,
        )),
    }
}
