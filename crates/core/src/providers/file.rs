use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::TrackerError;
use crate::models::history::HistoryRecord;
use super::parse_history;
use super::traits::HistoryProvider;

/// Replays a saved copy of the feed from a local JSON file.
pub struct FileHistoryProvider {
    path: PathBuf,
}

impl FileHistoryProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HistoryProvider for FileHistoryProvider {
    fn name(&self) -> &str {
        "History file"
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, TrackerError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            TrackerError::FileIO(format!("{}: {e}", self.path.display()))
        })?;
        parse_history(&json)
    }
}
