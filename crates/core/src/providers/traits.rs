use async_trait::async_trait;

use crate::errors::TrackerError;
use crate::models::history::HistoryRecord;

/// Trait abstraction for every source of the signature history.
///
/// The live feed and an offline replay file both implement this; the rest of
/// the pipeline only sees a list of `HistoryRecord`s.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HistoryProvider: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the full history, in whatever order the source returns it.
    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, TrackerError>;
}
