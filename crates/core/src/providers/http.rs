use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::TrackerError;
use crate::models::history::HistoryRecord;
use super::parse_history;
use super::traits::HistoryProvider;

/// Fetches the history with a single `GET` to a fixed endpoint.
///
/// - **No auth**, no query parameters, no pagination.
/// - **No retry**: a failed request is returned as-is to the caller.
pub struct HttpHistoryProvider {
    client: Client,
    url: String,
}

impl HttpHistoryProvider {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HistoryProvider for HttpHistoryProvider {
    fn name(&self) -> &str {
        "HTTP feed"
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, TrackerError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrackerError::Api {
                source_name: self.name().into(),
                message: format!("Unexpected status {status}"),
            });
        }

        let body = resp.text().await?;
        debug!(bytes = body.len(), "received history body");

        parse_history(&body).map_err(|e| TrackerError::Api {
            source_name: self.name().into(),
            message: format!("Failed to parse history: {e}"),
        })
    }
}
