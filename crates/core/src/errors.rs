use thiserror::Error;

/// Unified error type for the petition-tracker-core library.
/// Every fallible public function returns `Result<T, TrackerError>`.
#[derive(Debug, Error)]
pub enum TrackerError {
    // ── History source / Network ────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("History source error ({source_name}): {message}")]
    Api {
        source_name: String,
        message: String,
    },

    // ── Data shape ──────────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("History is empty — no records to compare")]
    EmptyHistory,

    // ── File I/O (offline history replay) ───────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for TrackerError {
    fn from(e: std::io::Error) -> Self {
        TrackerError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query strings from any URL in the message.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        TrackerError::Network(sanitized)
    }
}
