use sceneflow_core::types::RecordId;

/// Errors from the sync layer and the gateway HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned an error body.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The gateway's `error` message.
        message: String,
        /// The gateway's machine-readable `code`, when present.
        code: Option<String>,
    },

    /// The requested record does not exist (or is not visible to the
    /// caller).
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Establishing the change-stream connection failed.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl ClientError {
    /// The gateway's machine-readable error code, when one was returned.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
