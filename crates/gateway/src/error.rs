//! Error types for the gateway crate

use thiserror::Error;
use tickerhub_core::ExchangeId;

/// Domain error for snapshot fetching.
///
/// Infrastructure failures are converted into this type so callers never
/// see reqwest details. `Clone` because one failed fetch may be handed to
/// several waiters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network or transport failure (connect, timeout, TLS)
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success HTTP status
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream answered 2xx but flagged an error inside the payload
    #[error("{exchange} API error: {message}")]
    Api {
        exchange: ExchangeId,
        message: String,
    },

    /// Response did not have the expected top-level shape
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Infrastructure error raised by [`RestClient`](crate::RestClient)
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

impl From<RestError> for FetchError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => FetchError::Network(e.to_string()),
            RestError::Status { status, body, .. } => FetchError::Status { status, body },
            RestError::Parse { path, reason } => FetchError::Parse(format!("{path}: {reason}")),
        }
    }
}
