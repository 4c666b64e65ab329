use thiserror::Error;
use tickerhub_core::{ExchangeId, ValidationError};
use tickerhub_gateway::FetchError;

/// Failure to produce a snapshot.
///
/// `Clone` so a single failed refresh can be handed to every caller
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no adapter registered for {0}")]
    NotRegistered(ExchangeId),

    #[error("{exchange} upstream failure: {source}")]
    Upstream {
        exchange: ExchangeId,
        source: FetchError,
    },

    /// Refresh task ended without producing a result (panic or shutdown)
    #[error("snapshot refresh aborted: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to build snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("webhook delivery failed: {0}")]
    Http(#[from] reqwest::Error),
}
