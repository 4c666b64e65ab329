use thiserror::Error;

use crate::entities::ExchangeId;

/// Client-side input errors. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown exchange '{given}', supported: {}", ExchangeId::supported_list())]
    UnknownExchange { given: String },

    #[error("max_pairs must be at least 1")]
    InvalidMaxPairs,
}
