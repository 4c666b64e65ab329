//! Request and response bodies

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tickerhub_core::{Snapshot, Timestamp};

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

/// GET /exchanges
#[derive(Debug, Serialize)]
pub struct ExchangesResponse {
    pub exchanges: Vec<&'static str>,
}

/// Cached snapshot serialized without copying it out of the cache
#[derive(Debug)]
pub struct SnapshotResponse(pub Arc<Snapshot>);

impl Serialize for SnapshotResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            msg: msg.into(),
        }
    }
}
