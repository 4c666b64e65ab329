use std::time::Duration;

use tickerhub_core::{ExchangeId, SnapshotRequest};

/// Freshness windows for [`SnapshotCache`](crate::SnapshotCache).
///
/// Both windows are measured from entry creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl: Duration,
    stale_while_revalidate: Duration,
}

impl CacheConfig {
    pub const MIN_TTL: Duration = Duration::from_secs(1);

    /// TTL is clamped to at least [`Self::MIN_TTL`]
    pub fn new(ttl: Duration, stale_while_revalidate: Duration) -> Self {
        CacheConfig {
            ttl: ttl.max(Self::MIN_TTL),
            stale_while_revalidate,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stale_while_revalidate(&self) -> Duration {
        self.stale_while_revalidate
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::new(Duration::from_secs(20), Duration::from_secs(120))
    }
}

/// What the outbound notifier builds and where it sends it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub url: String,
    pub exchange: ExchangeId,
    /// Unset fields resolve to the builder's defaults
    pub request: SnapshotRequest,
    pub interval: Duration,
    pub timeout: Duration,
}

impl NotifierConfig {
    pub fn new(url: impl Into<String>, exchange: ExchangeId) -> Self {
        NotifierConfig {
            url: url.into(),
            exchange,
            request: SnapshotRequest::default(),
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(15),
        }
    }
}
