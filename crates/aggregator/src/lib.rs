//! Tickerhub Aggregator
//!
//! Turns exchange adapter output into cached, servable snapshots.
//!
//! ```text
//! request ──► SnapshotCache ──(miss/stale)──► SnapshotBuilder ──► ExchangeAdapter
//!                  ▲                                 │
//!                  └───────── Arc<Snapshot> ◄────────┘
//!
//! OutboundNotifier ──(every interval)──► SnapshotBuilder ──► POST webhook
//! ```
//!
//! - [`SnapshotBuilder`]: one adapter call plus allow-list filtering and limits
//! - [`SnapshotCache`]: TTL + stale-while-revalidate with single-flight refresh
//! - [`OutboundNotifier`]: periodic push of a snapshot to an external URL

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod notifier;

pub use builder::SnapshotBuilder;
pub use cache::SnapshotCache;
pub use config::{CacheConfig, NotifierConfig};
pub use error::{NotifyError, SnapshotError};
pub use notifier::OutboundNotifier;
