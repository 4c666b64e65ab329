//! Tickerhub Core Domain
//!
//! Pure domain types for the tickerhub market snapshot aggregator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod assets;
pub mod entities;
pub mod error;
pub mod request;
pub mod values;

// Re-export commonly used types at crate root
pub use assets::{TOP_ASSETS, filter_top_assets, is_top_asset};
pub use entities::{ExchangeId, MarketRecord, Snapshot, SnapshotEvent};
pub use error::ValidationError;
pub use request::{SnapshotDefaults, SnapshotKey, SnapshotRequest};
pub use values::{Price, Timestamp, parse_decimal};
