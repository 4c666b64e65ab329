use serde::Serialize;

use super::{ExchangeId, MarketRecord};
use crate::values::Timestamp;

/// Snapshot of one exchange's markets at a point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub exchange: ExchangeId,
    pub generated_at: Timestamp,
    /// Quote-asset filter that produced this snapshot, if any
    pub quote_asset: Option<String>,
    pub total_pairs: usize,
    pub markets: Vec<MarketRecord>,
}

impl Snapshot {
    pub fn new(
        exchange: ExchangeId,
        generated_at: Timestamp,
        quote_asset: Option<String>,
        markets: Vec<MarketRecord>,
    ) -> Self {
        Snapshot {
            exchange,
            generated_at,
            quote_asset,
            total_pairs: markets.len(),
            markets,
        }
    }

    /// Name of the event pushed to outbound webhooks for this snapshot
    pub fn event_name(&self) -> String {
        format!("{}.market.snapshot", self.exchange)
    }
}

/// Outbound webhook payload: the snapshot plus an event name
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEvent<'a> {
    pub event: String,
    #[serde(flatten)]
    pub snapshot: &'a Snapshot,
}

impl<'a> SnapshotEvent<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        SnapshotEvent {
            event: snapshot.event_name(),
            snapshot,
        }
    }
}
