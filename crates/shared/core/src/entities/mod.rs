mod exchange;
mod market;
mod snapshot;

pub use exchange::ExchangeId;
pub use market::MarketRecord;
pub use snapshot::{Snapshot, SnapshotEvent};
