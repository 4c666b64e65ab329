//! Exchange adapters
//!
//! One adapter per exchange. Each pulls instrument metadata and tickers
//! from the exchange's public REST API, joins them by symbol and returns
//! normalized [`MarketRecord`]s sorted by symbol.

mod binance;
mod bybit;
mod coinbase;
mod kraken;
mod okx;

pub use binance::BinanceAdapter;
pub use bybit::BybitAdapter;
pub use coinbase::CoinbaseAdapter;
pub use kraken::KrakenAdapter;
pub use okx::OkxAdapter;

use std::collections::BTreeMap;

use async_trait::async_trait;
use tickerhub_core::{ExchangeId, MarketRecord};

use crate::error::FetchError;

/// Fetches a normalized market snapshot from one exchange
///
/// Implementations must return records sorted by symbol ascending, with
/// inactive instruments and orphan tickers dropped, truncated to
/// `max_pairs` when given.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    fn exchange(&self) -> ExchangeId;

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError>;
}

/// Base and quote asset of an active instrument, keyed by symbol
#[derive(Debug, Clone)]
pub(crate) struct InstrumentMeta {
    pub base_asset: String,
    pub quote_asset: String,
}

/// Case-insensitive exact match against the traded quote currency
pub(crate) fn quote_matches(quote_filter: Option<&str>, quote_asset: &str) -> bool {
    match quote_filter {
        Some(filter) => quote_asset.eq_ignore_ascii_case(filter.trim()),
        None => true,
    }
}

/// Sort by symbol, drop duplicate symbols, then cut to `max_pairs`
pub(crate) fn finalize(
    records: impl IntoIterator<Item = MarketRecord>,
    max_pairs: Option<usize>,
) -> Vec<MarketRecord> {
    let by_symbol: BTreeMap<String, MarketRecord> = records
        .into_iter()
        .map(|record| (record.symbol().to_string(), record))
        .collect();

    let mut records: Vec<MarketRecord> = by_symbol.into_values().collect();
    if let Some(limit) = max_pairs {
        records.truncate(limit);
    }
    records
}
