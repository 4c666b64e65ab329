use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tickerhub_core::{ExchangeId, MarketRecord};
use tracing::debug;

use super::{ExchangeAdapter, InstrumentMeta, finalize, quote_matches};
use crate::error::FetchError;
use crate::rest::{RestClient, WireDecimal};

const EXCHANGE_INFO_PATH: &str = "/api/v3/exchangeInfo";
const TICKER_24H_PATH: &str = "/api/v3/ticker/24hr";

#[derive(Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    base_asset: String,
    #[serde(default)]
    quote_asset: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    last_price: WireDecimal,
    #[serde(default)]
    bid_price: WireDecimal,
    #[serde(default)]
    ask_price: WireDecimal,
}

/// Binance spot: exchangeInfo and 24h tickers fetched concurrently
pub struct BinanceAdapter {
    rest: RestClient,
}

impl BinanceAdapter {
    pub fn new(rest: RestClient) -> Self {
        BinanceAdapter { rest }
    }
}

#[async_trait]
impl ExchangeAdapter for BinanceAdapter {
    fn exchange(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        let (info, tickers) = tokio::try_join!(
            self.rest.get::<ExchangeInfo>(EXCHANGE_INFO_PATH, &[]),
            self.rest.get::<Vec<Ticker24h>>(TICKER_24H_PATH, &[]),
        )?;

        let active: HashMap<String, InstrumentMeta> = info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING" && !s.symbol.is_empty())
            .filter(|s| quote_matches(quote_filter, &s.quote_asset))
            .map(|s| {
                let meta = InstrumentMeta {
                    base_asset: s.base_asset,
                    quote_asset: s.quote_asset,
                };
                (s.symbol, meta)
            })
            .collect();

        debug!(
            instruments = active.len(),
            tickers = tickers.len(),
            "binance payloads received"
        );

        let records = tickers.into_iter().filter_map(|t| {
            let meta = active.get(&t.symbol)?;
            Some(MarketRecord::new(
                t.symbol,
                meta.base_asset.clone(),
                meta.quote_asset.clone(),
                t.last_price.decimal(),
                t.bid_price.decimal(),
                t.ask_price.decimal(),
            ))
        });

        Ok(finalize(records, max_pairs))
    }
}
