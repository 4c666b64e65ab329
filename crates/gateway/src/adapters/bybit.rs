use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Deserialize;
use tickerhub_core::{ExchangeId, MarketRecord};
use tracing::{debug, warn};

use super::{ExchangeAdapter, InstrumentMeta, finalize, quote_matches};
use crate::error::FetchError;
use crate::rest::{RestClient, WireDecimal};

const INSTRUMENTS_PATH: &str = "/v5/market/instruments-info";
const TICKERS_PATH: &str = "/v5/market/tickers";
const PAGE_LIMIT: &str = "1000";
/// Hard stop for upstream pagination that never terminates
const MAX_PAGES: usize = 500;

/// Bybit v5 envelope; `retCode` is 0 on success
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    ret_code: i64,
    #[serde(default)]
    ret_msg: String,
    result: Option<T>,
}

impl<T: Default> Envelope<T> {
    fn into_result(self) -> Result<T, FetchError> {
        if self.ret_code != 0 {
            return Err(FetchError::Api {
                exchange: ExchangeId::Bybit,
                message: format!("retCode {}: {}", self.ret_code, self.ret_msg),
            });
        }
        Ok(self.result.unwrap_or_default())
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct InstrumentPage {
    #[serde(default)]
    list: Vec<Instrument>,
    #[serde(default)]
    next_page_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instrument {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    base_coin: String,
    #[serde(default)]
    quote_coin: String,
}

#[derive(Deserialize, Default)]
struct TickerList {
    #[serde(default)]
    list: Vec<Ticker>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    last_price: WireDecimal,
    #[serde(default)]
    bid1_price: WireDecimal,
    #[serde(default)]
    ask1_price: WireDecimal,
}

/// Bybit spot: cursor-paginated instruments, tickers in one call
pub struct BybitAdapter {
    rest: RestClient,
}

impl BybitAdapter {
    pub fn new(rest: RestClient) -> Self {
        BybitAdapter { rest }
    }

    /// Walk instrument pages until the cursor runs out or repeats
    async fn fetch_instruments(
        &self,
        quote_filter: Option<&str>,
    ) -> Result<HashMap<String, InstrumentMeta>, FetchError> {
        let mut active = HashMap::new();
        let mut visited = HashSet::new();
        let mut cursor: Option<String> = None;

        for page in 0..MAX_PAGES {
            let mut query = vec![("category", "spot"), ("limit", PAGE_LIMIT)];
            if let Some(c) = cursor.as_deref() {
                query.push(("cursor", c));
            }

            let envelope: Envelope<InstrumentPage> = self.rest.get(INSTRUMENTS_PATH, &query).await?;
            let result = envelope.into_result()?;

            for inst in result.list {
                if inst.status != "Trading" || inst.symbol.is_empty() {
                    continue;
                }
                if !quote_matches(quote_filter, &inst.quote_coin) {
                    continue;
                }
                active.insert(
                    inst.symbol,
                    InstrumentMeta {
                        base_asset: inst.base_coin,
                        quote_asset: inst.quote_coin,
                    },
                );
            }

            match result.next_page_cursor.filter(|c| !c.is_empty()) {
                Some(next) if visited.insert(next.clone()) => cursor = Some(next),
                Some(next) => {
                    debug!(cursor = %next, pages = page + 1, "bybit cursor repeated, stopping");
                    return Ok(active);
                }
                None => return Ok(active),
            }
        }

        warn!(max_pages = MAX_PAGES, "bybit pagination did not terminate");
        Ok(active)
    }

    async fn fetch_tickers(&self) -> Result<Vec<Ticker>, FetchError> {
        let envelope: Envelope<TickerList> =
            self.rest.get(TICKERS_PATH, &[("category", "spot")]).await?;
        Ok(envelope.into_result()?.list)
    }
}

#[async_trait]
impl ExchangeAdapter for BybitAdapter {
    fn exchange(&self) -> ExchangeId {
        ExchangeId::Bybit
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        let (active, tickers) =
            tokio::try_join!(self.fetch_instruments(quote_filter), self.fetch_tickers())?;

        let records = tickers.into_iter().filter_map(|t| {
            let meta = active.get(&t.symbol)?;
            Some(MarketRecord::new(
                t.symbol,
                meta.base_asset.clone(),
                meta.quote_asset.clone(),
                t.last_price.decimal(),
                t.bid1_price.decimal(),
                t.ask1_price.decimal(),
            ))
        });

        Ok(finalize(records, max_pairs))
    }
}
