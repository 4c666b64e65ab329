use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tickerhub_core::{ExchangeId, MarketRecord};
use tracing::debug;

use super::{ExchangeAdapter, InstrumentMeta, finalize, quote_matches};
use crate::error::FetchError;
use crate::rest::{RestClient, WireDecimal};

const INSTRUMENTS_PATH: &str = "/api/v5/public/instruments";
const TICKERS_PATH: &str = "/api/v5/market/tickers";
const SPOT: [(&str, &str); 1] = [("instType", "SPOT")];

/// OKX response envelope; `code` is "0" on success
#[derive(Deserialize)]
struct Envelope<T> {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<Vec<T>, FetchError> {
        if self.code != "0" {
            return Err(FetchError::Api {
                exchange: ExchangeId::Okx,
                message: format!("code {}: {}", self.code, self.msg),
            });
        }
        Ok(self.data)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instrument {
    #[serde(default)]
    inst_id: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    base_ccy: String,
    #[serde(default)]
    quote_ccy: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    #[serde(default)]
    inst_id: String,
    #[serde(default)]
    last: WireDecimal,
    #[serde(default)]
    bid_px: WireDecimal,
    #[serde(default)]
    ask_px: WireDecimal,
}

/// OKX spot: instruments and tickers fetched concurrently
pub struct OkxAdapter {
    rest: RestClient,
}

impl OkxAdapter {
    pub fn new(rest: RestClient) -> Self {
        OkxAdapter { rest }
    }
}

#[async_trait]
impl ExchangeAdapter for OkxAdapter {
    fn exchange(&self) -> ExchangeId {
        ExchangeId::Okx
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        let (instruments, tickers) = tokio::try_join!(
            self.rest.get::<Envelope<Instrument>>(INSTRUMENTS_PATH, &SPOT),
            self.rest.get::<Envelope<Ticker>>(TICKERS_PATH, &SPOT),
        )?;
        let instruments = instruments.into_data()?;
        let tickers = tickers.into_data()?;

        let active: HashMap<String, InstrumentMeta> = instruments
            .into_iter()
            .filter(|i| i.state == "live" && !i.inst_id.is_empty())
            .filter(|i| quote_matches(quote_filter, &i.quote_ccy))
            .map(|i| {
                let meta = InstrumentMeta {
                    base_asset: i.base_ccy,
                    quote_asset: i.quote_ccy,
                };
                (i.inst_id, meta)
            })
            .collect();

        debug!(instruments = active.len(), tickers = tickers.len(), "okx payloads received");

        let records = tickers.into_iter().filter_map(|t| {
            let meta = active.get(&t.inst_id)?;
            Some(MarketRecord::new(
                t.inst_id,
                meta.base_asset.clone(),
                meta.quote_asset.clone(),
                t.last.decimal(),
                t.bid_px.decimal(),
                t.ask_px.decimal(),
            ))
        });

        Ok(finalize(records, max_pairs))
    }
}
