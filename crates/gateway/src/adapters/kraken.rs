use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tickerhub_core::{ExchangeId, MarketRecord};
use tracing::debug;

use super::{ExchangeAdapter, finalize, quote_matches};
use crate::error::FetchError;
use crate::rest::{RestClient, WireDecimal};

const ASSET_PAIRS_PATH: &str = "/0/public/AssetPairs";
const TICKER_PATH: &str = "/0/public/Ticker";

/// Kraken envelope; a non-empty `error` array means failure
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default = "HashMap::new")]
    result: HashMap<String, T>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<HashMap<String, T>, FetchError> {
        if !self.error.is_empty() {
            return Err(FetchError::Api {
                exchange: ExchangeId::Kraken,
                message: self.error.join("; "),
            });
        }
        Ok(self.result)
    }
}

#[derive(Deserialize)]
struct AssetPair {
    #[serde(default)]
    wsname: Option<String>,
    #[serde(default)]
    status: String,
}

/// Ticker fields are arrays whose first element is the price
#[derive(Deserialize, Clone)]
struct Ticker {
    #[serde(default)]
    a: Vec<WireDecimal>,
    #[serde(default)]
    b: Vec<WireDecimal>,
    #[serde(default)]
    c: Vec<WireDecimal>,
}

fn first(levels: &[WireDecimal]) -> rust_decimal::Decimal {
    levels.first().copied().unwrap_or_default().decimal()
}

struct Pair {
    key: String,
    symbol: String,
    base_asset: String,
    quote_asset: String,
}

/// Kraken spot: asset pairs first, then tickers in sequential batches
pub struct KrakenAdapter {
    rest: RestClient,
    batch_size: usize,
}

impl KrakenAdapter {
    pub fn new(rest: RestClient, batch_size: usize) -> Self {
        KrakenAdapter {
            rest,
            batch_size: batch_size.max(1),
        }
    }

    async fn fetch_pairs(&self, quote_filter: Option<&str>) -> Result<Vec<Pair>, FetchError> {
        let envelope: Envelope<AssetPair> = self.rest.get(ASSET_PAIRS_PATH, &[]).await?;

        let mut pairs: Vec<Pair> = envelope
            .into_result()?
            .into_iter()
            .filter(|(_, info)| info.status == "online")
            .filter_map(|(key, info)| {
                let wsname = info.wsname?;
                let (base, quote) = wsname.split_once('/')?;
                if !quote_matches(quote_filter, quote) {
                    return None;
                }
                Some(Pair {
                    key,
                    symbol: format!("{base}{quote}"),
                    base_asset: base.to_string(),
                    quote_asset: quote.to_string(),
                })
            })
            .collect();

        pairs.sort_by(|a, b| a.symbol.cmp(&b.symbol).then_with(|| a.key.cmp(&b.key)));
        Ok(pairs)
    }

    /// Tickers indexed by the echoed key and by its prefix before '.'
    async fn fetch_tickers(&self, pairs: &[Pair]) -> Result<HashMap<String, Ticker>, FetchError> {
        let mut by_key = HashMap::with_capacity(pairs.len());

        for batch in pairs.chunks(self.batch_size) {
            let names = batch
                .iter()
                .map(|p| p.key.as_str())
                .collect::<Vec<_>>()
                .join(",");

            let envelope: Envelope<Ticker> =
                self.rest.get(TICKER_PATH, &[("pair", names.as_str())]).await?;

            for (key, ticker) in envelope.into_result()? {
                if let Some((prefix, _)) = key.split_once('.') {
                    by_key.insert(prefix.to_string(), ticker.clone());
                }
                by_key.insert(key, ticker);
            }
        }

        Ok(by_key)
    }
}

#[async_trait]
impl ExchangeAdapter for KrakenAdapter {
    fn exchange(&self) -> ExchangeId {
        ExchangeId::Kraken
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        let mut pairs = self.fetch_pairs(quote_filter).await?;
        // Cut before fanning out so the limit bounds upstream calls too
        if let Some(limit) = max_pairs {
            pairs.truncate(limit);
        }

        let tickers = self.fetch_tickers(&pairs).await?;
        debug!(pairs = pairs.len(), tickers = tickers.len(), "kraken payloads received");

        let records = pairs.into_iter().filter_map(|pair| {
            let ticker = tickers.get(&pair.key)?;
            Some(MarketRecord::new(
                pair.symbol,
                pair.base_asset,
                pair.quote_asset,
                first(&ticker.c),
                first(&ticker.b),
                first(&ticker.a),
            ))
        });

        Ok(finalize(records, max_pairs))
    }
}
