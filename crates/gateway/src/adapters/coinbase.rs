use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;
use tickerhub_core::{ExchangeId, MarketRecord};
use tokio::sync::Semaphore;
use tracing::debug;

use super::{ExchangeAdapter, finalize, quote_matches};
use crate::error::{FetchError, RestError};
use crate::rest::{RestClient, WireDecimal};

const PRODUCTS_PATH: &str = "/products";
const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(250);
const TOO_MANY_REQUESTS: u16 = 429;

#[derive(Deserialize)]
struct Product {
    #[serde(default)]
    id: String,
    #[serde(default)]
    base_currency: String,
    #[serde(default)]
    quote_currency: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    trading_disabled: bool,
}

#[derive(Deserialize)]
struct Ticker {
    #[serde(default)]
    price: WireDecimal,
    #[serde(default)]
    bid: WireDecimal,
    #[serde(default)]
    ask: WireDecimal,
}

/// Coinbase Exchange: product list, then one ticker call per product
/// behind a concurrency gate. Products whose ticker cannot be fetched
/// are left out of the snapshot.
pub struct CoinbaseAdapter {
    rest: RestClient,
    concurrency: usize,
}

impl CoinbaseAdapter {
    pub fn new(rest: RestClient, concurrency: usize) -> Self {
        CoinbaseAdapter {
            rest,
            concurrency: concurrency.max(1),
        }
    }

    async fn fetch_ticker(&self, gate: &Semaphore, product: &Product) -> Option<MarketRecord> {
        let path = format!("{}/{}/ticker", PRODUCTS_PATH, product.id);

        for attempt in 0..2 {
            let result = {
                let _permit = gate.acquire().await.ok()?;
                self.rest.get::<Ticker>(&path, &[]).await
            };

            match result {
                Ok(ticker) => {
                    return Some(MarketRecord::new(
                        product.id.clone(),
                        product.base_currency.clone(),
                        product.quote_currency.clone(),
                        ticker.price.decimal(),
                        ticker.bid.decimal(),
                        ticker.ask.decimal(),
                    ));
                }
                Err(RestError::Status { status, .. })
                    if status == TOO_MANY_REQUESTS && attempt == 0 =>
                {
                    tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                }
                Err(e) => {
                    debug!(product = %product.id, error = %e, "coinbase ticker dropped");
                    return None;
                }
            }
        }

        None
    }
}

#[async_trait]
impl ExchangeAdapter for CoinbaseAdapter {
    fn exchange(&self) -> ExchangeId {
        ExchangeId::Coinbase
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        let products: Vec<Product> = self.rest.get(PRODUCTS_PATH, &[]).await?;

        let mut products: Vec<Product> = products
            .into_iter()
            .filter(|p| p.status == "online" && !p.trading_disabled && !p.id.is_empty())
            .filter(|p| quote_matches(quote_filter, &p.quote_currency))
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(limit) = max_pairs {
            products.truncate(limit);
        }

        let gate = Semaphore::new(self.concurrency);
        let results = join_all(products.iter().map(|p| self.fetch_ticker(&gate, p))).await;

        let requested = products.len();
        let records: Vec<MarketRecord> = results.into_iter().flatten().collect();
        debug!(
            requested,
            received = records.len(),
            "coinbase tickers gathered"
        );

        Ok(finalize(records, max_pairs))
    }
}
