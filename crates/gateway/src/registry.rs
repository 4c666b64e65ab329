use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Client;
use tickerhub_core::ExchangeId;

use crate::adapters::{
    BinanceAdapter, BybitAdapter, CoinbaseAdapter, ExchangeAdapter, KrakenAdapter, OkxAdapter,
};
use crate::config::GatewayConfig;
use crate::error::RestError;
use crate::rest::{RestClient, build_http_client};

/// Build the concrete adapter for `exchange`
pub fn create_adapter(
    exchange: ExchangeId,
    config: &GatewayConfig,
    client: &Client,
) -> Arc<dyn ExchangeAdapter> {
    let rest = RestClient::new(client.clone(), config.base_url(exchange));
    match exchange {
        ExchangeId::Binance => Arc::new(BinanceAdapter::new(rest)),
        ExchangeId::Bybit => Arc::new(BybitAdapter::new(rest)),
        ExchangeId::Okx => Arc::new(OkxAdapter::new(rest)),
        ExchangeId::Kraken => Arc::new(KrakenAdapter::new(rest, config.kraken_batch_size)),
        ExchangeId::Coinbase => Arc::new(CoinbaseAdapter::new(rest, config.coinbase_concurrency)),
    }
}

/// Exchange identifier to adapter lookup
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<ExchangeId, Arc<dyn ExchangeAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One adapter per supported exchange, sharing a pooled client
    pub fn from_config(config: &GatewayConfig) -> Result<Self, RestError> {
        let client = build_http_client(config.request_timeout)?;
        let mut registry = Self::new();
        for exchange in ExchangeId::ALL {
            registry.register(create_adapter(exchange, config, &client));
        }
        Ok(registry)
    }

    /// Register under the adapter's own exchange id, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn ExchangeAdapter>) {
        self.adapters.insert(adapter.exchange(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn ExchangeAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, exchange: ExchangeId) -> Option<Arc<dyn ExchangeAdapter>> {
        self.adapters.get(&exchange).cloned()
    }

    /// Registered exchanges in listing order
    pub fn exchanges(&self) -> Vec<ExchangeId> {
        self.adapters.keys().copied().collect()
    }
}
