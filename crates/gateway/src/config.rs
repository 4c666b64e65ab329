use std::time::Duration;
use tickerhub_core::ExchangeId;

/// Upstream endpoints and fan-out limits for the exchange adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub binance_base_url: String,
    pub bybit_base_url: String,
    pub okx_base_url: String,
    pub kraken_base_url: String,
    pub coinbase_base_url: String,
    /// Per-request timeout applied by the shared HTTP client
    pub request_timeout: Duration,
    /// Pairs per Kraken `/0/public/Ticker` call
    pub kraken_batch_size: usize,
    /// Concurrent Coinbase ticker requests in flight
    pub coinbase_concurrency: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            binance_base_url: "https://api.binance.com".to_string(),
            bybit_base_url: "https://api.bybit.com".to_string(),
            okx_base_url: "https://www.okx.com".to_string(),
            kraken_base_url: "https://api.kraken.com".to_string(),
            coinbase_base_url: "https://api.exchange.coinbase.com".to_string(),
            request_timeout: Duration::from_secs(20),
            kraken_batch_size: 40,
            coinbase_concurrency: 15,
        }
    }
}

impl GatewayConfig {
    pub fn base_url(&self, exchange: ExchangeId) -> &str {
        match exchange {
            ExchangeId::Binance => &self.binance_base_url,
            ExchangeId::Bybit => &self.bybit_base_url,
            ExchangeId::Okx => &self.okx_base_url,
            ExchangeId::Kraken => &self.kraken_base_url,
            ExchangeId::Coinbase => &self.coinbase_base_url,
        }
    }

    /// Point every exchange at the same base URL (stub servers in tests)
    pub fn with_all_base_urls(mut self, base_url: &str) -> Self {
        for url in [
            &mut self.binance_base_url,
            &mut self.bybit_base_url,
            &mut self.okx_base_url,
            &mut self.kraken_base_url,
            &mut self.coinbase_base_url,
        ] {
            *url = base_url.to_string();
        }
        self
    }
}
