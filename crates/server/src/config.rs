//! Service configuration
//!
//! Three layers, later ones winning:
//! 1. built-in defaults
//! 2. optional JSON file (`--config <path>`), keys named like the fields
//! 3. environment variables (`PORT`, `BINANCE_BASE_URL`, ...)
//!
//! Empty environment values count as unset.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tickerhub_aggregator::{CacheConfig, NotifierConfig};
use tickerhub_core::{ExchangeId, SnapshotDefaults, SnapshotRequest};
use tickerhub_gateway::GatewayConfig;
use tracing::error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Root configuration for the tickerhub service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    // Upstream exchanges
    pub binance_base_url: String,
    pub bybit_base_url: String,
    pub okx_base_url: String,
    pub kraken_base_url: String,
    pub coinbase_base_url: String,
    pub request_timeout_seconds: u64,
    pub kraken_ticker_batch_size: usize,
    pub coinbase_ticker_concurrency: usize,

    /// Inbound webhook shared secret
    pub incoming_webhook_token: Option<String>,

    // Outbound notifier
    pub outbound_webhook_url: Option<String>,
    pub outbound_exchange: String,
    pub outbound_webhook_timeout_seconds: u64,
    pub poll_interval_seconds: u64,

    // Snapshot defaults
    pub default_quote_asset: Option<String>,
    pub default_max_pairs: Option<usize>,
    pub default_top_assets_only: bool,

    // Cache
    pub snapshot_cache_ttl_seconds: u64,
    pub snapshot_cache_swr_seconds: u64,

    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let gateway = GatewayConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            binance_base_url: gateway.binance_base_url,
            bybit_base_url: gateway.bybit_base_url,
            okx_base_url: gateway.okx_base_url,
            kraken_base_url: gateway.kraken_base_url,
            coinbase_base_url: gateway.coinbase_base_url,
            request_timeout_seconds: gateway.request_timeout.as_secs(),
            kraken_ticker_batch_size: gateway.kraken_batch_size,
            coinbase_ticker_concurrency: gateway.coinbase_concurrency,
            incoming_webhook_token: None,
            outbound_webhook_url: None,
            outbound_exchange: ExchangeId::Binance.to_string(),
            outbound_webhook_timeout_seconds: 15,
            poll_interval_seconds: 30,
            default_quote_asset: None,
            default_max_pairs: None,
            default_top_assets_only: true,
            snapshot_cache_ttl_seconds: 20,
            snapshot_cache_swr_seconds: 120,
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Defaults, then the optional JSON file, then the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Overlay environment values read through `lookup`, then validate
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = env("HOST") {
            self.host = v;
        }
        if let Some(v) = env("PORT") {
            self.port = parse("PORT", &v)?;
        }

        for (key, slot) in [
            ("BINANCE_BASE_URL", &mut self.binance_base_url),
            ("BYBIT_BASE_URL", &mut self.bybit_base_url),
            ("OKX_BASE_URL", &mut self.okx_base_url),
            ("KRAKEN_BASE_URL", &mut self.kraken_base_url),
            ("COINBASE_BASE_URL", &mut self.coinbase_base_url),
        ] {
            if let Some(v) = env(key) {
                *slot = v;
            }
        }

        if let Some(v) = env("REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = parse("REQUEST_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = env("KRAKEN_TICKER_BATCH_SIZE") {
            self.kraken_ticker_batch_size = parse("KRAKEN_TICKER_BATCH_SIZE", &v)?;
        }
        if let Some(v) = env("COINBASE_TICKER_CONCURRENCY") {
            self.coinbase_ticker_concurrency = parse("COINBASE_TICKER_CONCURRENCY", &v)?;
        }
        if let Some(v) = env("INCOMING_WEBHOOK_TOKEN") {
            self.incoming_webhook_token = Some(v);
        }
        if let Some(v) = env("OUTBOUND_WEBHOOK_URL") {
            self.outbound_webhook_url = Some(v);
        }
        if let Some(v) = env("OUTBOUND_EXCHANGE") {
            self.outbound_exchange = v;
        }
        if let Some(v) = env("OUTBOUND_WEBHOOK_TIMEOUT_SECONDS") {
            self.outbound_webhook_timeout_seconds = parse("OUTBOUND_WEBHOOK_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = env("POLL_INTERVAL_SECONDS") {
            self.poll_interval_seconds = parse("POLL_INTERVAL_SECONDS", &v)?;
        }
        if let Some(v) = env("DEFAULT_QUOTE_ASSET") {
            self.default_quote_asset = Some(v);
        }
        if let Some(v) = env("DEFAULT_MAX_PAIRS") {
            self.default_max_pairs = Some(parse("DEFAULT_MAX_PAIRS", &v)?);
        }
        if let Some(v) = env("DEFAULT_TOP_ASSETS_ONLY") {
            self.default_top_assets_only = parse_bool("DEFAULT_TOP_ASSETS_ONLY", &v)?;
        }
        if let Some(v) = env("SNAPSHOT_CACHE_TTL_SECONDS") {
            self.snapshot_cache_ttl_seconds = parse("SNAPSHOT_CACHE_TTL_SECONDS", &v)?;
        }
        if let Some(v) = env("SNAPSHOT_CACHE_SWR_SECONDS") {
            self.snapshot_cache_swr_seconds = parse("SNAPSHOT_CACHE_SWR_SECONDS", &v)?;
        }
        if let Some(v) = env("LOG_FORMAT") {
            self.log_format = v
                .parse()
                .map_err(|reason: String| ConfigError::invalid("LOG_FORMAT", reason))?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("BINANCE_BASE_URL", &self.binance_base_url),
            ("BYBIT_BASE_URL", &self.bybit_base_url),
            ("OKX_BASE_URL", &self.okx_base_url),
            ("KRAKEN_BASE_URL", &self.kraken_base_url),
            ("COINBASE_BASE_URL", &self.coinbase_base_url),
        ] {
            check_url(key, value)?;
        }
        if let Some(url) = &self.outbound_webhook_url {
            check_url("OUTBOUND_WEBHOOK_URL", url)?;
        }

        if self.kraken_ticker_batch_size == 0 {
            return Err(ConfigError::invalid("KRAKEN_TICKER_BATCH_SIZE", "must be at least 1"));
        }
        if self.coinbase_ticker_concurrency == 0 {
            return Err(ConfigError::invalid("COINBASE_TICKER_CONCURRENCY", "must be at least 1"));
        }
        if self.default_max_pairs == Some(0) {
            return Err(ConfigError::invalid("DEFAULT_MAX_PAIRS", "must be at least 1"));
        }
        Ok(())
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            binance_base_url: self.binance_base_url.clone(),
            bybit_base_url: self.bybit_base_url.clone(),
            okx_base_url: self.okx_base_url.clone(),
            kraken_base_url: self.kraken_base_url.clone(),
            coinbase_base_url: self.coinbase_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            kraken_batch_size: self.kraken_ticker_batch_size,
            coinbase_concurrency: self.coinbase_ticker_concurrency,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new(
            Duration::from_secs(self.snapshot_cache_ttl_seconds),
            Duration::from_secs(self.snapshot_cache_swr_seconds),
        )
    }

    pub fn snapshot_defaults(&self) -> SnapshotDefaults {
        SnapshotDefaults {
            quote_asset: self.default_quote_asset.clone(),
            max_pairs: self.default_max_pairs,
            top_assets_only: self.default_top_assets_only,
        }
    }

    /// Notifier settings, or `None` when the notifier should not run.
    ///
    /// An unknown `OUTBOUND_EXCHANGE` is logged and disables the notifier.
    pub fn notifier_config(&self) -> Option<NotifierConfig> {
        let url = self.outbound_webhook_url.as_deref()?;

        let exchange: ExchangeId = match self.outbound_exchange.parse() {
            Ok(exchange) => exchange,
            Err(e) => {
                error!(error = %e, "invalid OUTBOUND_EXCHANGE, outbound notifier disabled");
                return None;
            }
        };

        Some(NotifierConfig {
            url: url.to_string(),
            exchange,
            // Builder defaults fill every field
            request: SnapshotRequest::default(),
            interval: Duration::from_secs(self.poll_interval_seconds.max(1)),
            timeout: Duration::from_secs(self.outbound_webhook_timeout_seconds),
        })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, format!("'{raw}': {e}")))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, format!("'{raw}' is not a boolean"))),
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::invalid(key, format!("'{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::invalid(key, format!("unsupported scheme '{scheme}'"))),
    }
}
