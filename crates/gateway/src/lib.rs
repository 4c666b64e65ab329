//! Tickerhub Gateway
//!
//! Exchange adapter layer. Each adapter pulls instrument metadata and
//! ticker data from one exchange's public REST API and normalizes them
//! into [`MarketRecord`](tickerhub_core::MarketRecord)s.
//!
//! ## Architecture
//!
//! ```text
//!  Binance   Bybit    OKX     Kraken   Coinbase
//!     │        │       │        │         │
//!     │ dual   │ paged │ dual   │ batched │ gated fan-out
//!     ▼        ▼       ▼        ▼         ▼
//! ┌──────────────────────────────────────────────┐
//! │         ExchangeAdapter::fetch_snapshot      │
//! │  join by symbol → sort → dedup → truncate    │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//!                AdapterRegistry (factory)
//! ```
//!
//! All adapters share one pooled HTTP client through [`RestClient`].

pub mod adapters;
pub mod config;
pub mod error;
pub mod registry;
pub mod rest;

pub use adapters::{
    BinanceAdapter, BybitAdapter, CoinbaseAdapter, ExchangeAdapter, KrakenAdapter, OkxAdapter,
};
pub use config::GatewayConfig;
pub use error::{FetchError, RestError};
pub use registry::{AdapterRegistry, create_adapter};
pub use rest::{RestClient, WireDecimal};
