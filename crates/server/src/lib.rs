//! Tickerhub Server
//!
//! HTTP surface for the snapshot aggregator:
//!
//! - `GET  /health`
//! - `GET  /exchanges`
//! - `GET  /markets/{exchange}` (and legacy `GET /{exchange}/markets`)
//! - `POST /webhooks/{exchange}`
//!
//! Plus configuration loading ([`Settings`]) and tracing setup.

pub mod config;
pub mod presentation;
pub mod telemetry;

pub use config::{ConfigError, LogFormat, Settings};
pub use presentation::rest::{AppState, create_router};
