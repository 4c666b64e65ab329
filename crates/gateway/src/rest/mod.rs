//! HTTP plumbing shared by every exchange adapter

mod client;
mod wire;

pub use client::{RestClient, build_http_client};
pub use wire::WireDecimal;
