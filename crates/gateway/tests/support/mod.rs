//! Shared helpers for adapter integration tests

use std::time::Duration;

use axum::Router;
use tickerhub_core::ExchangeId;
use tickerhub_gateway::{ExchangeAdapter, GatewayConfig, create_adapter, rest::build_http_client};

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

pub fn stub_config(base_url: &str) -> GatewayConfig {
    GatewayConfig {
        request_timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }
    .with_all_base_urls(base_url)
}

pub fn adapter(exchange: ExchangeId, config: &GatewayConfig) -> std::sync::Arc<dyn ExchangeAdapter> {
    let client = build_http_client(config.request_timeout).expect("http client");
    create_adapter(exchange, config, &client)
}
