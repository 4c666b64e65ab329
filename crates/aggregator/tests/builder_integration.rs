//! Snapshot builder: default resolution, allow-list filtering, limits

mod support;

use std::sync::Arc;

use tickerhub_aggregator::{SnapshotBuilder, SnapshotError};
use tickerhub_core::{ExchangeId, MarketRecord, SnapshotDefaults, SnapshotRequest, ValidationError};
use tickerhub_gateway::{AdapterRegistry, FetchError};

use support::{MockAdapter, builder_with, fixed_clock, fixed_time, plain_defaults, record};

fn fifty_pairs() -> Vec<MarketRecord> {
    let mut records: Vec<MarketRecord> = ["BTC", "ETH", "SOL", "XRP", "ADA", "DOGE", "LINK", "LTC"]
        .iter()
        .map(|base| record(base, "USDT"))
        .collect();
    // Sort ahead of every allow-listed symbol
    records.extend((0..42).map(|i| record(&format!("AA{i:02}"), "USDT")));
    records
}

#[tokio::test]
async fn test_top_assets_limit_applies_after_filtering() {
    let adapter = Arc::new(MockAdapter::new(ExchangeId::Binance, fifty_pairs()));
    let builder = builder_with(adapter.clone(), SnapshotDefaults::default());

    let request = SnapshotRequest {
        max_pairs: Some(5),
        top_assets_only: Some(true),
        ..SnapshotRequest::default()
    };
    let snapshot = builder.build(ExchangeId::Binance, &request).await.unwrap();

    let symbols: Vec<_> = snapshot.markets.iter().map(MarketRecord::symbol).collect();
    assert_eq!(
        symbols,
        vec!["ADAUSDT", "BTCUSDT", "DOGEUSDT", "ETHUSDT", "LINKUSDT"]
    );
    assert_eq!(snapshot.total_pairs, 5);
    // No truncation upstream of the allow-list
    assert_eq!(adapter.limits_seen(), vec![None]);
}

#[tokio::test]
async fn test_limit_passed_through_without_allow_list() {
    let adapter = Arc::new(MockAdapter::new(ExchangeId::Binance, fifty_pairs()));
    let builder = builder_with(adapter.clone(), plain_defaults());

    let request = SnapshotRequest {
        max_pairs: Some(3),
        ..SnapshotRequest::default()
    };
    let snapshot = builder.build(ExchangeId::Binance, &request).await.unwrap();

    assert_eq!(adapter.limits_seen(), vec![Some(3)]);
    assert_eq!(snapshot.total_pairs, 3);
    assert_eq!(snapshot.markets[0].symbol(), "AA00USDT");
}

#[tokio::test]
async fn test_defaults_fill_unset_fields() {
    let records = vec![record("BTC", "USDT"), record("BTC", "EUR"), record("ETH", "EUR")];
    let adapter = Arc::new(MockAdapter::new(ExchangeId::Kraken, records));
    let defaults = SnapshotDefaults {
        quote_asset: Some("eur".to_string()),
        max_pairs: Some(1),
        top_assets_only: false,
    };
    let builder = builder_with(adapter, defaults);

    let snapshot = builder
        .build(ExchangeId::Kraken, &SnapshotRequest::default())
        .await
        .unwrap();

    assert_eq!(snapshot.exchange, ExchangeId::Kraken);
    assert_eq!(snapshot.quote_asset.as_deref(), Some("EUR"));
    assert_eq!(snapshot.total_pairs, 1);
    assert_eq!(snapshot.markets[0].symbol(), "BTCEUR");
    assert_eq!(snapshot.generated_at, fixed_time());
}

#[tokio::test]
async fn test_upstream_error_wrapped_with_exchange() {
    let adapter = Arc::new(MockAdapter::new(ExchangeId::Okx, vec![record("BTC", "USDT")]));
    adapter.fail_next(1);
    let builder = builder_with(adapter, plain_defaults());

    let err = builder
        .build(ExchangeId::Okx, &SnapshotRequest::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SnapshotError::Upstream {
            exchange: ExchangeId::Okx,
            source: FetchError::Network("connection reset".to_string()),
        }
    );
}

#[tokio::test]
async fn test_zero_max_pairs_rejected() {
    let adapter = Arc::new(MockAdapter::new(ExchangeId::Binance, Vec::new()));
    let builder = builder_with(adapter.clone(), plain_defaults());

    let request = SnapshotRequest {
        max_pairs: Some(0),
        ..SnapshotRequest::default()
    };
    let err = builder.build(ExchangeId::Binance, &request).await.unwrap_err();

    assert_eq!(err, SnapshotError::Validation(ValidationError::InvalidMaxPairs));
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn test_unregistered_exchange() {
    let builder = SnapshotBuilder::new(AdapterRegistry::new(), plain_defaults(), fixed_clock());

    let err = builder
        .build(ExchangeId::Coinbase, &SnapshotRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err, SnapshotError::NotRegistered(ExchangeId::Coinbase));
}
