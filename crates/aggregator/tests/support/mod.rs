//! Test doubles shared by the aggregator integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use rust_decimal_macros::dec;
use tickerhub_aggregator::SnapshotBuilder;
use tickerhub_clock::FixedClock;
use tickerhub_core::{ExchangeId, MarketRecord, SnapshotDefaults, Timestamp};
use tickerhub_gateway::{AdapterRegistry, ExchangeAdapter, FetchError};

/// Adapter that serves canned records and counts calls
pub struct MockAdapter {
    exchange: ExchangeId,
    records: Vec<MarketRecord>,
    delay: Duration,
    calls: AtomicUsize,
    failures_left: AtomicUsize,
    panics_left: AtomicUsize,
    limits_seen: Mutex<Vec<Option<usize>>>,
}

impl MockAdapter {
    pub fn new(exchange: ExchangeId, records: Vec<MarketRecord>) -> Self {
        MockAdapter {
            exchange,
            records,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(0),
            panics_left: AtomicUsize::new(0),
            limits_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next `n` calls with a network error
    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    /// Panic on the next `n` calls
    pub fn panic_next(&self, n: usize) {
        self.panics_left.store(n, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn limits_seen(&self) -> Vec<Option<usize>> {
        self.limits_seen.lock().clone()
    }
}

#[async_trait]
impl ExchangeAdapter for MockAdapter {
    fn exchange(&self) -> ExchangeId {
        self.exchange
    }

    async fn fetch_snapshot(
        &self,
        quote_filter: Option<&str>,
        max_pairs: Option<usize>,
    ) -> Result<Vec<MarketRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.limits_seen.lock().push(max_pairs);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let panicking = self
            .panics_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if panicking {
            panic!("adapter blew up");
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(FetchError::Network("connection reset".to_string()));
        }

        let mut records: Vec<MarketRecord> = self
            .records
            .iter()
            .filter(|r| quote_filter.is_none_or(|q| r.quote_asset().eq_ignore_ascii_case(q)))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        if let Some(limit) = max_pairs {
            records.truncate(limit);
        }
        Ok(records)
    }
}

pub fn record(base: &str, quote: &str) -> MarketRecord {
    MarketRecord::new(format!("{base}{quote}"), base, quote, dec!(100), dec!(99.5), dec!(100.5))
}

pub fn fixed_time() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(fixed_time()))
}

pub fn builder_with(adapter: Arc<MockAdapter>, defaults: SnapshotDefaults) -> Arc<SnapshotBuilder> {
    let registry = AdapterRegistry::new().with(adapter);
    Arc::new(SnapshotBuilder::new(registry, defaults, fixed_clock()))
}

/// Defaults with the allow-list off, so every record passes through
pub fn plain_defaults() -> SnapshotDefaults {
    SnapshotDefaults {
        top_assets_only: false,
        ..SnapshotDefaults::default()
    }
}
