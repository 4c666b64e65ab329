use std::sync::Arc;

use tickerhub_clock::Clock;
use tickerhub_core::{
    ExchangeId, Snapshot, SnapshotDefaults, SnapshotKey, SnapshotRequest, filter_top_assets,
};
use tickerhub_gateway::AdapterRegistry;
use tracing::{debug, instrument};

use crate::error::SnapshotError;

/// Builds one snapshot from one adapter call.
///
/// Unset request fields resolve to the configured defaults before the
/// adapter is called. With `top_assets_only` the adapter is asked for an
/// unbounded list so the pair limit applies after allow-list filtering.
pub struct SnapshotBuilder {
    registry: AdapterRegistry,
    defaults: SnapshotDefaults,
    clock: Arc<dyn Clock>,
}

impl SnapshotBuilder {
    pub fn new(registry: AdapterRegistry, defaults: SnapshotDefaults, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            defaults,
            clock,
        }
    }

    pub fn defaults(&self) -> &SnapshotDefaults {
        &self.defaults
    }

    pub fn exchanges(&self) -> Vec<ExchangeId> {
        self.registry.exchanges()
    }

    /// Normalize a request into its cache key
    pub fn resolve(
        &self,
        exchange: ExchangeId,
        request: &SnapshotRequest,
    ) -> Result<SnapshotKey, SnapshotError> {
        Ok(SnapshotKey::resolve(exchange, request, &self.defaults)?)
    }

    pub async fn build(
        &self,
        exchange: ExchangeId,
        request: &SnapshotRequest,
    ) -> Result<Snapshot, SnapshotError> {
        let key = self.resolve(exchange, request)?;
        self.build_key(&key).await
    }

    /// Build the snapshot for an already-resolved key
    #[instrument(skip(self), fields(exchange = %key.exchange))]
    pub async fn build_key(&self, key: &SnapshotKey) -> Result<Snapshot, SnapshotError> {
        let adapter = self
            .registry
            .get(key.exchange)
            .ok_or(SnapshotError::NotRegistered(key.exchange))?;

        let adapter_limit = if key.top_assets_only {
            None
        } else {
            key.max_pairs
        };

        let mut markets = adapter
            .fetch_snapshot(key.quote_asset.as_deref(), adapter_limit)
            .await
            .map_err(|source| SnapshotError::Upstream {
                exchange: key.exchange,
                source,
            })?;
        let fetched = markets.len();

        if key.top_assets_only {
            markets = filter_top_assets(markets);
            if let Some(limit) = key.max_pairs {
                markets.truncate(limit);
            }
        }

        debug!(fetched, kept = markets.len(), "snapshot built");
        Ok(Snapshot::new(
            key.exchange,
            self.clock.now(),
            key.quote_asset.clone(),
            markets,
        ))
    }
}
