//! Snapshot request parameters and their canonical cache key.

use serde::Deserialize;

use crate::entities::ExchangeId;
use crate::error::ValidationError;

/// Filters as supplied by a client. `None` means "use the configured default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub quote_asset: Option<String>,
    #[serde(default)]
    pub max_pairs: Option<usize>,
    #[serde(default)]
    pub top_assets_only: Option<bool>,
}

/// Defaults applied to unset request filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDefaults {
    pub quote_asset: Option<String>,
    pub max_pairs: Option<usize>,
    pub top_assets_only: bool,
}

impl Default for SnapshotDefaults {
    fn default() -> Self {
        SnapshotDefaults {
            quote_asset: None,
            max_pairs: None,
            top_assets_only: true,
        }
    }
}

/// Fully resolved, normalized snapshot parameters.
///
/// Two requests that mean the same thing produce equal keys: quote assets
/// are trimmed and uppercased, an empty quote asset means "no filter", and
/// unset fields carry the resolved default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub exchange: ExchangeId,
    pub quote_asset: Option<String>,
    pub max_pairs: Option<usize>,
    pub top_assets_only: bool,
}

impl SnapshotKey {
    pub fn resolve(
        exchange: ExchangeId,
        request: &SnapshotRequest,
        defaults: &SnapshotDefaults,
    ) -> Result<Self, ValidationError> {
        let quote_asset = match &request.quote_asset {
            Some(explicit) => normalize_quote(explicit),
            None => defaults.quote_asset.as_deref().and_then(normalize_quote),
        };

        let max_pairs = request.max_pairs.or(defaults.max_pairs);
        if max_pairs == Some(0) {
            return Err(ValidationError::InvalidMaxPairs);
        }

        Ok(SnapshotKey {
            exchange,
            quote_asset,
            max_pairs,
            top_assets_only: request.top_assets_only.unwrap_or(defaults.top_assets_only),
        })
    }
}

fn normalize_quote(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
