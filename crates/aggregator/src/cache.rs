//! Stale-while-revalidate snapshot cache
//!
//! Per key, a read finds the entry in one of three states:
//!
//! | State   | Condition                               | Read behaviour                          |
//! |---------|-----------------------------------------|-----------------------------------------|
//! | Fresh   | `now < expires_at`                      | return cached                           |
//! | Stale   | `expires_at <= now <= created_at + swr` | return cached, refresh in background    |
//! | Expired | no entry, or older than the SWR window  | wait for a refresh, errors propagate    |
//!
//! At most one refresh runs per key. Callers that find a refresh in flight
//! share its result. Refreshes run as spawned tasks, so a caller that stops
//! waiting does not cancel the refresh for the others.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tickerhub_core::{Snapshot, SnapshotKey};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::builder::SnapshotBuilder;
use crate::config::CacheConfig;
use crate::error::SnapshotError;

type RefreshResult = Result<Arc<Snapshot>, SnapshotError>;
type SharedRefresh = Shared<BoxFuture<'static, RefreshResult>>;

/// Cached snapshot; replaced wholesale, never mutated
#[derive(Debug)]
struct CacheEntry {
    created_at: Instant,
    expires_at: Instant,
    snapshot: Arc<Snapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Freshness {
    Fresh,
    Stale,
    Expired,
}

impl CacheEntry {
    fn freshness(&self, now: Instant, config: &CacheConfig) -> Freshness {
        if now < self.expires_at {
            Freshness::Fresh
        } else if now <= self.created_at + config.stale_while_revalidate() {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}

struct InFlight {
    id: u64,
    refresh: SharedRefresh,
}

struct Inner {
    builder: Arc<SnapshotBuilder>,
    config: CacheConfig,
    entries: DashMap<SnapshotKey, Arc<CacheEntry>>,
    in_flight: Mutex<HashMap<SnapshotKey, InFlight>>,
    next_id: AtomicU64,
}

/// Keyed snapshot cache with single-flight refresh
#[derive(Clone)]
pub struct SnapshotCache {
    inner: Arc<Inner>,
}

impl SnapshotCache {
    pub fn new(builder: Arc<SnapshotBuilder>, config: CacheConfig) -> Self {
        SnapshotCache {
            inner: Arc::new(Inner {
                builder,
                config,
                entries: DashMap::new(),
                in_flight: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn builder(&self) -> &Arc<SnapshotBuilder> {
        &self.inner.builder
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Serve the snapshot for `key`, refreshing as its freshness requires
    pub async fn get(&self, key: &SnapshotKey) -> Result<Arc<Snapshot>, SnapshotError> {
        let now = Instant::now();
        let cached = self.inner.entries.get(key).map(|e| Arc::clone(e.value()));

        if let Some(entry) = cached {
            match entry.freshness(now, &self.inner.config) {
                Freshness::Fresh => return Ok(Arc::clone(&entry.snapshot)),
                Freshness::Stale => {
                    // Not awaited: the spawned task installs the result itself
                    drop(Inner::refresh(&self.inner, key));
                    debug!(exchange = %key.exchange, "serving stale snapshot");
                    return Ok(Arc::clone(&entry.snapshot));
                }
                Freshness::Expired => {}
            }
        }

        debug!(exchange = %key.exchange, "snapshot miss, waiting for refresh");
        Inner::refresh(&self.inner, key).await
    }

    /// Number of keys with an installed entry
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Refreshes currently running
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.lock().len()
    }
}

impl Inner {
    /// Join the running refresh for `key`, or start one
    fn refresh(this: &Arc<Self>, key: &SnapshotKey) -> SharedRefresh {
        let mut in_flight = this.in_flight.lock();
        if let Some(running) = in_flight.get(key) {
            return running.refresh.clone();
        }

        let id = this.next_id.fetch_add(1, Ordering::Relaxed);
        // The task's removal takes this same lock, so it cannot run ahead
        // of the insert below
        let handle = tokio::spawn(Self::run_refresh(Arc::clone(this), key.clone(), id));

        let refresh = handle
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(SnapshotError::Internal(e.to_string())),
            })
            .boxed()
            .shared();

        in_flight.insert(
            key.clone(),
            InFlight {
                id,
                refresh: refresh.clone(),
            },
        );
        refresh
    }

    async fn run_refresh(this: Arc<Self>, key: SnapshotKey, id: u64) -> RefreshResult {
        let guard = InFlightGuard {
            inner: Arc::clone(&this),
            key: key.clone(),
            id,
        };
        debug!(exchange = %key.exchange, "snapshot refresh started");
        let result = this.builder.build_key(&key).await.map(Arc::new);

        match &result {
            Ok(snapshot) => {
                let created_at = Instant::now();
                let entry = CacheEntry {
                    created_at,
                    expires_at: created_at + this.config.ttl(),
                    snapshot: Arc::clone(snapshot),
                };
                this.entries.insert(key.clone(), Arc::new(entry));
                debug!(exchange = %key.exchange, pairs = snapshot.total_pairs, "snapshot cached");
            }
            Err(e) => {
                warn!(exchange = %key.exchange, error = %e, "snapshot refresh failed");
            }
        }

        // Entry is visible before the in-flight slot is released
        drop(guard);
        result
    }
}

/// Releases a key's in-flight slot when its refresh task ends, including
/// on panic or runtime shutdown
struct InFlightGuard {
    inner: Arc<Inner>,
    key: SnapshotKey,
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut in_flight = self.inner.in_flight.lock();
        if in_flight.get(&self.key).is_some_and(|f| f.id == self.id) {
            in_flight.remove(&self.key);
        }
    }
}
