//! Get-or-compute orchestration.
//!
//! The orchestrator owns the correctness subtleties of the caching layer: it
//! looks a key up, invokes the real computation on a miss, writes the result
//! back, and absorbs every cache-layer failure so only the computation's own
//! errors ever reach the caller. Concurrent misses on one key are collapsed
//! into a single flight; waiters pick the result up from the store instead of
//! recomputing.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::CachePolicy;
use crate::key::CacheKey;
use crate::store::CacheStore;

/// Snapshot of cache activity counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub invalidations: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    invalidations: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Implements get-or-compute and explicit invalidation over exactly one
/// [`CacheStore`], held for the orchestrator's entire lifetime.
pub struct CacheOrchestrator {
    store: Arc<dyn CacheStore>,
    policy: CachePolicy,
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
    stats: AtomicStats,
}

impl CacheOrchestrator {
    pub fn new(store: Arc<dyn CacheStore>, policy: CachePolicy) -> Self {
        Self {
            store,
            policy,
            inflight: Mutex::new(HashMap::new()),
            stats: AtomicStats::new(),
        }
    }

    /// Return the cached value for `key`, or invoke `compute`, store its
    /// result, and return it.
    ///
    /// On a hit `compute` is never invoked. Concurrent misses on the same key
    /// share one flight: the first caller computes and writes, waiters
    /// re-check the store once the flight lands. `compute` errors propagate
    /// verbatim and are never cached or retried; a failed flight releases the
    /// key so the next caller computes independently. A successfully computed
    /// empty value is cached like any other — presence is decided by entry
    /// existence, not by inspecting the value.
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Option<Duration>,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.policy.enabled {
            return compute().await;
        }

        if let Some(value) = self.lookup(key).await {
            return Ok(value);
        }

        let flight = self.flight(key);
        let guard = flight.lock().await;

        // A concurrent flight may have filled the store while we waited.
        if let Some(value) = self.lookup(key).await {
            drop(guard);
            self.land(key, &flight);
            return Ok(value);
        }

        let result = compute().await;
        if let Ok(value) = &result {
            self.write(key, value, ttl).await;
        }
        drop(guard);
        self.land(key, &flight);
        result
    }

    /// Remove the entry for `key`. Infallible from the caller's perspective;
    /// backend failures are swallowed. Executes even when caching is disabled
    /// so explicit invalidation always takes effect.
    pub async fn invalidate(&self, key: &CacheKey) {
        match self.store.remove(key).await {
            Ok(()) => {
                self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    debug!(key = %key, backend = self.store.name(), "cache entry invalidated");
                }
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    warn!(key = %key, error = %e, "cache remove failed, ignoring");
                }
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }

    /// Lookup with every cache-layer failure absorbed: a backend error or an
    /// undecodable payload reads as a miss.
    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.policy.enabled {
            return None;
        }
        match self.store.get(key).await {
            Ok(Some(data)) => match serde_json::from_slice(&data) {
                Ok(value) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    if self.policy.logging_enabled {
                        debug!(key = %key, backend = self.store.name(), "cache hit");
                    }
                    Some(value)
                }
                Err(e) => {
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    if self.policy.logging_enabled {
                        warn!(key = %key, error = %e, "cached payload undecodable, treating as miss");
                    }
                    None
                }
            },
            Ok(None) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    debug!(key = %key, backend = self.store.name(), "cache miss");
                }
                None
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    warn!(key = %key, error = %e, "cache get failed, treating as miss");
                }
                None
            }
        }
    }

    /// Write-back with failures swallowed: the value is simply not persisted.
    async fn write<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Option<Duration>) {
        if !self.policy.enabled {
            return;
        }
        let data = match serde_json::to_vec(value) {
            Ok(data) => data,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    warn!(key = %key, error = %e, "response not serializable, skipping cache write");
                }
                return;
            }
        };
        match self.store.set(key, &data, ttl).await {
            Ok(()) => {
                self.stats.sets.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    debug!(key = %key, backend = self.store.name(), bytes = data.len(), "cache entry stored");
                }
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                if self.policy.logging_enabled {
                    warn!(key = %key, error = %e, "cache set failed, dropping write");
                }
            }
        }
    }

    /// Fetch or insert the in-flight marker for `key`.
    fn flight(&self, key: &CacheKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut inflight = self.inflight.lock().unwrap();
        inflight
            .entry(key.as_str().to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Clear the in-flight marker once a flight completes, success or
    /// failure. Only the marker this flight used is removed; a marker left
    /// behind by a cancelled flight is reused by the next miss.
    fn land(&self, key: &CacheKey, flight: &Arc<tokio::sync::Mutex<()>>) {
        let mut inflight = self.inflight.lock().unwrap();
        if let Some(current) = inflight.get(key.as_str()) {
            if Arc::ptr_eq(current, flight) {
                inflight.remove(key.as_str());
            }
        }
    }
}
