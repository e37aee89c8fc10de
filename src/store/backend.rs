//! Store contract and the in-process backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::key::CacheKey;
use crate::Result;

/// Key/value storage with TTL-based expiry.
///
/// Both shipped backends implement this contract identically: `get` returns
/// `None` for missing or expired entries, `set` overwrites unconditionally
/// (last writer wins), and `remove` is a no-op for an absent key.
/// Implementations must be safe for concurrent access from many in-flight
/// calls.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Stored value if present and not expired, `None` otherwise.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`. A `None` TTL applies the store's configured
    /// default.
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Delete the entry for `key` if present.
    async fn remove(&self, key: &CacheKey) -> Result<()>;

    /// Backend identifier for log lines.
    fn name(&self) -> &'static str;
}

struct Entry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process backend backed by a lock-guarded map.
///
/// Expired entries are dropped lazily on read; there is no sweeper task. The
/// only failure mode is resource exhaustion, which is outside this contract.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryStore {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Number of live (unexpired) entries. Test and diagnostics helper.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap()
            .values()
            .filter(|e| !e.is_expired())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get(key.as_str()) {
            if entry.is_expired() {
                entries.remove(key.as_str());
                return Ok(None);
            }
            return Ok(Some(entry.data.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = Entry {
            data: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .write()
            .unwrap()
            .insert(key.as_str().to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<()> {
        self.entries.write().unwrap().remove(key.as_str());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
