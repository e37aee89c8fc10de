//! Cache storage backends.
//!
//! One contract, two interchangeable implementations:
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`MemoryStore`] | In-process map with lazy TTL expiry; lost on restart |
//! | [`RedisStore`] | Networked store; per-operation failures degrade to misses |
//!
//! Absence is a normal result on this contract, never an error. Stores own
//! entry storage exclusively; nothing above this boundary ever observes an
//! expired entry.

mod backend;
mod redis;

pub use backend::{CacheStore, MemoryStore};
pub use self::redis::RedisStore;

use std::sync::Arc;

use crate::config::{BackendKind, CachePolicy};
use crate::Result;

/// Build the store the policy selects. Called once at startup; the networked
/// backend connects eagerly here so a bad connection string fails the hosting
/// process immediately.
pub async fn build_store(policy: &CachePolicy) -> Result<Arc<dyn CacheStore>> {
    match policy.backend {
        BackendKind::Local => Ok(Arc::new(MemoryStore::new(policy.default_ttl))),
        BackendKind::Networked => Ok(Arc::new(
            RedisStore::connect(&policy.backend_connection, policy.default_ttl).await?,
        )),
    }
}
