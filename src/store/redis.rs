//! Networked backend on top of Redis.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use super::backend::CacheStore;
use crate::error::Error;
use crate::key::CacheKey;
use crate::Result;

/// Redis-backed store.
///
/// Connects eagerly at construction so an unreachable or malformed connection
/// string fails the hosting process at startup. After that, every operation
/// returns its error to the caller; the orchestrator absorbs those into
/// miss/dropped-write semantics, because the cache must never fail the
/// primary request path.
pub struct RedisStore {
    conn: ConnectionManager,
    default_ttl: Duration,
}

impl RedisStore {
    /// Connect to Redis. `connection` accepts `host`, `host:port`, or a full
    /// `redis://` URL.
    pub async fn connect(connection: &str, default_ttl: Duration) -> Result<Self> {
        let url = normalize_connection(connection);
        let client = redis::Client::open(url.as_str()).map_err(|e| {
            Error::configuration(format!("invalid Redis connection string '{connection}': {e}"))
        })?;
        let conn = client.get_connection_manager().await.map_err(|e| {
            Error::configuration(format!("failed to connect to Redis at '{connection}': {e}"))
        })?;
        Ok(Self { conn, default_ttl })
    }
}

fn normalize_connection(connection: &str) -> String {
    if connection.contains("://") {
        connection.to_string()
    } else {
        format!("redis://{connection}")
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key.as_str()).await?;
        Ok(value)
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        // SETEX rejects a zero expiry; clamp sub-second TTLs up to one second.
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key.as_str(), value, seconds).await?;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key.as_str()).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
