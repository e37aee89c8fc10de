use thiserror::Error;

/// Unified error type for the caching layer.
///
/// Only [`Error::Configuration`] ever reaches a hosting process: it is raised
/// at construction time so an unreachable backend fails the process at
/// startup rather than at first request. Per-operation failures are absorbed
/// at the store boundary — a `get` failure degrades to a cache miss and a
/// `set`/`remove` failure becomes a dropped write — so introducing or
/// removing this layer never changes the failure behavior of the wrapped
/// service.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreachable backend connection parameters.
    #[error("Cache configuration error: {message}")]
    Configuration { message: String },

    /// Per-operation failure talking to the networked backend.
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Cached payload could not be serialized or deserialized.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by a custom [`CacheStore`](crate::CacheStore)
    /// implementation.
    #[error("Cache store error: {message}")]
    Store { message: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}
