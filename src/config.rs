//! Caching policy.
//!
//! The policy is an explicitly constructed, immutable value injected into
//! every component at construction time. It is read once at startup; there is
//! no dynamic reconfiguration.

use std::time::Duration;

/// Which storage backend backs the [`CacheStore`](crate::CacheStore)
/// contract. Selected once at startup; no runtime switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// In-process map, lost on restart.
    #[default]
    Local,
    /// Redis reached via [`CachePolicy::backend_connection`].
    Networked,
}

/// Static caching policy consumed by the store, orchestrator, and
/// interceptor.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    /// Master switch. When false the interceptor invokes handlers directly
    /// and skips key computation entirely.
    pub enabled: bool,
    /// Applied when a call site does not specify its own TTL.
    pub default_ttl: Duration,
    /// Backend selection, resolved once by [`build_store`](crate::build_store).
    pub backend: BackendKind,
    /// Connection string for the networked backend. Accepts `host`,
    /// `host:port`, or a full `redis://` URL.
    pub backend_connection: String,
    /// Emit per-operation cache events through `tracing`.
    pub logging_enabled: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: Duration::from_secs(300),
            backend: BackendKind::Local,
            backend_connection: "localhost".to_string(),
            logging_enabled: false,
        }
    }
}

impl CachePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_backend_connection(mut self, connection: impl Into<String>) -> Self {
        self.backend_connection = connection.into();
        self
    }

    pub fn with_logging(mut self, logging_enabled: bool) -> Self {
        self.logging_enabled = logging_enabled;
        self
    }
}
