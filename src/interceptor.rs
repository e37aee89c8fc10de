//! Dispatch-path interceptor.
//!
//! Sits in the host RPC server's middleware chain and wraps the real handler
//! invocation. The interceptor holds no mutable state across calls; it only
//! derives a key and delegates to the orchestrator. It is transport-agnostic:
//! the hosting framework adapts its own handler shape into a `continuation`
//! closure that captures the request and call context.

use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::config::CachePolicy;
use crate::key::CacheKey;
use crate::orchestrator::CacheOrchestrator;

/// Minimal per-call context handed to the interceptor by the hosting
/// framework.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Fully-qualified method name, e.g. `calculator.Calculator/Sum`.
    pub method: String,
    /// Remote peer, when the transport exposes one.
    pub peer: Option<String>,
}

impl CallContext {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            peer: None,
        }
    }

    pub fn with_peer(mut self, peer: impl Into<String>) -> Self {
        self.peer = Some(peer.into());
        self
    }
}

/// Caches unary call responses keyed by method identity and request content.
pub struct CachingInterceptor {
    orchestrator: Arc<CacheOrchestrator>,
    policy: CachePolicy,
}

impl CachingInterceptor {
    pub fn new(orchestrator: Arc<CacheOrchestrator>, policy: CachePolicy) -> Self {
        Self {
            orchestrator,
            policy,
        }
    }

    /// Wrap one unary call.
    ///
    /// When caching is disabled the continuation runs directly and no key is
    /// computed. Otherwise the call goes through
    /// [`CacheOrchestrator::get_or_set`] under the policy's default TTL.
    /// Handler errors propagate verbatim either way. A request that cannot be
    /// serialized falls through to the handler uncached rather than failing
    /// the call.
    pub async fn intercept<Req, Resp, E, F, Fut>(
        &self,
        ctx: &CallContext,
        request: &Req,
        continuation: F,
    ) -> Result<Resp, E>
    where
        Req: Serialize,
        Resp: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Resp, E>>,
    {
        if !self.policy.enabled {
            return continuation().await;
        }

        let key = match CacheKey::derive(&ctx.method, request) {
            Ok(key) => key,
            Err(e) => {
                if self.policy.logging_enabled {
                    warn!(method = %ctx.method, error = %e, "cache key derivation failed, bypassing cache");
                }
                return continuation().await;
            }
        };

        self.orchestrator
            .get_or_set(&key, Some(self.policy.default_ttl), continuation)
            .await
    }

    /// Drop any cached response for one (method, request-content) pair.
    pub async fn invalidate<Req: Serialize>(&self, method: &str, request: &Req) {
        if let Ok(key) = CacheKey::derive(method, request) {
            self.orchestrator.invalidate(&key).await;
        }
    }
}
