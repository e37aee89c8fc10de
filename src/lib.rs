//! # rpc-response-cache
//!
//! 为一元 RPC 调用提供透明的响应缓存中间件。
//!
//! Transparent response caching middleware for unary request/response RPC
//! services. The interceptor derives a cache key from the fully-qualified
//! method name and a stable content fingerprint of the request payload, then
//! short-circuits execution with a previously computed response when one is
//! cached, invoking the real handler only on a miss.
//!
//! ## Core Philosophy
//!
//! - **Transparent**: the wrapped service keeps its exact failure behavior;
//!   cache-layer failures are absorbed, never surfaced to callers
//! - **Content-addressed**: keys are derived from canonical serialized request
//!   bytes via SHA-256, never from object identity
//! - **Pluggable storage**: one [`CacheStore`] contract, two backends
//!   (in-process memory, Redis)
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CachingInterceptor`] | Wraps unary handler invocations on the dispatch path |
//! | [`CacheOrchestrator`] | Get-or-compute orchestration with single-flight deduplication |
//! | [`CacheStore`] | Backend contract: get / set / remove with TTL expiry |
//! | [`MemoryStore`] | In-process backend backed by a concurrency-safe map |
//! | [`RedisStore`] | Networked backend that degrades to miss on failure |
//! | [`CacheKey`] | Method name + request content fingerprint |
//! | [`CachePolicy`] | Immutable policy: enabled flag, default TTL, backend selection |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rpc_response_cache::{
//!     build_store, CachePolicy, CacheOrchestrator, CachingInterceptor, CallContext,
//! };
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Serialize)]
//! struct SumRequest { a: i64, b: i64 }
//!
//! #[derive(Serialize, Deserialize)]
//! struct SumResponse { total: i64 }
//!
//! #[tokio::main]
//! async fn main() -> rpc_response_cache::Result<()> {
//!     let policy = CachePolicy::new();
//!     let store = build_store(&policy).await?;
//!     let orchestrator = Arc::new(CacheOrchestrator::new(store, policy.clone()));
//!     let interceptor = CachingInterceptor::new(orchestrator, policy);
//!
//!     let ctx = CallContext::new("calculator.Calculator/Sum");
//!     let request = SumRequest { a: 2, b: 3 };
//!     let response: SumResponse = interceptor
//!         .intercept(&ctx, &request, || async {
//!             Ok::<_, rpc_response_cache::Error>(SumResponse { total: 5 })
//!         })
//!         .await?;
//!     assert_eq!(response.total, 5);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`interceptor`] | Dispatch-path interceptor and call context |
//! | [`orchestrator`] | Get-or-compute orchestration and invalidation |
//! | [`store`] | Backend contract and the memory/Redis implementations |
//! | [`key`] | Cache key derivation from method + request content |
//! | [`config`] | Immutable caching policy |

pub mod config;
pub mod error;
pub mod interceptor;
pub mod key;
pub mod orchestrator;
pub mod store;

// Re-export main types for convenience
pub use config::{BackendKind, CachePolicy};
pub use error::Error;
pub use interceptor::{CachingInterceptor, CallContext};
pub use key::CacheKey;
pub use orchestrator::{CacheOrchestrator, CacheStats};
pub use store::{build_store, CacheStore, MemoryStore, RedisStore};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
