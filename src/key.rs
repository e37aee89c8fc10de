//! Cache key derivation.
//!
//! A key uniquely identifies one (method, request-content) pair. It is
//! computed as `{method}_{hex(sha256(canonical_bytes))}` where the canonical
//! bytes are the serialized JSON of the request. Two request values with
//! equal content always produce the same key, across distinct instances and
//! across process restarts; keys are never derived from object identity.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::Result;

/// A derived cache key: the rendered lookup string plus the method it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    rendered: String,
    method: String,
}

impl CacheKey {
    /// Derive a key from a fully-qualified method name and the request
    /// payload. Fails only if the request cannot be serialized.
    pub fn derive<Req: Serialize>(method: &str, request: &Req) -> Result<Self> {
        let canonical = serde_json::to_vec(request)?;
        let digest = Sha256::digest(&canonical);
        let fingerprint: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        Ok(Self {
            rendered: format!("{method}_{fingerprint}"),
            method: method.to_string(),
        })
    }

    /// Wrap an already-rendered key, e.g. one recorded earlier for explicit
    /// invalidation.
    pub fn from_raw(rendered: impl Into<String>) -> Self {
        let rendered = rendered.into();
        let method = rendered
            .rsplit_once('_')
            .map(|(m, _)| m.to_string())
            .unwrap_or_default();
        Self { rendered, method }
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::from_raw(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::from_raw(s)
    }
}
