//! Cache capability: the key-value contract used to skip recomputation.
//!
//! The cache is a thin accelerator, not a system of record. The core never
//! opens, closes, or manages a backend's lifecycle; the caller owns the
//! capability and hands in a shared reference per conversion. The core
//! issues one `get` and at most one `put` per call and assumes the backend
//! handles concurrent access safely on its own.
//!
//! A miss is a normal outcome and travels as `Ok(None)`, never as an error.
//! Real errors (backend down, undecodable entry) degrade the conversion to
//! "cache unavailable, recompute" — they are logged and swallowed, never
//! surfaced to the caller.
//!
//! No eviction, TTL, or invalidation is defined here. Entries are keyed by
//! content+configuration fingerprint, so a key is only ever written with one
//! logical value; concurrent writers of the same key are last-writer-wins.

use crate::error::CacheError;
use crate::output::Rendered;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Key-value contract for conversion-result caching.
///
/// Implementations must be safe to share across concurrent conversions.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up a previously stored record. `Ok(None)` is the miss signal.
    async fn get(&self, key: &str) -> Result<Option<Rendered>, CacheError>;

    /// Store a record under the given fingerprint.
    async fn put(&self, key: &str, value: &Rendered) -> Result<(), CacheError>;
}

/// In-process cache backed by a `HashMap` behind an async `RwLock`.
///
/// Suitable for embedding in a long-lived service and for tests. Unbounded:
/// fingerprint keys are unique per (document, options) pair, so growth is
/// proportional to the number of distinct inputs seen.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Rendered>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Rendered>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &Rendered) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Cache lookup with degradation: a backend error counts as a miss.
pub(crate) async fn try_get(cache: &Arc<dyn Cache>, key: &str) -> Option<Rendered> {
    match cache.get(key).await {
        Ok(hit) => hit,
        Err(e) => {
            warn!("cache lookup failed for {key}, recomputing: {e}");
            None
        }
    }
}

/// Cache store with degradation: a backend error is logged and dropped.
///
/// Awaited by the orchestrator before the conversion resolves, so a caller
/// that exits immediately after awaiting the result cannot race the write.
pub(crate) async fn try_put(cache: &Arc<dyn Cache>, key: &str, record: &Rendered) {
    if let Err(e) = cache.put(key, record).await {
        warn!("cache store failed for {key}: {e}");
    }
}
