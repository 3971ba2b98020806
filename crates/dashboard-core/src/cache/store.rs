//! Cache store trait

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Key/value store with per-entry expiry.
///
/// An entry whose TTL has elapsed must be indistinguishable from one that
/// was never set. Implementations must be safe to share across tasks.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a live entry
    async fn get(&self, key: &str) -> Option<Value>;

    /// Insert or overwrite an entry, live for `ttl` from now
    async fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Drop every expired entry, returning how many were removed
    async fn purge_expired(&self) -> usize;

    /// Hit/miss counters and current entry count
    async fn stats(&self) -> CacheStats;
}
