//! Process-local cache store

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::store::{CacheStats, CacheStore};

struct Entry {
    value: Value,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory TTL cache with lazy eviction.
///
/// Expired entries are dropped when read and by `purge_expired`. With
/// `max_entries` set, inserting a new key into a full cache first purges
/// expired entries, then evicts the entry closest to expiry. A bound of zero
/// stores nothing.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCache {
    /// Create a new in-memory cache
    pub fn new(max_entries: Option<usize>) -> Self {
        match max_entries {
            Some(0) => info!("Initializing in-memory cache (disabled, max_entries: 0)"),
            Some(max) => info!("Initializing in-memory cache (max_entries: {})", max),
            None => info!("Initializing in-memory cache (unbounded)"),
        }

        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Make room for one more key. Caller holds the write lock.
    fn make_room(entries: &mut HashMap<String, Entry>, max: usize, now: Instant) {
        if entries.len() < max {
            return;
        }

        entries.retain(|_, entry| entry.is_live(now));
        if entries.len() < max {
            return;
        }

        let victim = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = victim {
            debug!("Cache full, evicting: {}", key);
            entries.remove(&key);
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    self.record_hit();
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.record_miss();
                    return None;
                }
            }
        }

        // Expired. Re-check under the write lock: a concurrent set may have
        // refreshed it since we let go of the read lock.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        self.record_miss();
        None
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        if self.max_entries == Some(0) {
            debug!("Cache disabled (max_entries = 0), not storing {}", key);
            return;
        }

        let now = Instant::now();
        let mut entries = self.entries.write();

        if let Some(max) = self.max_entries
            && !entries.contains_key(key)
        {
            Self::make_room(&mut entries, max, now);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.read().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_zero_bound_stores_nothing() {
        let cache = MemoryCache::new(Some(0));

        cache.set("k", json!(1), Duration::from_secs(60)).await;

        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_returns_value_within_ttl() {
        let cache = MemoryCache::default();
        cache.set("weather_london", json!({"temperature": 13}), Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(59)).await;

        assert_eq!(cache.get("weather_london").await, Some(json!({"temperature": 13})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent() {
        let cache = MemoryCache::default();
        cache.set("weather_london", json!(1), Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(cache.get("weather_london").await, None);
        assert_eq!(cache.get("never_set").await, None);
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_after_expiry_gets_fresh_ttl() {
        let cache = MemoryCache::default();
        cache.set("news_general_us", json!("old"), Duration::from_secs(900)).await;
        tokio::time::advance(Duration::from_secs(901)).await;
        assert_eq!(cache.get("news_general_us").await, None);

        cache.set("news_general_us", json!("new"), Duration::from_secs(900)).await;
        tokio::time::advance(Duration::from_secs(899)).await;

        assert_eq!(cache.get("news_general_us").await, Some(json!("new")));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = MemoryCache::default();
        cache.set("k", json!(1), Duration::from_secs(60)).await;
        cache.set("k", json!(2), Duration::from_secs(60)).await;

        assert_eq!(cache.get("k").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_never_returned() {
        let cache = MemoryCache::default();
        cache.set("k", json!(1), Duration::ZERO).await;

        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = MemoryCache::default();
        cache.set("short", json!(1), Duration::from_secs(10)).await;
        cache.set("long", json!(2), Duration::from_secs(100)).await;

        tokio::time::advance(Duration::from_secs(11)).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.stats().await.entries, 1);
        assert_eq!(cache.get("long").await, Some(json!(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_cache_evicts_soonest_expiry() {
        let cache = MemoryCache::new(Some(2));
        cache.set("a", json!("a"), Duration::from_secs(30)).await;
        cache.set("b", json!("b"), Duration::from_secs(300)).await;
        cache.set("c", json!("c"), Duration::from_secs(60)).await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some(json!("b")));
        assert_eq!(cache.get("c").await, Some(json!("c")));

        // Overwriting an existing key never evicts
        cache.set("b", json!("b2"), Duration::from_secs(300)).await;
        assert_eq!(cache.stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_stats_count_hits_and_misses() {
        let cache = MemoryCache::default();
        cache.set("k", json!(1), Duration::from_secs(60)).await;

        cache.get("k").await;
        cache.get("k").await;
        cache.get("missing").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        let cache = Arc::new(MemoryCache::default());

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    let key = format!("github_user_{}", i % 8);
                    cache.set(&key, json!(i), Duration::from_secs(60)).await;
                    cache.get(&key).await
                })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            assert!(result.unwrap().is_some());
        }
        assert_eq!(cache.stats().await.entries, 8);
    }
}
