//! `DashMap` Cache - Simple Concurrent `HashMap` Backend
//!
//! A lightweight in-memory backend using `DashMap` for concurrent access.
//! No eviction policy and no size limit; `cleanup` is the only thing that
//! reclaims expired entries.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::entry::CacheEntry;
use crate::traits::CacheBackend;

/// Concurrent `HashMap` backend.
///
/// Expired entries are returned as-is on read (the orchestrator inspects
/// the entry's deadline); they are only dropped by `cleanup`, `delete`, or
/// an overwrite.
#[derive(Debug, Default)]
pub struct DashMapCache {
    map: DashMap<String, CacheEntry>,
}

impl DashMapCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[async_trait]
impl CacheBackend for DashMapCache {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.map.get(key).map(|entry| entry.value().clone()))
    }

    async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool> {
        self.map.insert(key.to_string(), entry.clone());
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.map.remove(key).is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.map.clear();
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        let mut removed = 0usize;
        self.map.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            debug!(count = removed, "[DashMap] dropped expired entries");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DashMap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn write_read_delete_roundtrip() {
        let cache = DashMapCache::new();
        let entry = CacheEntry::new(json!({"a": 1}));

        assert!(cache.write("k", &entry).await.unwrap());
        assert_eq!(cache.read("k").await.unwrap(), Some(entry));
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert_eq!(cache.read("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_returns_expired_entries() {
        let cache = DashMapCache::new();
        let entry = CacheEntry::with_ttl(json!(1), Duration::from_millis(0));
        cache.write("k", &entry).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let read_back = cache.read("k").await.unwrap().unwrap();
        assert!(read_back.is_expired());
    }

    #[tokio::test]
    async fn cleanup_drops_only_expired_entries() {
        let cache = DashMapCache::new();
        cache
            .write("dead", &CacheEntry::with_ttl(json!(1), Duration::from_millis(0)))
            .await
            .unwrap();
        cache.write("live", &CacheEntry::new(json!(2))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        cache.cleanup().await.unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.read("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn clear_empties_the_map() {
        let cache = DashMapCache::new();
        cache.write("a", &CacheEntry::new(json!(1))).await.unwrap();
        cache.write("b", &CacheEntry::new(json!(2))).await.unwrap();

        cache.clear().await.unwrap();
        assert!(cache.is_empty());
    }
}
