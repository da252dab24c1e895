//! Moka Cache - Bounded In-Memory Backend
//!
//! In-memory backend on `moka::future::Cache`, suited to the fast tier:
//! bounded capacity with automatic eviction. Per-entry expiry still lives
//! in the entry itself; moka's own TTL acts as an upper bound on residency.

use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::info;

use crate::entry::CacheEntry;
use crate::traits::CacheBackend;

/// Configuration for [`MokaCache`].
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Max number of entries held.
    pub max_capacity: u64,
    /// Upper bound on how long any entry stays resident.
    pub time_to_live: Duration,
    /// Evict entries not touched for this long.
    pub time_to_idle: Duration,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 2000,
            time_to_live: Duration::from_secs(3600),
            time_to_idle: Duration::from_secs(120),
        }
    }
}

/// Bounded in-memory backend with automatic eviction.
pub struct MokaCache {
    cache: Cache<String, CacheEntry>,
}

impl MokaCache {
    /// Create a cache with the given bounds.
    #[must_use]
    pub fn new(config: MokaCacheConfig) -> Self {
        info!(capacity = config.max_capacity, "initializing Moka backend");
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.time_to_live)
            .time_to_idle(config.time_to_idle)
            .build();
        Self { cache }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new(MokaCacheConfig::default())
    }
}

#[async_trait]
impl CacheBackend for MokaCache {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.cache.get(key).await)
    }

    async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool> {
        self.cache.insert(key.to_string(), entry.clone()).await;
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Moka"
    }
}
