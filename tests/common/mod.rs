//! Common utilities for integration tests
//!
//! Shared infrastructure: a reporter that records every event, backends
//! that count or fail operations, and builders for small tier sets.
#![allow(dead_code)]

use anyhow::{Result, bail};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tiered_cache::backends::DashMapCache;
use tiered_cache::{
    CacheBackend, CacheEntry, EventContext, EventKind, EventReporter, Op, OpResult, async_trait,
};

/// Initialize tracing output for tests (`RUST_LOG` controls the filter).
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// The key the orchestrator actually hands to backends: instance name,
/// namespace (empty by default), then the caller's key.
pub fn full_key(cache_name: &str, key: &str) -> String {
    format!("{cache_name}::{key}")
}

/// Reporter that appends every event to a list, then runs the operation.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(EventKind, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in order, as (kind, tier name).
    pub fn events(&self) -> Vec<(EventKind, String)> {
        self.events.lock().clone()
    }

    /// Recorded event kinds for one tier, in order.
    pub fn events_for(&self, tier: &str) -> Vec<EventKind> {
        self.events
            .lock()
            .iter()
            .filter(|(_, t)| t == tier)
            .map(|(kind, _)| *kind)
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl EventReporter for RecordingReporter {
    async fn record(&self, kind: EventKind, ctx: EventContext<'_>, op: Op<'_>) -> OpResult {
        self.events.lock().push((kind, ctx.tier_name.to_string()));
        op.await
    }

    fn note(&self, kind: EventKind, ctx: EventContext<'_>) {
        self.events.lock().push((kind, ctx.tier_name.to_string()));
    }
}

/// Backend that counts how often each operation is invoked.
#[derive(Default)]
pub struct CountingBackend {
    inner: DashMapCache,
    reads: AtomicU64,
    writes: AtomicU64,
    deletes: AtomicU64,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CacheBackend for CountingBackend {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.inner.write(key, entry).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.inner.delete(key).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }

    async fn cleanup(&self) -> Result<()> {
        self.inner.cleanup().await
    }

    fn name(&self) -> &'static str {
        "Counting"
    }
}

/// Backend whose selected operations always fault. Everything else
/// delegates to an in-memory map.
#[derive(Default)]
pub struct FailingBackend {
    inner: DashMapCache,
    fail_reads: bool,
    fail_writes: bool,
    fail_deletes: bool,
}

impl FailingBackend {
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
        if self.fail_reads {
            bail!("injected read fault");
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool> {
        if self.fail_writes {
            bail!("injected write fault");
        }
        self.inner.write(key, entry).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        if self.fail_deletes {
            bail!("injected delete fault");
        }
        self.inner.delete(key).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }

    async fn cleanup(&self) -> Result<()> {
        self.inner.cleanup().await
    }

    fn name(&self) -> &'static str {
        "Failing"
    }
}

/// A fast/slow pair of map backends, handles kept for direct inspection.
pub fn fast_slow_backends() -> (Arc<DashMapCache>, Arc<DashMapCache>) {
    (Arc::new(DashMapCache::new()), Arc::new(DashMapCache::new()))
}

/// Typed test data.
pub mod test_data {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct User {
        pub id: u64,
        pub name: String,
        pub email: String,
    }

    impl User {
        pub fn new(id: u64) -> Self {
            Self {
                id,
                name: format!("User {id}"),
                email: format!("user{id}@example.com"),
            }
        }
    }
}
