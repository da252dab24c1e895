//! Tiered Cache Orchestrator
//!
//! Composes an ordered set of backend tiers into one logical cache:
//! read-through probing with early termination and backfill, concurrent
//! fan-out writes and deletes, and increment/decrement serialized behind a
//! single per-instance lock.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, anyhow};
use futures_util::future::join_all;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::entry::CacheEntry;
use crate::error::CacheError;
use crate::events::{EventContext, EventKind, EventReporter, Op};
use crate::options::CacheOptions;
use crate::tiers::{Tier, TierSet};

/// Multi-tier cache orchestrator.
///
/// Callers read, write, delete, and atomically modify values without knowing
/// how many tiers exist or which tier answered. Construct one with
/// [`TieredCacheBuilder`](crate::builder::TieredCacheBuilder).
///
/// # Key Scoping
///
/// Every key is stored as `"{instance_name}:{namespace}:{key}"`, so two
/// orchestrators with different names never collide even when they share a
/// backend.
pub struct TieredCache {
    name: String,
    tiers: TierSet,
    reporter: Arc<dyn EventReporter>,
    /// Serializes every increment/decrement on this instance, across all
    /// keys. Backends are not assumed to support atomic counters.
    counter_lock: Mutex<()>,
    reads: AtomicU64,
    hits: AtomicU64,
    expired_hits: AtomicU64,
    misses: AtomicU64,
    backfills: AtomicU64,
}

impl TieredCache {
    pub(crate) fn new(name: String, tiers: TierSet, reporter: Arc<dyn EventReporter>) -> Self {
        info!(cache = %name, tiers = tiers.len(), "tiered cache ready");
        Self {
            name,
            tiers,
            reporter,
            counter_lock: Mutex::new(()),
            reads: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            expired_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            backfills: AtomicU64::new(0),
        }
    }

    /// This instance's name, the outermost key namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured tiers, in probe order.
    #[must_use]
    pub fn tiers(&self) -> &TierSet {
        &self.tiers
    }

    /// Read a value, probing tiers in configured order and stopping at the
    /// first tier that has the key.
    ///
    /// Tiers that missed before the hit are backfilled with the found entry
    /// before this returns; backfill faults are logged, not surfaced. An
    /// entry past its deadline still stops probing but reads as `None`.
    ///
    /// # Errors
    ///
    /// Propagates the first backend fault encountered while probing.
    pub async fn read(&self, key: &str, options: &CacheOptions) -> Result<Option<Value>> {
        let full_key = self.namespaced_key(key, options);
        let entry = self.read_entry(&full_key, options).await?;
        Ok(entry
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::into_value))
    }

    /// Write a value to every selected tier concurrently.
    ///
    /// Returns `true` when every participating tier stored the value; a
    /// write over zero tiers trivially succeeds. TTL comes from the options.
    ///
    /// # Errors
    ///
    /// Faults if any participating tier's write faults. Writes already
    /// applied to other tiers are not rolled back.
    pub async fn write(&self, key: &str, value: Value, options: &CacheOptions) -> Result<bool> {
        let full_key = self.namespaced_key(key, options);
        let entry = CacheEntry::with_optional_ttl(value, options.entry_ttl());
        self.write_entry(&full_key, &entry, options.only_tiers())
            .await
    }

    /// Delete a key from every selected tier concurrently.
    ///
    /// Returns `true` when at least one tier held the key.
    ///
    /// # Errors
    ///
    /// Faults if any participating tier's delete faults.
    pub async fn delete(&self, key: &str, options: &CacheOptions) -> Result<bool> {
        let full_key = self.namespaced_key(key, options);
        let selected = self.tiers.select(options.only_tiers());
        let removed = self
            .fan_out(EventKind::Delete, &selected, |tier| {
                let backend = Arc::clone(tier.backend());
                let key = full_key.clone();
                async move { backend.delete(&key).await }
            })
            .await?;
        Ok(removed.into_iter().any(|existed| existed))
    }

    /// Add `amount` to the integer stored under `key`.
    ///
    /// Returns the new value, or `None` when the key does not exist (the
    /// key is not created). The whole read-modify-write cycle is serialized
    /// against every other increment/decrement on this instance.
    ///
    /// # Errors
    ///
    /// Faults on a backend fault, or when the stored payload is not an
    /// integer ([`CacheError::NotAnInteger`]).
    pub async fn increment(
        &self,
        key: &str,
        amount: i64,
        options: &CacheOptions,
    ) -> Result<Option<i64>> {
        self.modify_value(key, amount, options).await
    }

    /// Subtract `amount` from the integer stored under `key`.
    ///
    /// Same semantics as [`TieredCache::increment`].
    ///
    /// # Errors
    ///
    /// Faults on a backend fault, or when the stored payload is not an
    /// integer.
    pub async fn decrement(
        &self,
        key: &str,
        amount: i64,
        options: &CacheOptions,
    ) -> Result<Option<i64>> {
        self.modify_value(key, -amount, options).await
    }

    /// Remove every entry from every tier, concurrently.
    ///
    /// Bulk maintenance: no tier selection applies.
    ///
    /// # Errors
    ///
    /// Propagates the first tier fault, in configured order, after all
    /// tiers have been attempted.
    pub async fn clear(&self) -> Result<()> {
        info!(cache = %self.name, "clearing all tiers");
        let results = join_all(self.tiers.all().iter().map(|tier| tier.backend().clear())).await;
        results.into_iter().collect()
    }

    /// Run expired-entry cleanup on every tier, concurrently.
    ///
    /// # Errors
    ///
    /// Propagates the first tier fault, in configured order, after all
    /// tiers have been attempted.
    pub async fn cleanup(&self) -> Result<()> {
        debug!(cache = %self.name, "running cleanup on all tiers");
        let results = join_all(self.tiers.all().iter().map(|tier| tier.backend().cleanup())).await;
        results.into_iter().collect()
    }

    /// Snapshot of this instance's read accounting.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let reads = self.reads.load(Ordering::Relaxed);
        let hits = self.hits.load(Ordering::Relaxed);
        let expired_hits = self.expired_hits.load(Ordering::Relaxed);
        CacheStats {
            reads,
            hits,
            expired_hits,
            misses: self.misses.load(Ordering::Relaxed),
            backfills: self.backfills.load(Ordering::Relaxed),
            hit_rate: if reads > 0 {
                (hits + expired_hits) as f64 / reads as f64 * 100.0
            } else {
                0.0
            },
        }
    }

    // ===== Read-through resolver =====

    /// Probe the selected tiers in order, lazily, stopping at the first
    /// entry found. Tiers that missed before the hit are backfilled.
    async fn read_entry(
        &self,
        full_key: &str,
        options: &CacheOptions,
    ) -> Result<Option<CacheEntry>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let selected = self.tiers.select(options.only_tiers());
        if selected.is_empty() {
            return Ok(None);
        }

        let mut missed: Vec<String> = Vec::new();
        for tier in selected {
            let found = self
                .with_report(EventKind::Read, tier, tier.backend().read(full_key))
                .await?;
            let ctx = EventContext {
                cache_name: &self.name,
                tier_name: tier.name(),
            };
            let Some(entry) = found else {
                self.reporter.note(EventKind::Miss, ctx);
                missed.push(tier.name().to_string());
                continue;
            };

            if entry.is_expired() {
                self.expired_hits.fetch_add(1, Ordering::Relaxed);
                self.reporter.note(EventKind::ExpiredHit, ctx);
            } else {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.reporter.note(EventKind::Hit, ctx);
            }

            if !missed.is_empty() {
                // Warm the earlier tiers so the next read stops sooner.
                // A backfill fault never fails the read: the result is
                // already determined.
                match self.write_entry(full_key, &entry, Some(&missed)).await {
                    Ok(_) => {
                        self.backfills.fetch_add(1, Ordering::Relaxed);
                        debug!(
                            cache = %self.name,
                            key = %full_key,
                            tiers = ?missed,
                            "backfilled tiers that missed"
                        );
                    }
                    Err(error) => {
                        warn!(cache = %self.name, key = %full_key, %error, "backfill failed");
                    }
                }
            }
            return Ok(Some(entry));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    // ===== Fan-out executor =====

    /// Write an already-namespaced entry to the selected tiers concurrently.
    async fn write_entry(
        &self,
        full_key: &str,
        entry: &CacheEntry,
        only: Option<&[String]>,
    ) -> Result<bool> {
        let selected = self.tiers.select(only);
        let written = self
            .fan_out(EventKind::Write, &selected, |tier| {
                let backend = Arc::clone(tier.backend());
                let key = full_key.to_string();
                let entry = entry.clone();
                async move { backend.write(&key, &entry).await }
            })
            .await?;
        Ok(written.into_iter().all(|stored| stored))
    }

    /// Run `op` against every tier concurrently and join all results.
    ///
    /// All operations run to completion; afterwards the first fault, in
    /// configured tier order, propagates. Completed side effects on other
    /// tiers stand.
    async fn fan_out<'t, T, Fut>(
        &self,
        kind: EventKind,
        tiers: &[&'t Tier],
        op: impl Fn(&'t Tier) -> Fut,
    ) -> Result<Vec<T>>
    where
        T: Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let results = join_all(
            tiers
                .iter()
                .copied()
                .map(|tier| self.with_report(kind, tier, op(tier))),
        )
        .await;
        results.into_iter().collect()
    }

    /// Route one per-tier operation through the event reporter.
    ///
    /// The operation writes its output into a slot before resolving, so the
    /// reporter's around-hook stays object-safe while the caller gets the
    /// typed result back.
    async fn with_report<T: Send>(
        &self,
        kind: EventKind,
        tier: &Tier,
        op: impl Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        let ctx = EventContext {
            cache_name: &self.name,
            tier_name: tier.name(),
        };
        let mut out: Option<T> = None;
        {
            let slot = &mut out;
            let wrapped: Op<'_> = Box::pin(async move {
                *slot = Some(op.await?);
                Ok(())
            });
            self.reporter.record(kind, ctx, wrapped).await?;
        }
        out.ok_or_else(|| anyhow!("event reporter did not invoke the wrapped operation"))
    }

    // ===== Atomic counter modifier =====

    /// Globally-serialized read-modify-write. One lock for the whole
    /// instance: unrelated keys contend, by accepted trade-off.
    async fn modify_value(
        &self,
        key: &str,
        delta: i64,
        options: &CacheOptions,
    ) -> Result<Option<i64>> {
        let _guard = self.counter_lock.lock().await;

        let full_key = self.namespaced_key(key, options);
        let Some(entry) = self
            .read_entry(&full_key, options)
            .await?
            .filter(|entry| !entry.is_expired())
        else {
            // Missing counters are not created.
            return Ok(None);
        };

        let current = integer_payload(&full_key, entry.value())?;
        let next = current + delta;
        let updated = CacheEntry::with_optional_ttl(Value::from(next), options.entry_ttl());
        self.write_entry(&full_key, &updated, options.only_tiers())
            .await?;
        Ok(Some(next))
    }

    fn namespaced_key(&self, key: &str, options: &CacheOptions) -> String {
        let namespace = options.namespace_override().unwrap_or("");
        format!("{}:{namespace}:{key}", self.name)
    }
}

/// Interpret a counter payload as an integer.
///
/// JSON integers and strings holding an integer both count; anything else
/// is a fault.
fn integer_payload(key: &str, value: &Value) -> Result<i64, CacheError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if let Some(n) = value.as_str().and_then(|s| s.parse::<i64>().ok()) {
        return Ok(n);
    }
    Err(CacheError::NotAnInteger {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Read accounting for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Read-through cycles started (facade reads plus counter reads).
    pub reads: u64,
    /// Reads answered by a live entry.
    pub hits: u64,
    /// Reads answered by an entry past its deadline.
    pub expired_hits: u64,
    /// Reads that exhausted every selected tier.
    pub misses: u64,
    /// Reads that triggered a successful backfill.
    pub backfills: u64,
    /// Hits (live or expired) as a percentage of reads.
    pub hit_rate: f64,
}
