//! Tiered Cache
//!
//! A multi-tier cache orchestrator: compose several independent key/value
//! backends, ordered fastest to slowest, into one logical cache.
//!
//! - **Read-through**: tiers are probed in order, lazily; the first tier
//!   holding the key answers, and tiers that missed are backfilled so the
//!   next read stops sooner
//! - **Fan-out writes/deletes**: one concurrent operation per selected
//!   tier, joined before returning, so latency is bounded by the slowest
//!   tier rather than the sum of all
//! - **Atomic counters**: increment/decrement as a read-modify-write
//!   serialized per instance, with no atomicity assumed of the backends
//! - **Tier selection**: any operation can be restricted to a named subset
//!   of tiers via [`CacheOptions::only`]
//! - **Instrumentation boundary**: an injected [`EventReporter`] wraps
//!   every per-tier call
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tiered_cache::{CacheOptions, TieredCacheBuilder};
//! use tiered_cache::backends::DashMapCache;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = TieredCacheBuilder::new()
//!         .name("sessions")
//!         .tier("fast", Arc::new(DashMapCache::new()))
//!         .tier("slow", Arc::new(DashMapCache::new()))
//!         .build()?;
//!
//!     let opts = CacheOptions::default();
//!     cache
//!         .write("user:1", serde_json::json!({"name": "alice"}), &opts)
//!         .await?;
//!
//!     // Probes "fast" first; on a miss there, a hit in "slow" backfills
//!     // "fast" before returning.
//!     if let Some(value) = cache.read("user:1", &opts).await? {
//!         tracing::info!(%value, "cache hit");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! caller → TieredCache → read:   tier 1 → tier 2 → ... (stop at first hit,
//! │                              then backfill the tiers that missed)
//! │                      write:  ┌ tier 1 ┐
//! │                      delete: │ tier 2 │ concurrent, join all
//! │                              └ tier n ┘
//! └── every per-tier call wrapped by the EventReporter
//! ```
//!
//! Multi-tier writes are not transactional: tiers observe a write at
//! different times and may fail independently. A fault in any participating
//! tier fails the whole operation, but effects already applied elsewhere
//! are not rolled back.

pub mod backends;
pub mod builder;
pub mod entry;
pub mod error;
pub mod events;
pub mod options;
pub mod orchestrator;
pub mod tiers;
pub mod traits;

pub use builder::TieredCacheBuilder;
pub use entry::CacheEntry;
pub use error::CacheError;
pub use events::{EventContext, EventKind, EventReporter, NullReporter, Op, OpResult, TracingReporter};
pub use options::CacheOptions;
pub use orchestrator::{CacheStats, TieredCache};
pub use tiers::{Tier, TierSet};
pub use traits::CacheBackend;

// Re-export async_trait for backend implementors
pub use async_trait::async_trait;
