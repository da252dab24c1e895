//! Cache Backend Trait
//!
//! The capability contract every tier backend must satisfy. The orchestrator
//! treats each backend as an opaque, independently failing dependency: it
//! never looks inside a backend's storage, eviction, or expiration logic.
//!
//! # Example: Custom Backend
//!
//! ```rust,ignore
//! use tiered_cache::{async_trait, CacheBackend, CacheEntry};
//! use anyhow::Result;
//!
//! struct MyBackend { /* ... */ }
//!
//! #[async_trait]
//! impl CacheBackend for MyBackend {
//!     async fn read(&self, key: &str) -> Result<Option<CacheEntry>> {
//!         // fetch and return the entry, if present
//!     }
//!
//!     async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool> {
//!         // store the entry; true on success
//!     }
//!
//!     async fn delete(&self, key: &str) -> Result<bool> {
//!         // remove the key; true if it existed
//!     }
//!
//!     async fn clear(&self) -> Result<()> { /* drop everything */ }
//!
//!     async fn cleanup(&self) -> Result<()> { /* drop expired entries */ }
//! }
//! ```

use crate::entry::CacheEntry;
use anyhow::Result;
use async_trait::async_trait;

/// Capability contract for a single tier backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a fan-out polls one operation per
/// tier concurrently.
///
/// # Expired Entries
///
/// `read` may return an entry whose deadline has already passed; the entry
/// carries its own expiry metadata and the orchestrator evaluates it.
/// Backends are equally free to drop expired entries and report `None`.
///
/// # Faults
///
/// Every operation may fault. The orchestrator does not retry, mask, or
/// translate backend faults; they surface to the caller as-is.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch the entry stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Store `entry` under `key`, replacing any previous entry.
    ///
    /// Returns `true` when the write took effect.
    async fn write(&self, key: &str, entry: &CacheEntry) -> Result<bool>;

    /// Remove the entry under `key`.
    ///
    /// Returns `true` when an entry existed and was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Remove every entry.
    async fn clear(&self) -> Result<()>;

    /// Remove expired entries and perform backend housekeeping.
    async fn cleanup(&self) -> Result<()>;

    /// Backend name, for logging and event reporting.
    fn name(&self) -> &'static str {
        "unknown"
    }
}
