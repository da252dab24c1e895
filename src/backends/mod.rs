//! Cache Backend Implementations
//!
//! Reference backends for use as tiers. Any type implementing
//! [`CacheBackend`](crate::traits::CacheBackend) can participate; these two
//! cover the common in-process cases.
//!
//! # Available Backends
//!
//! - **`DashMapCache`** - concurrent `HashMap` with manual TTL bookkeeping,
//!   always available
//! - **`MokaCache`** - bounded cache with automatic eviction (feature:
//!   `moka`, on by default)
//!
//! Distributed tiers (Redis, Memcached, ...) are deliberately out of scope
//! here; implement [`CacheBackend`](crate::traits::CacheBackend) over your
//! client of choice and register it as a slower tier.

pub mod dashmap_cache;

#[cfg(feature = "moka")]
pub mod moka_cache;

pub use dashmap_cache::DashMapCache;

#[cfg(feature = "moka")]
pub use moka_cache::{MokaCache, MokaCacheConfig};
