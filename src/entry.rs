//! Cache Entry - Value Plus Expiry Metadata
//!
//! The unit moved between tiers and the caller. Entries are immutable once
//! produced by a backend; the orchestrator only decides whether to propagate
//! them, never rewrites their payload.

use serde_json::Value;
use std::time::{Duration, Instant};

/// A cached value together with its expiry metadata.
///
/// Expiry is evaluated lazily: `is_expired()` compares the embedded deadline
/// against the clock at call time. Backends may hand back entries that are
/// already past their deadline; the orchestrator decides what that means.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Create an entry that never expires.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Create an entry that expires `ttl` from now.
    #[must_use]
    pub fn with_ttl(value: Value, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    /// Create an entry with an optional TTL, as carried by per-call options.
    #[must_use]
    pub fn with_optional_ttl(value: Value, ttl: Option<Duration>) -> Self {
        match ttl {
            Some(ttl) => Self::with_ttl(value, ttl),
            None => Self::new(value),
        }
    }

    /// Borrow the payload.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the entry, yielding its payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether the entry's deadline has passed. Entries without a deadline
    /// never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() > expires_at)
    }

    /// The absolute deadline, if any.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}
