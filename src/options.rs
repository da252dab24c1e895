//! Per-Call Cache Options
//!
//! A single options value rides along every public operation: which tiers
//! participate, which namespace scopes the key, and how long written entries
//! live.

use std::time::Duration;

/// Per-call directives for a cache operation.
///
/// The default value means: all tiers participate, no extra namespace, and
/// written entries never expire.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tiered_cache::CacheOptions;
///
/// let opts = CacheOptions::default()
///     .only(["fast"])
///     .namespace("sessions")
///     .ttl(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    only: Option<Vec<String>>,
    namespace: Option<String>,
    ttl: Option<Duration>,
}

impl CacheOptions {
    /// Restrict the operation to the named tiers.
    ///
    /// Names that match no configured tier are silently ignored (filter
    /// semantics): restricting to an unknown tier yields an operation over
    /// zero tiers, not an error.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Scope keys under an additional caller-supplied namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Give written entries a time-to-live. Without it, entries never expire.
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The tier restriction, if any.
    #[must_use]
    pub fn only_tiers(&self) -> Option<&[String]> {
        self.only.as_deref()
    }

    /// The caller-supplied namespace, if any.
    #[must_use]
    pub fn namespace_override(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The TTL for written entries, if any.
    #[must_use]
    pub fn entry_ttl(&self) -> Option<Duration> {
        self.ttl
    }
}
