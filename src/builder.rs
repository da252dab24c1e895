//! Tiered Cache Builder
//!
//! Assembles an orchestrator from named backends. Tier registration order
//! is probe order, so register the fastest tier first.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tiered_cache::TieredCacheBuilder;
//! use tiered_cache::backends::DashMapCache;
//!
//! # fn example() -> anyhow::Result<()> {
//! let cache = TieredCacheBuilder::new()
//!     .name("sessions")
//!     .tier("fast", Arc::new(DashMapCache::new()))
//!     .tier("slow", Arc::new(DashMapCache::new()))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::events::{EventReporter, TracingReporter};
use crate::orchestrator::TieredCache;
use crate::tiers::{Tier, TierSet};
use crate::traits::CacheBackend;

/// Builder for [`TieredCache`].
///
/// The tier set and reporter are fixed at build time; there is no dynamic
/// add/remove afterwards.
pub struct TieredCacheBuilder {
    name: Option<String>,
    tiers: Vec<Tier>,
    reporter: Option<Arc<dyn EventReporter>>,
}

impl TieredCacheBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            tiers: Vec::new(),
            reporter: None,
        }
    }

    /// Name this orchestrator instance. The name prefixes every key, so two
    /// differently-named instances never collide on a shared backend.
    ///
    /// Defaults to the empty string.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Register a tier. Registration order is probe order.
    #[must_use]
    pub fn tier(mut self, name: impl Into<String>, backend: Arc<dyn CacheBackend>) -> Self {
        self.tiers.push(Tier::new(name, backend));
        self
    }

    /// Install an event reporter. Defaults to [`TracingReporter`].
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn EventReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    ///
    /// Fails when no tiers were registered or two tiers share a name.
    pub fn build(self) -> Result<TieredCache> {
        if self.tiers.is_empty() {
            return Err(crate::error::CacheError::NoTiers.into());
        }
        let tiers = TierSet::new(self.tiers)?;
        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(TracingReporter) as Arc<dyn EventReporter>);
        Ok(TieredCache::new(
            self.name.unwrap_or_default(),
            tiers,
            reporter,
        ))
    }
}

impl Default for TieredCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
