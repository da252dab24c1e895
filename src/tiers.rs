//! Tier Set - Ordered, Named Backend Collection
//!
//! Pure data: an ordered collection of named backend handles. Insertion
//! order is iteration order is probe priority, so tiers should be
//! registered fastest first. The set is immutable once the orchestrator
//! is built.

use crate::error::CacheError;
use crate::traits::CacheBackend;
use std::sync::Arc;

/// One named backend participating in the orchestrator.
#[derive(Clone)]
pub struct Tier {
    name: String,
    backend: Arc<dyn CacheBackend>,
}

impl Tier {
    /// Pair a name with a backend handle.
    pub fn new(name: impl Into<String>, backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }

    /// The tier's name, unique within its set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backend handle.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn CacheBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tier")
            .field("name", &self.name)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Ordered mapping from tier name to backend.
#[derive(Debug, Clone)]
pub struct TierSet {
    tiers: Vec<Tier>,
}

impl TierSet {
    /// Build a set from tiers in probe order.
    ///
    /// # Errors
    ///
    /// Fails with [`CacheError::DuplicateTier`] when two tiers share a name.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, CacheError> {
        for (i, tier) in tiers.iter().enumerate() {
            if tiers.iter().take(i).any(|t| t.name == tier.name) {
                return Err(CacheError::DuplicateTier(tier.name.clone()));
            }
        }
        Ok(Self { tiers })
    }

    /// Every tier, in probe order.
    #[must_use]
    pub fn all(&self) -> &[Tier] {
        &self.tiers
    }

    /// The tiers named in `only`, in probe order. `None` selects all tiers.
    ///
    /// Unknown names are filtered out silently; an empty result is valid.
    #[must_use]
    pub fn select(&self, only: Option<&[String]>) -> Vec<&Tier> {
        match only {
            None => self.tiers.iter().collect(),
            Some(names) => self
                .tiers
                .iter()
                .filter(|tier| names.iter().any(|n| n == &tier.name))
                .collect(),
        }
    }

    /// Look up a tier by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.name == name)
    }

    /// Number of configured tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the set has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
