//! Orchestrator-specific error kinds.
//!
//! Backend faults are deliberately *not* wrapped into a crate error type:
//! they surface to the caller as the `anyhow::Error` the backend produced,
//! since recovery strategy depends on knowing which backend failed.

use thiserror::Error;

/// Faults raised by the orchestrator itself, as opposed to backend faults.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A builder registered the same tier name twice.
    #[error("tier name '{0}' is already registered")]
    DuplicateTier(String),

    /// A builder produced an orchestrator with no tiers at all.
    #[error("at least one tier must be configured")]
    NoTiers,

    /// An increment/decrement found a payload that is not an integer.
    #[error("counter value for key '{key}' is not an integer: {value}")]
    NotAnInteger {
        /// The (namespaced) key that was modified.
        key: String,
        /// The offending payload, rendered as JSON.
        value: String,
    },
}
