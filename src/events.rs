//! Event Reporter - Per-Tier Instrumentation Boundary
//!
//! Every per-tier backend call made by the orchestrator is routed through an
//! injected [`EventReporter`]. The reporter is an around-hook: it receives
//! the operation as a boxed future, must await it exactly once, and returns
//! its result. What a reporter records (timing, counters, spans) is its own
//! business; orchestrator correctness only requires that it neither skips
//! the operation nor suppresses its fault.
//!
//! Hit/miss outcomes have no wrapped operation and arrive through
//! [`EventReporter::note`].

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::time::Instant;
use tracing::{debug, warn};

/// What happened at a tier, from the orchestrator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A backend read is being issued.
    Read,
    /// A backend write is being issued.
    Write,
    /// A backend delete is being issued.
    Delete,
    /// A read found a live entry at this tier.
    Hit,
    /// A read found an entry at this tier, but it was past its deadline.
    ExpiredHit,
    /// A read found nothing at this tier.
    Miss,
}

impl EventKind {
    /// Stable lowercase label, for logging and metrics keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Hit => "hit",
            Self::ExpiredHit => "expired_hit",
            Self::Miss => "miss",
        }
    }
}

/// Identifies where an event happened.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    /// Name of the orchestrator instance.
    pub cache_name: &'a str,
    /// Name of the tier involved.
    pub tier_name: &'a str,
}

/// Result of a wrapped per-tier operation.
///
/// The operation's real output is written into a slot owned by the
/// orchestrator before the future resolves, so the hook only ever sees
/// success or fault.
pub type OpResult = anyhow::Result<()>;

/// A per-tier operation handed to the reporter.
pub type Op<'a> = BoxFuture<'a, OpResult>;

/// Around-hook invoked for every per-tier backend call.
#[async_trait]
pub trait EventReporter: Send + Sync {
    /// Run `op`, recording whatever the reporter cares about around it.
    ///
    /// Implementations must await `op` exactly once and return its result,
    /// propagating a fault unchanged. Skipping the operation makes the
    /// orchestrator fail the call.
    async fn record(&self, kind: EventKind, ctx: EventContext<'_>, op: Op<'_>) -> OpResult;

    /// Record a point event with no wrapped operation (hit/miss outcomes).
    fn note(&self, kind: EventKind, ctx: EventContext<'_>);
}

/// Default reporter: logs every per-tier call through `tracing`, with
/// elapsed time.
#[derive(Debug, Default)]
pub struct TracingReporter;

#[async_trait]
impl EventReporter for TracingReporter {
    async fn record(&self, kind: EventKind, ctx: EventContext<'_>, op: Op<'_>) -> OpResult {
        let started = Instant::now();
        let result = op.await;
        let elapsed = started.elapsed();
        match &result {
            Ok(()) => debug!(
                cache = %ctx.cache_name,
                tier = %ctx.tier_name,
                event = kind.as_str(),
                elapsed_us = elapsed.as_micros() as u64,
                "tier operation completed"
            ),
            Err(error) => warn!(
                cache = %ctx.cache_name,
                tier = %ctx.tier_name,
                event = kind.as_str(),
                elapsed_us = elapsed.as_micros() as u64,
                %error,
                "tier operation faulted"
            ),
        }
        result
    }

    fn note(&self, kind: EventKind, ctx: EventContext<'_>) {
        debug!(
            cache = %ctx.cache_name,
            tier = %ctx.tier_name,
            event = kind.as_str(),
            "tier outcome"
        );
    }
}

/// Reporter that records nothing. The wrapped operation still runs.
#[derive(Debug, Default)]
pub struct NullReporter;

#[async_trait]
impl EventReporter for NullReporter {
    async fn record(&self, _kind: EventKind, _ctx: EventContext<'_>, op: Op<'_>) -> OpResult {
        op.await
    }

    fn note(&self, _kind: EventKind, _ctx: EventContext<'_>) {}
}
