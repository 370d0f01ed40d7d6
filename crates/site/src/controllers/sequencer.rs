//! Stale-response guard for search.
//!
//! Every search page render mints a controller instance id. The page script
//! numbers each results request it sends with a per-page `seq`, so order is
//! fixed at submit time rather than by arrival. The sequencer keeps the
//! highest `seq` seen per instance; a request holding a lower one has been
//! superseded and its response is dropped, so a slow earlier query can never
//! overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use uuid::Uuid;

/// How long an idle search page keeps its counter.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

const MAX_INSTANCES: u64 = 100_000;

/// Submit order of one results request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    instance: Uuid,
    seq: u64,
}

impl Ticket {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// Highest sequence number seen per search controller instance.
#[derive(Clone)]
pub struct SearchSequencer {
    latest: Cache<Uuid, Arc<AtomicU64>>,
}

impl SearchSequencer {
    #[must_use]
    pub fn new(idle_ttl: Duration) -> Self {
        let latest = Cache::builder()
            .max_capacity(MAX_INSTANCES)
            .time_to_idle(idle_ttl)
            .build();
        Self { latest }
    }

    /// Record request `seq` from `instance` and return its ticket.
    ///
    /// The ticket may already be stale if a later request from the same page
    /// arrived first.
    pub fn admit(&self, instance: Uuid, seq: u64) -> Ticket {
        let counter = self
            .latest
            .get_with(instance, || Arc::new(AtomicU64::new(0)));
        counter.fetch_max(seq, Ordering::SeqCst);
        Ticket { instance, seq }
    }

    /// Whether no later request from the ticket's instance has been seen.
    ///
    /// An instance whose counter has expired has no newer request to defer
    /// to, so its ticket counts as current.
    #[must_use]
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .get(&ticket.instance)
            .is_none_or(|counter| counter.load(Ordering::SeqCst) <= ticket.seq)
    }
}

impl Default for SearchSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}
