//! # Action Guard
//!
//! Process-local set of in-flight (action, job) pairs. At most one instance
//! of each pair is outstanding at a time; different pairs never block each
//! other. Nothing is persisted.

use parking_lot::Mutex;
use shared_types::{ActionKind, JobId};
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{GuardStats, GuardStatsSnapshot, PendingKey};
use crate::ports::PendingQuery;

#[derive(Debug, Default)]
struct GuardInner {
    pending: Mutex<HashSet<PendingKey>>,
    stats: GuardStats,
}

/// Action Guard - cheap to clone, clones share one pending set.
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    inner: Arc<GuardInner>,
}

impl ActionGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `(kind, job_id)` as in flight.
    ///
    /// Returns `false` if it already was; the caller should drop the
    /// request silently.
    pub fn begin(&self, kind: ActionKind, job_id: JobId) -> bool {
        let key = PendingKey::new(kind, job_id);
        let inserted = self.inner.pending.lock().insert(key);
        if inserted {
            self.inner.stats.total_begun.fetch_add(1, Ordering::Relaxed);
            debug!(action = %kind, job_id = job_id.value(), "Action pending");
        } else {
            self.inner
                .stats
                .total_duplicates
                .fetch_add(1, Ordering::Relaxed);
            warn!(action = %kind, job_id = job_id.value(), "Duplicate action ignored");
        }
        inserted
    }

    /// Clear the marker. Clearing an absent marker is a no-op.
    pub fn end(&self, kind: ActionKind, job_id: JobId) {
        let removed = self
            .inner
            .pending
            .lock()
            .remove(&PendingKey::new(kind, job_id));
        if removed {
            self.inner
                .stats
                .total_completed
                .fetch_add(1, Ordering::Relaxed);
            debug!(action = %kind, job_id = job_id.value(), "Action settled");
        }
    }

    /// [`ActionGuard::begin`] returning a ticket that calls
    /// [`ActionGuard::end`] when dropped, on every exit path.
    pub fn try_acquire(&self, kind: ActionKind, job_id: JobId) -> Option<PendingTicket> {
        self.begin(kind, job_id).then(|| PendingTicket {
            guard: self.clone(),
            key: PendingKey::new(kind, job_id),
        })
    }

    /// Number of actions in flight.
    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().len()
    }

    /// Copy of the in-flight set.
    pub fn pending(&self) -> HashSet<PendingKey> {
        self.inner.pending.lock().clone()
    }

    /// Get statistics
    pub fn stats(&self) -> GuardStatsSnapshot {
        self.inner.stats.snapshot()
    }
}

impl PendingQuery for ActionGuard {
    fn is_pending(&self, kind: ActionKind, job_id: JobId) -> bool {
        self.inner
            .pending
            .lock()
            .contains(&PendingKey::new(kind, job_id))
    }
}

/// Proof that an action is in flight; clears the marker on drop.
#[derive(Debug)]
#[must_use = "dropping the ticket immediately clears the pending marker"]
pub struct PendingTicket {
    guard: ActionGuard,
    key: PendingKey,
}

impl PendingTicket {
    /// Marker this ticket holds.
    pub fn key(&self) -> PendingKey {
        self.key
    }
}

impl Drop for PendingTicket {
    fn drop(&mut self) {
        self.guard.end(self.key.kind, self.key.job_id);
    }
}
