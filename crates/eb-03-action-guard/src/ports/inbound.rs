//! # Inbound Ports

use shared_types::{ActionKind, JobId};
use std::collections::HashSet;

use crate::domain::PendingKey;

/// Read-only question "is this action in flight?".
///
/// Lets projections grey out actions without holding the guard itself.
pub trait PendingQuery {
    /// Is `(kind, job_id)` currently pending?
    fn is_pending(&self, kind: ActionKind, job_id: JobId) -> bool;
}

/// Nothing is ever pending.
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingPending;

impl PendingQuery for NothingPending {
    fn is_pending(&self, _kind: ActionKind, _job_id: JobId) -> bool {
        false
    }
}

impl PendingQuery for HashSet<PendingKey> {
    fn is_pending(&self, kind: ActionKind, job_id: JobId) -> bool {
        self.contains(&PendingKey::new(kind, job_id))
    }
}

impl<Q: PendingQuery + ?Sized> PendingQuery for &Q {
    fn is_pending(&self, kind: ActionKind, job_id: JobId) -> bool {
        (**self).is_pending(kind, job_id)
    }
}
