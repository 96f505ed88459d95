//! Pending-action marker key.

use serde::{Deserialize, Serialize};
use shared_types::{ActionKind, JobId};
use std::fmt;

/// One in-flight action: the action kind and the job it targets.
///
/// `Post` targets [`JobId::UNASSIGNED`] because the id is not known until
/// the ledger assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PendingKey {
    /// Action being performed.
    pub kind: ActionKind,
    /// Target job.
    pub job_id: JobId,
}

impl PendingKey {
    /// Create a key.
    pub fn new(kind: ActionKind, job_id: JobId) -> Self {
        Self { kind, job_id }
    }

    /// Key for the single outstanding post.
    pub fn post() -> Self {
        Self::new(ActionKind::Post, JobId::UNASSIGNED)
    }
}

impl fmt::Display for PendingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.job_id.value())
    }
}
