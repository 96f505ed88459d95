//! # Session
//!
//! Process-scoped context between `connect` and `logout`.

use eb_01_ledger_gateway::Signer;
use eb_04_job_reconciler::JobSnapshot;
use eb_05_view_projector::Viewer;
use shared_types::{Address, Role};
use std::sync::Arc;

/// Connected account, its role and the latest job snapshot.
///
/// The snapshot is replaced wholesale after each pass, never edited.
#[derive(Debug, Clone)]
pub struct Session {
    /// Connected account and chain.
    pub signer: Signer,
    /// Latest reconciled job set.
    pub snapshot: Arc<JobSnapshot>,
    /// Selected role, `None` until chosen.
    pub role: Option<Role>,
    /// Number of the pass that produced `snapshot`. Only later passes may
    /// replace it.
    pub generation: u64,
    reconciled: bool,
}

impl Session {
    /// Fresh session with an empty, unreconciled board. Passes numbered at
    /// or below `generation` are ignored.
    pub fn new(signer: Signer, role: Option<Role>, generation: u64) -> Self {
        Self {
            signer,
            snapshot: Arc::new(JobSnapshot::empty()),
            role,
            generation,
            reconciled: false,
        }
    }

    /// Swap in the snapshot of pass `generation`.
    pub fn install(&mut self, snapshot: Arc<JobSnapshot>, generation: u64) {
        self.snapshot = snapshot;
        self.generation = generation;
        self.reconciled = true;
    }

    /// Has any pass completed in this session?
    pub fn is_reconciled(&self) -> bool {
        self.reconciled
    }

    /// Connected account.
    pub fn address(&self) -> Address {
        self.signer.address
    }

    /// Viewer for projections.
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.signer.address, self.role)
    }

    /// Does the account have open authored jobs in the current snapshot?
    pub fn has_open_authored_jobs(&self) -> bool {
        self.snapshot.has_open_authored_jobs(&self.signer.address)
    }
}
