//! # Job Snapshot
//!
//! The output of one reconciliation pass. Immutable once built; the next
//! pass produces a new snapshot rather than patching this one.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Job, JobId};

use super::errors::ReadFailure;

/// Every readable, well-formed job at the time of the pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    jobs: Vec<Job>,
    failures: Vec<ReadFailure>,
    job_counter: u64,
}

impl JobSnapshot {
    /// Assemble a snapshot. Jobs and failures are put in id order.
    pub fn new(mut jobs: Vec<Job>, mut failures: Vec<ReadFailure>, job_counter: u64) -> Self {
        jobs.sort_by_key(|job| job.id);
        failures.sort_by_key(|failure| failure.job_id);
        Self {
            jobs,
            failures,
            job_counter,
        }
    }

    /// Snapshot of a ledger with no jobs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Jobs ordered by id.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Jobs excluded from the pass.
    pub fn failures(&self) -> &[ReadFailure] {
        &self.failures
    }

    /// Counter value the pass read.
    pub fn job_counter(&self) -> u64 {
        self.job_counter
    }

    /// Did every job make it into the snapshot?
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Look up a job by id.
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs
            .binary_search_by_key(&id, |job| job.id)
            .ok()
            .map(|i| &self.jobs[i])
    }

    /// Jobs posted by `address` that still accept applications.
    pub fn open_authored_count(&self, address: &Address) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.is_employer(address) && job.is_accepting_applications())
            .count()
    }

    /// Does `address` have any open job it posted?
    pub fn has_open_authored_jobs(&self, address: &Address) -> bool {
        self.open_authored_count(address) > 0
    }
}
