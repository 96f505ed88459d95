//! # Job Reconciler
//!
//! Pulls the entire job set from the ledger and normalizes it. There is no
//! incremental path: every pass reads the counter, then every id from 1 to
//! the counter, in order.

use eb_01_ledger_gateway::LedgerGateway;
use futures::future::join_all;
use shared_types::JobId;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::algorithms::normalize;
use crate::config::ReconcilerConfig;
use crate::domain::{JobSnapshot, ReadFailure, ReconcileError};

/// Job Reconciler - full pass over the ledger.
pub struct JobReconciler<G: LedgerGateway + ?Sized> {
    gateway: Arc<G>,
    config: ReconcilerConfig,
}

impl<G: LedgerGateway + ?Sized> JobReconciler<G> {
    /// Create a reconciler reading through `gateway`.
    pub fn new(gateway: Arc<G>, config: ReconcilerConfig) -> Self {
        Self { gateway, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Read and normalize every job.
    ///
    /// Per-job read and normalization failures are logged, recorded in the
    /// snapshot and excluded. Only a failed counter read fails the pass.
    pub async fn reconcile_all(&self) -> Result<JobSnapshot, ReconcileError> {
        let started = Instant::now();
        let count = self
            .gateway
            .job_count()
            .await
            .map_err(ReconcileError::CountUnavailable)?;

        let ids: Vec<JobId> = (1..=count).map(JobId).collect();
        let mut jobs = Vec::with_capacity(ids.len());
        let mut failures = Vec::new();

        for batch in ids.chunks(self.config.effective_batch_size()) {
            let reads = batch.iter().map(|&id| async move {
                (id, self.gateway.job_preview(id).await)
            });

            for (id, result) in join_all(reads).await {
                match result {
                    Ok(preview) => match normalize(preview, id) {
                        Ok(job) => jobs.push(job),
                        Err(e) => {
                            warn!(job_id = id.value(), error = %e, "Skipping malformed job");
                            failures.push(ReadFailure::malformed(id, &e));
                        }
                    },
                    Err(e) => {
                        warn!(job_id = id.value(), error = %e, "Skipping unreadable job");
                        failures.push(ReadFailure::unreadable(id, &e));
                    }
                }
            }
            debug!(batch = batch.len(), "Read batch of job previews");
        }

        info!(
            counter = count,
            jobs = jobs.len(),
            failures = failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Reconciliation pass complete"
        );
        Ok(JobSnapshot::new(jobs, failures, count))
    }
}
