//! # Domain Errors
//!
//! Error types for the Job Reconciler.

use eb_01_ledger_gateway::GatewayError;
use serde::{Deserialize, Serialize};
use shared_types::{JobId, JobInvariantError};
use thiserror::Error;

/// Why a single job record was rejected during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Ledger returned a record for a different id.
    #[error("requested job {requested}, ledger returned {reported}")]
    IdMismatch {
        /// Id that was read.
        requested: JobId,
        /// Id carried in the record.
        reported: JobId,
    },

    /// Record violates the entity invariants.
    #[error(transparent)]
    Invariant(#[from] JobInvariantError),
}

/// What went wrong with one job during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadFailureKind {
    /// The read itself failed.
    Unreadable,
    /// The read succeeded but the record is malformed.
    Malformed,
}

/// A job excluded from a pass. Non-fatal: the rest of the pass stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFailure {
    /// Excluded job.
    pub job_id: JobId,
    /// Failure class.
    pub kind: ReadFailureKind,
    /// Human-readable reason.
    pub reason: String,
}

impl ReadFailure {
    /// The preview read failed.
    pub fn unreadable(job_id: JobId, error: &GatewayError) -> Self {
        Self {
            job_id,
            kind: ReadFailureKind::Unreadable,
            reason: error.to_string(),
        }
    }

    /// The record failed normalization.
    pub fn malformed(job_id: JobId, error: &NormalizeError) -> Self {
        Self {
            job_id,
            kind: ReadFailureKind::Malformed,
            reason: error.to_string(),
        }
    }
}

/// Job Reconciler error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The job counter could not be read; the whole pass is void.
    #[error("job count unavailable: {0}")]
    CountUnavailable(#[source] GatewayError),
}
