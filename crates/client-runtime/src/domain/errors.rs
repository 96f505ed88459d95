//! # Client Errors
//!
//! Aggregates the component errors. A failed action aborts only itself:
//! the pending marker is cleared and the session stays valid.

use eb_01_ledger_gateway::GatewayError;
use eb_02_role_store::RoleError;
use eb_04_job_reconciler::{NormalizeError, ReconcileError};
use shared_types::{ActionKind, Address, JobId, JobState};
use thiserror::Error;

/// Client runtime error types.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Ledger access failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Role selection failed.
    #[error(transparent)]
    Role(#[from] RoleError),

    /// The job counter could not be read; the previous snapshot is kept.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// The connected account may not perform this action on this job.
    #[error("{address} may not {action} job {job_id}")]
    Unauthorized {
        /// Attempted action.
        action: ActionKind,
        /// Target job.
        job_id: JobId,
        /// Connected account.
        address: Address,
    },

    /// The job's current state does not allow the action.
    #[error("cannot {action} job {job_id} while it is {state}")]
    InvalidTransition {
        /// Attempted action.
        action: ActionKind,
        /// Target job.
        job_id: JobId,
        /// State the job is in.
        state: JobState,
    },

    /// Applications are only shown to the job's employer.
    #[error("{address} did not post job {job_id}")]
    NotJobEmployer {
        /// Target job.
        job_id: JobId,
        /// Connected account.
        address: Address,
    },

    /// A job re-read before dispatch came back malformed.
    #[error("malformed job record: {0}")]
    Malformed(#[from] NormalizeError),

    /// No wallet session.
    #[error("not connected to a wallet")]
    NotConnected,

    /// The action needs a role and none is selected.
    #[error("select a role before trying to {0}")]
    RoleNotSelected(ActionKind),

    /// The job is not in the current snapshot.
    #[error("job {0} is not on the board")]
    UnknownJob(JobId),

    /// The chosen applicant did not apply to the job.
    #[error("invalid applicant for job {job_id}: {reason}")]
    InvalidApplicant {
        /// Target job.
        job_id: JobId,
        /// What was wrong with the choice.
        reason: String,
    },

    /// A required text field was blank.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

impl ClientError {
    /// Was the signature declined by the user?
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::Gateway(GatewayError::Transaction(
                eb_01_ledger_gateway::TransactionFailure::Rejected
            ))
        )
    }
}
