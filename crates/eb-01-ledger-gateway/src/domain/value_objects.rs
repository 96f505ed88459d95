//! # Domain Value Objects
//!
//! One strongly typed shape per ledger operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{ActionKind, Address, JobId, Wei};

/// 32-byte transaction hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for TxHash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(TxHash(bytes))
    }
}

/// Connected wallet account able to sign on the required chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    /// Lowercase account address.
    pub address: Address,
    /// Chain the wallet was verified to be on.
    pub chain_id: u64,
}

/// Snapshot of one job plus its applicant list, as the ledger reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPreview {
    /// Id the ledger stored in the record.
    pub id: JobId,
    /// Posting party.
    pub employer: Address,
    /// Display title.
    pub title: String,
    /// Escrowed budget.
    pub budget: Wei,
    /// Accepting applications.
    pub is_open: bool,
    /// Hired party or the zero address.
    pub freelancer: Address,
    /// Work delivered.
    pub submitted: bool,
    /// Funds released.
    pub paid: bool,
    /// Applicants in application order.
    pub applicants: Vec<Address>,
}

/// Confirmation of a mined state-changing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block the transaction was included in.
    pub block_number: u64,
}

/// A state-changing contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCall {
    /// `postJob(title, description)`, value = budget.
    PostJob {
        /// Job title.
        title: String,
        /// Job description.
        description: String,
    },
    /// `applyToJob(jobId, message, bidWei)`, value = application fee.
    Apply {
        /// Target job.
        job_id: JobId,
        /// Cover message.
        message: String,
        /// Requested amount.
        bid: Wei,
    },
    /// `hireApplicant(jobId, applicant)`.
    Hire {
        /// Target job.
        job_id: JobId,
        /// Applicant to hire.
        applicant: Address,
    },
    /// `submitWork(jobId)`.
    Submit(JobId),
    /// `approveWork(jobId)`.
    Approve(JobId),
    /// `cancelJob(jobId)`.
    Cancel(JobId),
}

impl LedgerCall {
    /// Action kind this call performs.
    pub fn action_kind(&self) -> ActionKind {
        match self {
            LedgerCall::PostJob { .. } => ActionKind::Post,
            LedgerCall::Apply { .. } => ActionKind::Apply,
            LedgerCall::Hire { .. } => ActionKind::Hire,
            LedgerCall::Submit(_) => ActionKind::Submit,
            LedgerCall::Approve(_) => ActionKind::Approve,
            LedgerCall::Cancel(_) => ActionKind::Cancel,
        }
    }

    /// Target job, or [`JobId::UNASSIGNED`] for a post.
    pub fn job_id(&self) -> JobId {
        match self {
            LedgerCall::PostJob { .. } => JobId::UNASSIGNED,
            LedgerCall::Apply { job_id, .. } | LedgerCall::Hire { job_id, .. } => *job_id,
            LedgerCall::Submit(id) | LedgerCall::Approve(id) | LedgerCall::Cancel(id) => *id,
        }
    }

    /// Does the contract function accept attached value?
    pub fn is_payable(&self) -> bool {
        matches!(self, LedgerCall::PostJob { .. } | LedgerCall::Apply { .. })
    }
}
