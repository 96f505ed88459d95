//! # Notices and Outcomes

use eb_01_ledger_gateway::{TxHash, TxReceipt};
use shared_types::{ActionKind, Address, JobId, Role};
use std::fmt;

/// Something the user should be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Wallet connected.
    Connected {
        /// Connected account.
        address: Address,
        /// Chain it signs on.
        chain_id: u64,
    },
    /// Role stored for the connected account.
    RoleSelected(Role),
    /// Session ended.
    LoggedOut,
    /// A transaction confirmed.
    ActionConfirmed {
        /// Action performed.
        action: ActionKind,
        /// Target job (`#0` for a post).
        job_id: JobId,
        /// Mined transaction.
        tx_hash: TxHash,
    },
    /// An action failed and was abandoned.
    ActionFailed {
        /// Action attempted.
        action: ActionKind,
        /// Target job.
        job_id: JobId,
        /// Error text.
        reason: String,
    },
    /// The same action is still outstanding.
    AlreadyPending {
        /// Action attempted.
        action: ActionKind,
        /// Target job.
        job_id: JobId,
    },
    /// Some jobs could not be read and are not shown.
    PartialRead {
        /// Excluded job ids.
        excluded: Vec<JobId>,
    },
    /// The board could not be refreshed.
    RefreshFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected { address, chain_id } => {
                write!(f, "Connected as {address} on chain {chain_id}")
            }
            Notice::RoleSelected(role) => write!(f, "Acting as {role}"),
            Notice::LoggedOut => f.write_str("Logged out"),
            Notice::ActionConfirmed {
                action,
                job_id,
                tx_hash,
            } => {
                if *job_id == JobId::UNASSIGNED {
                    write!(f, "{action} confirmed ({tx_hash})")
                } else {
                    write!(f, "{action} on job {job_id} confirmed ({tx_hash})")
                }
            }
            Notice::ActionFailed {
                action,
                job_id,
                reason,
            } => write!(f, "{action} on job {job_id} failed: {reason}"),
            Notice::AlreadyPending { action, job_id } => {
                write!(f, "{action} on job {job_id} is already in progress")
            }
            Notice::PartialRead { excluded } => {
                let ids: Vec<String> = excluded.iter().map(ToString::to_string).collect();
                write!(f, "Could not read jobs {}", ids.join(", "))
            }
            Notice::RefreshFailed(reason) => write!(f, "Could not refresh jobs: {reason}"),
        }
    }
}

/// Result of a state-changing action that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Mined; the board was re-read afterwards.
    Confirmed(TxReceipt),
    /// An identical action was still in flight; nothing was sent.
    AlreadyPending,
}

impl ActionOutcome {
    /// Did a transaction confirm?
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ActionOutcome::Confirmed(_))
    }
}

/// Which applicant to hire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantChoice {
    /// Position in application order, starting at 1.
    Index(usize),
    /// Applicant address.
    Address(Address),
}

impl std::str::FromStr for ApplicantChoice {
    type Err = String;

    /// `0x`-prefixed input is an address, anything else a 1-based index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            s.parse()
                .map(ApplicantChoice::Address)
                .map_err(|e| e.to_string())
        } else {
            s.parse()
                .map(ApplicantChoice::Index)
                .map_err(|_| format!("expected an applicant number or address, got {s:?}"))
        }
    }
}
