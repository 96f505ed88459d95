//! # Core Domain Entities
//!
//! Types shared by every escrow-board component: addresses, amounts, job
//! identity, roles, action kinds and the canonical `Job` entity with its
//! per-job state machine.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `JobId`, `Role`
//! - **Ledger snapshot**: `Job`, `ApplicationRecord`, `Wei`
//! - **Lifecycle**: `JobState`, `ActionKind`

use std::fmt;
use std::str::FromStr;

use primitive_types::H160;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{JobInvariantError, ParseAddressError, ParseRoleError};

// Re-export U256 from primitive-types for use across all components
pub use primitive_types::U256;

/// Amount in the smallest currency unit (wei).
pub type Wei = U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte account address.
///
/// Always rendered lowercase with a `0x` prefix, so two addresses compare
/// equal regardless of the checksum casing they were entered with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub H160);

impl Address {
    /// The zero address. The ledger uses it as the "none" sentinel for an
    /// unassigned freelancer.
    pub const ZERO: Address = Address(H160([0u8; 20]));

    /// Build an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(H160(bytes))
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_fixed_bytes()
    }

    /// Is this the zero ("none") address?
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Abbreviated form for display (`0x1234…abcd`).
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ParseAddressError::MissingPrefix(trimmed.to_string()))?;

        if hex_part.len() != 40 {
            return Err(ParseAddressError::InvalidLength(hex_part.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|_| ParseAddressError::InvalidHex(trimmed.to_string()))?;
        Ok(Address::from_bytes(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address::from_bytes(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(de::Error::custom)
    }
}

/// Ledger-assigned job identifier. Real jobs start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl JobId {
    /// Sentinel used for actions that have no job yet (posting).
    pub const UNASSIGNED: JobId = JobId(0);

    /// Raw numeric id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        JobId(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Client-local role gating which actions an address may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts jobs, hires, approves, cancels.
    Employer,
    /// Applies to jobs and submits work.
    Freelancer,
}

impl Role {
    /// Stable lowercase name (also the persisted form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employer => "employer",
            Role::Freelancer => "freelancer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employer" => Ok(Role::Employer),
            "freelancer" => Ok(Role::Freelancer),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Kinds of state-changing actions a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Post a new job (escrows the budget).
    Post,
    /// Apply to an open job (pays the application fee).
    Apply,
    /// Hire one applicant.
    Hire,
    /// Mark work as delivered.
    Submit,
    /// Approve delivered work and release funds.
    Approve,
    /// Cancel an open job and refund the budget.
    Cancel,
}

impl ActionKind {
    /// Every action kind, in lifecycle order.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Post,
        ActionKind::Apply,
        ActionKind::Hire,
        ActionKind::Submit,
        ActionKind::Approve,
        ActionKind::Cancel,
    ];

    /// Lowercase action name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Post => "post",
            ActionKind::Apply => "apply",
            ActionKind::Hire => "hire",
            ActionKind::Submit => "submit",
            ActionKind::Approve => "approve",
            ActionKind::Cancel => "cancel",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER B: LEDGER SNAPSHOT
// =============================================================================

/// Canonical job entity, rebuilt wholesale on every reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Ledger-assigned id (> 0).
    pub id: JobId,
    /// Posting party.
    pub employer: Address,
    /// Display title.
    pub title: String,
    /// Display description (empty when the source read does not carry it).
    pub description: String,
    /// Escrowed budget in wei.
    pub budget: Wei,
    /// Accepting applications.
    pub is_open: bool,
    /// Hired party, `Address::ZERO` when none.
    pub freelancer: Address,
    /// Work delivered.
    pub submitted: bool,
    /// Funds released.
    pub paid: bool,
    /// Applicants in application order.
    pub applicants: Vec<Address>,
}

impl Job {
    /// Has a freelancer been hired?
    pub fn has_freelancer(&self) -> bool {
        !self.freelancer.is_zero()
    }

    /// Did `address` post this job?
    pub fn is_employer(&self, address: &Address) -> bool {
        self.employer == *address
    }

    /// Is `address` the hired freelancer?
    pub fn is_freelancer(&self, address: &Address) -> bool {
        self.has_freelancer() && self.freelancer == *address
    }

    /// Did `address` apply to this job?
    pub fn has_applied(&self, address: &Address) -> bool {
        self.applicants.contains(address)
    }

    /// Open for applications with nobody hired.
    pub fn is_accepting_applications(&self) -> bool {
        self.is_open && !self.has_freelancer()
    }

    /// Lifecycle state by flag precedence.
    ///
    /// Only meaningful for jobs that passed [`Job::verify`]; the reconciler
    /// never emits any other kind.
    pub fn state(&self) -> JobState {
        if self.paid {
            JobState::Paid
        } else if self.submitted {
            JobState::Submitted
        } else if self.has_freelancer() {
            JobState::Assigned
        } else if self.is_open {
            JobState::Open
        } else {
            JobState::Cancelled
        }
    }

    /// Check the entity invariants.
    ///
    /// # Errors
    /// The first violated invariant.
    pub fn verify(&self) -> Result<(), JobInvariantError> {
        if self.id.0 == 0 {
            return Err(JobInvariantError::InvalidId);
        }
        if self.employer.is_zero() {
            return Err(JobInvariantError::ZeroEmployer);
        }
        if self.paid && !self.submitted {
            return Err(JobInvariantError::PaidWithoutSubmission);
        }
        if (self.submitted || self.paid) && !self.has_freelancer() {
            return Err(JobInvariantError::MissingFreelancer);
        }
        if self.has_freelancer() && self.freelancer == self.employer {
            return Err(JobInvariantError::EmployerIsFreelancer);
        }
        Ok(())
    }
}

/// One application as recorded by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Applicant address.
    pub applicant: Address,
    /// Free-form cover message.
    pub message: String,
    /// Requested amount in wei.
    pub bid: Wei,
}

// =============================================================================
// CLUSTER C: LIFECYCLE
// =============================================================================

/// Per-job lifecycle state.
///
/// ```text
/// Open ──hire──→ Assigned ──submit──→ Submitted ──approve──→ Paid
///   │
///   └──cancel──→ Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// Accepting applications.
    Open,
    /// Freelancer hired, work not delivered.
    Assigned,
    /// Work delivered, awaiting approval.
    Submitted,
    /// Funds released (terminal).
    Paid,
    /// Closed without hire, budget refunded (terminal).
    Cancelled,
}

impl JobState {
    /// Verify `job` and classify it.
    ///
    /// The cancelled state is never carried explicitly by the ledger, so the
    /// flag combination is checked before it is inferred.
    pub fn classify(job: &Job) -> Result<JobState, JobInvariantError> {
        job.verify()?;
        Ok(job.state())
    }

    /// No transition leaves this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Paid | JobState::Cancelled)
    }

    /// State reached by applying `action`, if the transition is defined.
    /// Applying leaves a job open.
    pub fn transition(&self, action: ActionKind) -> Option<JobState> {
        match (self, action) {
            (JobState::Open, ActionKind::Apply) => Some(JobState::Open),
            (JobState::Open, ActionKind::Hire) => Some(JobState::Assigned),
            (JobState::Open, ActionKind::Cancel) => Some(JobState::Cancelled),
            (JobState::Assigned, ActionKind::Submit) => Some(JobState::Submitted),
            (JobState::Submitted, ActionKind::Approve) => Some(JobState::Paid),
            _ => None,
        }
    }

    /// Human-readable status label.
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Open => "Open",
            JobState::Assigned => "Assigned",
            JobState::Submitted => "Submitted",
            JobState::Paid => "Paid",
            JobState::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
