//! # Error Types
//!
//! Parse and invariant errors shared across components.

use thiserror::Error;

/// Address text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    /// Missing `0x` prefix.
    #[error("address must start with 0x: {0}")]
    MissingPrefix(String),

    /// Wrong number of hex digits.
    #[error("address must have 40 hex digits, got {0}")]
    InvalidLength(usize),

    /// Non-hex characters.
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),
}

/// Role text is neither `employer` nor `freelancer`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct ParseRoleError(pub String);

/// A job record violates the entity invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JobInvariantError {
    /// Job id is zero.
    #[error("job id must be positive")]
    InvalidId,

    /// Employer is the zero address.
    #[error("employer is the zero address")]
    ZeroEmployer,

    /// `paid` set while `submitted` is not.
    #[error("paid job was never submitted")]
    PaidWithoutSubmission,

    /// `submitted` or `paid` set with no freelancer.
    #[error("submitted or paid job has no freelancer")]
    MissingFreelancer,

    /// Employer hired themselves.
    #[error("employer is also the freelancer")]
    EmployerIsFreelancer,
}
