//! # Domain Errors
//!
//! Error types for the Role Store.

use shared_types::{Address, ParseRoleError};
use thiserror::Error;

/// Preference persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored file is not a JSON object of strings.
    #[error("corrupt preference file: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

/// Role Store error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Input is neither `employer` nor `freelancer`.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),

    /// Employer still has open jobs and cannot switch away.
    #[error("{address} has open jobs; cancel or fill them before changing role")]
    RoleLocked {
        /// Address whose role is locked.
        address: Address,
    },

    /// Preference storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
