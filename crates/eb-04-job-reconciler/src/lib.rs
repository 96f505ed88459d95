//! # EB-04 Job Reconciler
//!
//! Rebuilds the client's job collection from the ledger.
//!
//! **Component ID:** 04  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Pass
//!
//! 1. Read the job counter `N` (failure voids the pass).
//! 2. Read previews for ids `1..=N` in ordered batches.
//! 3. Normalize each preview; malformed or unreadable jobs become
//!    [`ReadFailure`] records instead of entities.
//! 4. Emit a [`JobSnapshot`] ordered by id.
//!
//! The result never depends on the previous snapshot, so running a pass
//! twice against an unchanged ledger yields equal snapshots.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;

// Re-exports
pub use algorithms::normalize;
pub use application::JobReconciler;
pub use config::ReconcilerConfig;
pub use domain::{
    JobSnapshot, NormalizeError, ReadFailure, ReadFailureKind, ReconcileError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
