//! # EB-05 View Projector
//!
//! Role-scoped views of the job set and the actions each viewer may take.
//!
//! **Component ID:** 05  
//! **Architecture:** Pure functions over a [`JobSnapshot`]
//!
//! | List | Who | Filter |
//! |------|-----|--------|
//! | open jobs | everyone | open and nobody hired |
//! | my posted | employer | viewer posted it |
//! | my applications | freelancer | viewer applied |
//! | my assignments | freelancer | viewer was hired |
//!
//! Per-job actions come from [`available_actions`], driven by
//! [`shared_types::JobState`]; pending actions are listed but disabled.
//!
//! [`JobSnapshot`]: eb_04_job_reconciler::JobSnapshot

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{available_actions, is_settled, project};
pub use domain::{
    ActionAffordance, ApplicationEntry, ApplicationStatus, JobCard, Projections, Viewer,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
