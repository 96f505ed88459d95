//! # Domain Module
//!
//! Snapshot of the job set and the errors a pass can produce.

pub mod errors;
pub mod snapshot;

pub use errors::*;
pub use snapshot::JobSnapshot;
