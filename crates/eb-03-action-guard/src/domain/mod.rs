//! # Domain Module
//!
//! Pending-action keys and guard statistics.

pub mod pending;
pub mod stats;

pub use pending::PendingKey;
pub use stats::{GuardStats, GuardStatsSnapshot};
