//! Guard statistics.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for the action guard
#[derive(Debug, Default)]
pub struct GuardStats {
    /// Markers set
    pub total_begun: AtomicU64,
    /// Attempts refused because the same action was in flight
    pub total_duplicates: AtomicU64,
    /// Markers cleared
    pub total_completed: AtomicU64,
}

/// Point-in-time copy of [`GuardStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStatsSnapshot {
    /// Markers set
    pub begun: u64,
    /// Attempts refused
    pub duplicates: u64,
    /// Markers cleared
    pub completed: u64,
}

impl GuardStats {
    /// Copy the current counter values.
    pub fn snapshot(&self) -> GuardStatsSnapshot {
        GuardStatsSnapshot {
            begun: self.total_begun.load(Ordering::Relaxed),
            duplicates: self.total_duplicates.load(Ordering::Relaxed),
            completed: self.total_completed.load(Ordering::Relaxed),
        }
    }
}
