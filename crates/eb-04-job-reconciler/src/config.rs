//! # Reconciler Configuration

use serde::{Deserialize, Serialize};

/// Job Reconciler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Preview reads issued together. `1` reads strictly one after another.
    pub read_batch_size: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self { read_batch_size: 1 }
    }
}

impl ReconcilerConfig {
    /// Create a config for testing (small concurrent batches).
    pub fn for_testing() -> Self {
        Self { read_batch_size: 4 }
    }

    /// Batch size, never below one.
    pub fn effective_batch_size(&self) -> usize {
        self.read_batch_size.max(1)
    }
}
