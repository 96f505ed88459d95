//! # Preferences Configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default preference file, relative to the working directory.
pub const DEFAULT_PREFS_PATH: &str = ".escrow-board/preferences.json";

/// Where role preferences are kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Preference file; `None` keeps preferences in memory only.
    pub path: Option<PathBuf>,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_PREFS_PATH)),
        }
    }
}

impl PreferencesConfig {
    /// Create a config for testing (in-memory).
    pub fn for_testing() -> Self {
        Self { path: None }
    }
}
