//! # EB-02 Role Store
//!
//! Remembers, per wallet address, whether the user acts as an employer or a
//! freelancer.
//!
//! **Component ID:** 02  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! Roles persist under `role:<lowercase address>`. An employer cannot switch
//! away while any job it authored is still open; the caller supplies that
//! fact from the latest reconciliation pass.
//!
//! ## Module Structure
//!
//! ```text
//! eb-02-role-store/
//! ├── domain/          # RoleError, StorageError, key layout
//! ├── ports/           # PreferenceStore (outbound)
//! ├── adapters/        # InMemoryPreferences, JsonFilePreferences
//! ├── application/     # RoleStore
//! └── config.rs        # PreferencesConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryPreferences, JsonFilePreferences};
pub use application::RoleStore;
pub use config::PreferencesConfig;
pub use domain::{role_key, RoleError, StorageError};
pub use ports::PreferenceStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
