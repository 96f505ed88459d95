//! # EB-03 Action Guard
//!
//! Keeps the client from submitting the same action twice while the first
//! one is still awaiting confirmation.
//!
//! **Component ID:** 03  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Usage
//!
//! ```
//! use eb_03_action_guard::{ActionGuard, PendingQuery};
//! use shared_types::{ActionKind, JobId};
//!
//! let guard = ActionGuard::new();
//! let ticket = guard.try_acquire(ActionKind::Approve, JobId(7)).unwrap();
//! assert!(guard.try_acquire(ActionKind::Approve, JobId(7)).is_none());
//! drop(ticket);
//! assert!(!guard.is_pending(ActionKind::Approve, JobId(7)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{ActionGuard, PendingTicket};
pub use domain::{GuardStats, GuardStatsSnapshot, PendingKey};
pub use ports::{NothingPending, PendingQuery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
