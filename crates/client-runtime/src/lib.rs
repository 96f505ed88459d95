//! # Escrow Board Client Runtime
//!
//! Wires the components into one session and exposes them to a terminal
//! user through the `escrow-board` binary.
//!
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Module Structure
//!
//! ```text
//! client-runtime/
//! ├── domain/       # Session, notices, outcomes, ClientError
//! ├── ports/        # Notifier (+ RecordingNotifier for tests)
//! ├── adapters/     # TracingNotifier, ConsoleNotifier
//! ├── application/  # EscrowClient service
//! ├── config.rs     # ClientConfig with environment overrides
//! └── render.rs     # Plain-text board
//! ```
//!
//! ## Action Flow
//!
//! ```text
//! user action ─→ session + role check ─→ ActionGuard ticket
//!                                              │
//!                 LedgerGateway::submit ←──────┘
//!                          │
//!                 confirmed / failed (ticket dropped)
//!                          │
//!                 JobReconciler full pass ─→ Session snapshot swap
//!                          │
//!                 Notifier ─→ project() on next read
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod render;

// Re-exports
pub use adapters::{ConsoleNotifier, TracingNotifier};
pub use application::EscrowClient;
pub use config::ClientConfig;
pub use domain::{ActionOutcome, ApplicantChoice, ClientError, Notice, Session};
pub use ports::{Notifier, RecordingNotifier};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
