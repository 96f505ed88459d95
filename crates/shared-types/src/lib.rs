//! # Shared Types Crate
//!
//! Domain entities shared by the escrow-board components.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Job`, `JobState`, `Address` and the action
//!   vocabulary are defined once here and consumed by every component.
//! - **Verified entities**: a `Job` leaving the reconciler has passed
//!   [`Job::verify`]; downstream code relies on [`Job::state`] without
//!   re-checking.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
