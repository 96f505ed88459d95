//! # Application Module

pub mod guard;

pub use guard::{ActionGuard, PendingTicket};
