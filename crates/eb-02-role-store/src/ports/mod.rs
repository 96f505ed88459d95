//! # Ports Module
//!
//! Outbound persistence port for the Role Store.

pub mod outbound;

pub use outbound::*;
