//! # Ports Module
//!
//! Read-only view of pending state.

pub mod inbound;

pub use inbound::*;
