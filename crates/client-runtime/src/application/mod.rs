//! Application layer for the client runtime.

pub mod service;

pub use service::EscrowClient;
