//! # Domain Module
//!
//! Errors and key layout for the Role Store.

pub mod errors;
pub mod keys;

pub use errors::*;
pub use keys::*;
