//! # Domain Module
//!
//! Value objects, amounts and errors for the Ledger Gateway.

pub mod amount;
pub mod errors;
pub mod value_objects;

pub use amount::*;
pub use errors::*;
pub use value_objects::*;
