//! # Algorithms
//!
//! ABI codec and the escrow contract's call shapes.

pub mod abi;
pub mod calls;

pub use abi::{selector, AbiDecoder, AbiError, Token};
pub use calls::*;
