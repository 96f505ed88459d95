//! # Adapters Layer (Hexagonal Architecture)
//!
//! `LedgerGateway` implementations and the HTTP wallet provider.

mod contract;
mod in_memory;
mod json_rpc;

pub use contract::ContractGateway;
pub use in_memory::InMemoryLedger;
pub use json_rpc::JsonRpcWallet;
