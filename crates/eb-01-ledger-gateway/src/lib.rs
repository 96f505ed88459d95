//! # EB-01 Ledger Gateway
//!
//! The client's only path to the escrow contract.
//!
//! **Component ID:** 01  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Wrap the contract and the user's wallet behind one narrow capability:
//! read job state, submit a state-changing call with attached value, and
//! wait for it to be confirmed. Nothing above this crate sees ABI words,
//! hex quantities or provider error codes.
//!
//! ## Adapters
//!
//! | Adapter | Backing |
//! |---------|---------|
//! | `ContractGateway<JsonRpcWallet>` | Wallet JSON-RPC endpoint + deployed contract |
//! | `ContractGateway<MockWallet>` | Scripted provider (tests) |
//! | `InMemoryLedger` | Simulated contract (tests, `--simulate`) |
//!
//! ## Module Structure
//!
//! ```text
//! eb-01-ledger-gateway/
//! ├── domain/          # TxHash, Signer, JobPreview, LedgerCall, amounts, errors
//! ├── algorithms/      # ABI codec, contract call shapes
//! ├── ports/           # LedgerGateway (inbound) + WalletProvider (outbound)
//! ├── adapters/        # ContractGateway, JsonRpcWallet, InMemoryLedger
//! └── config.rs        # GatewayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{ContractGateway, InMemoryLedger, JsonRpcWallet};
pub use config::{GatewayConfig, DEFAULT_CONTRACT_ADDRESS, SEPOLIA_CHAIN_ID};
pub use domain::{
    format_ether, parse_ether, GatewayError, JobPreview, LedgerCall, Signer, TransactionFailure,
    TxHash, TxReceipt,
};
pub use ports::{LedgerGateway, MockWallet, ProviderError, WalletProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
