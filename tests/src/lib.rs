//! # Escrow Board Test Suite
//!
//! Cross-component scenarios driven through the client runtime against the
//! in-memory ledger, plus the contract gateway against scripted wallets.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Accounts, amounts, connected clients
//! └── integration/
//!     ├── board_flows.rs     # Post, apply, hire, submit, approve, cancel
//!     ├── reconciliation.rs  # Invariants, idempotence, partial reads
//!     ├── guard_and_roles.rs # Duplicate suppression, role lock, wallet
//!     └── contract_wire.rs   # ABI payloads through the contract gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p eb-tests
//! cargo test -p eb-tests integration::board_flows::
//! ```

#[cfg(test)]
mod fixtures;

pub mod integration;
