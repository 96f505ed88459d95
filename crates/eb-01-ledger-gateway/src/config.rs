//! # Gateway Configuration
//!
//! Where the contract lives and how long to wait for it.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::time::Duration;

/// Sepolia chain id (`0xaa36a7`).
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Deployed escrow contract on Sepolia.
pub const DEFAULT_CONTRACT_ADDRESS: Address = Address::from_bytes([
    0x3a, 0xea, 0xce, 0x22, 0x25, 0xe7, 0x84, 0x6b, 0xe6, 0x84, 0x0b, 0x27, 0x57, 0x09, 0x0d, 0x35,
    0x64, 0x52, 0xff, 0x7d,
]);

/// Ledger Gateway configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Wallet provider JSON-RPC endpoint.
    pub rpc_url: String,

    /// Escrow contract address.
    pub contract_address: Address,

    /// Chain the wallet must be on.
    pub chain_id: u64,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Upper bound on waiting for a receipt, in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            chain_id: SEPOLIA_CHAIN_ID,
            request_timeout_secs: 30,
            poll_interval_ms: 2_000,
            confirmation_timeout_secs: 600,
        }
    }
}

impl GatewayConfig {
    /// Create a config for testing (fast polling, short waits).
    pub fn for_testing() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            chain_id: SEPOLIA_CHAIN_ID,
            request_timeout_secs: 5,
            poll_interval_ms: 5,
            confirmation_timeout_secs: 1,
        }
    }

    /// Receipt polling interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Receipt wait bound.
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }
}
