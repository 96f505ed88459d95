//! # Outbound Ports
//!
//! The wallet provider the contract gateway talks to. Shaped after the
//! EIP-1193 request surface a browser wallet exposes.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, Wei};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

use crate::domain::TxHash;

/// EIP-1193 "user rejected request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// EIP-3085 "unrecognized chain".
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// JSON-RPC "method not found".
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;

/// Provider-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider unreachable or the connection broke.
    #[error("transport: {0}")]
    Transport(String),

    /// Provider answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// Error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// Provider answered with an unexpected payload.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Transaction to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Sending account.
    pub from: Address,
    /// Contract address.
    pub to: Address,
    /// ABI-encoded call data.
    pub data: Vec<u8>,
    /// Attached value.
    pub value: Wei,
}

/// Mined transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptInfo {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Inclusion block.
    pub block_number: u64,
    /// Execution succeeded.
    pub success: bool,
}

/// Wallet provider - outbound port.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask for account access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Current chain (`eth_chainId`).
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Ask the wallet to switch chains (`wallet_switchEthereumChain`).
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    /// Read-only contract call (`eth_call` at `latest`).
    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Sign and broadcast (`eth_sendTransaction`).
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError>;

    /// Receipt of a mined transaction, `None` while pending.
    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<ReceiptInfo>, ProviderError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted wallet provider for testing.
///
/// `eth_call` answers are looked up by exact call data. Receipts appear
/// after `receipt_after_polls` polls.
pub struct MockWallet {
    /// Accounts handed out by `request_accounts`.
    pub accounts: Vec<Address>,
    /// Chain the wallet is currently on.
    pub chain_id: Mutex<u64>,
    /// Does `switch_chain` succeed?
    pub allow_switch: bool,
    /// Should every request fail at the transport level?
    pub should_fail: bool,
    /// `eth_call` responses keyed by call data.
    pub call_responses: Mutex<HashMap<Vec<u8>, Result<Vec<u8>, ProviderError>>>,
    /// Error returned by the next `send_transaction`, if any.
    pub send_error: Mutex<Option<ProviderError>>,
    /// Broadcast transactions, in order.
    pub sent: Mutex<Vec<TransactionRequest>>,
    /// Polls answered with `None` before the receipt shows up.
    pub receipt_after_polls: u32,
    /// Status reported in the receipt.
    pub receipt_success: bool,
    /// Receipt polls answered so far.
    pub polls: AtomicU32,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self {
            accounts: vec![Address::from_bytes([0x11; 20])],
            chain_id: Mutex::new(11_155_111),
            allow_switch: true,
            should_fail: false,
            call_responses: Mutex::new(HashMap::new()),
            send_error: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            receipt_after_polls: 0,
            receipt_success: true,
            polls: AtomicU32::new(0),
        }
    }
}

impl MockWallet {
    /// Script the answer to an `eth_call`.
    pub fn respond(&self, data: Vec<u8>, response: Result<Vec<u8>, ProviderError>) {
        self.call_responses.lock().insert(data, response);
    }

    /// Number of receipt polls so far.
    pub fn poll_count(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.should_fail {
            return Err(ProviderError::Transport("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.check()?;
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        self.check()?;
        Ok(*self.chain_id.lock())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.check()?;
        if !self.allow_switch {
            return Err(ProviderError::Rpc {
                code: USER_REJECTED_CODE,
                message: "User rejected the request.".to_string(),
            });
        }
        *self.chain_id.lock() = chain_id;
        Ok(())
    }

    async fn call(&self, _to: &Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        self.check()?;
        self.call_responses
            .lock()
            .get(data)
            .cloned()
            .unwrap_or_else(|| {
                Err(ProviderError::Rpc {
                    code: 3,
                    message: "execution reverted".to_string(),
                })
            })
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        self.check()?;
        if let Some(error) = self.send_error.lock().take() {
            return Err(error);
        }
        let mut sent = self.sent.lock();
        sent.push(tx.clone());
        let mut hash = [0u8; 32];
        hash[31] = sent.len() as u8;
        Ok(TxHash(hash))
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<ReceiptInfo>, ProviderError> {
        self.check()?;
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if polls <= self.receipt_after_polls {
            return Ok(None);
        }
        Ok(Some(ReceiptInfo {
            tx_hash: *tx_hash,
            block_number: 100 + u64::from(polls),
            success: self.receipt_success,
        }))
    }
}
