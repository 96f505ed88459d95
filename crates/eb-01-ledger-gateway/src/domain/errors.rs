//! # Domain Errors
//!
//! Error types for the Ledger Gateway.

use shared_types::JobId;
use thiserror::Error;

use super::value_objects::TxHash;

/// Why a state-changing call did not confirm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionFailure {
    /// The user declined to sign (EIP-1193 code 4001).
    #[error("transaction rejected by the user")]
    Rejected,

    /// The contract reverted, either at submission or on-chain.
    #[error("transaction reverted: {reason}")]
    Reverted {
        /// Hash of the mined transaction, if it got that far.
        tx_hash: Option<TxHash>,
        /// Revert reason or provider message.
        reason: String,
    },

    /// Transport fault while submitting.
    #[error("network fault: {0}")]
    Network(String),

    /// No receipt within the configured wait bound.
    #[error("no confirmation for {tx_hash} after {waited_secs}s")]
    Timeout {
        /// Hash of the pending transaction.
        tx_hash: TxHash,
        /// Seconds spent waiting.
        waited_secs: u64,
    },
}

/// Ledger Gateway error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No wallet provider reachable, or it exposed no account.
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// Wallet is on the wrong chain and switching failed or was refused.
    #[error("network mismatch: expected chain {expected}, wallet is on {actual}")]
    NetworkMismatch {
        /// Required chain id.
        expected: u64,
        /// Chain id the wallet reports.
        actual: u64,
    },

    /// Human-entered amount could not be converted to wei.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A state-changing call failed.
    #[error(transparent)]
    Transaction(#[from] TransactionFailure),

    /// The job id is beyond the ledger's counter.
    #[error("job {0} does not exist")]
    UnknownJob(JobId),

    /// JSON-RPC error object returned by the provider.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Provider message.
        message: String,
    },

    /// Transport fault on a read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Is this a `TransactionError` in the taxonomy sense?
    pub fn is_transaction_error(&self) -> bool {
        matches!(self, GatewayError::Transaction(_))
    }
}
