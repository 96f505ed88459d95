//! # Inbound Ports
//!
//! The capability surface the rest of the client uses to reach the ledger.

use async_trait::async_trait;
use shared_types::{ApplicationRecord, JobId, Wei};

use crate::domain::{GatewayError, JobPreview, LedgerCall, Signer, TxReceipt};

/// Ledger Gateway - inbound port.
///
/// Reads are non-mutating lookups against the escrow contract. `submit`
/// resolves only once the call is confirmed on-chain.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Request wallet access, make sure the wallet is on the required chain
    /// and return the signing account.
    ///
    /// # Errors
    /// - `WalletUnavailable` if no provider or no account is available
    /// - `NetworkMismatch` if the chain switch fails or is refused
    async fn connect(&self) -> Result<Signer, GatewayError>;

    /// Total number of jobs ever posted.
    async fn job_count(&self) -> Result<u64, GatewayError>;

    /// One job plus its applicant list.
    async fn job_preview(&self, id: JobId) -> Result<JobPreview, GatewayError>;

    /// Full application records of a job, in application order.
    async fn applications(&self, id: JobId) -> Result<Vec<ApplicationRecord>, GatewayError>;

    /// Flat fee required to apply.
    async fn application_fee(&self) -> Result<Wei, GatewayError>;

    /// Send a state-changing call with attached `value` and wait for it to
    /// be confirmed.
    ///
    /// # Errors
    /// `Transaction` on rejection, revert or network fault.
    async fn submit(
        &self,
        signer: &Signer,
        call: LedgerCall,
        value: Wei,
    ) -> Result<TxReceipt, GatewayError>;
}
