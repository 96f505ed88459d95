//! # Contract Gateway
//!
//! `LedgerGateway` over any `WalletProvider`: ABI-encodes calls to the
//! escrow contract, decodes its answers and waits for receipts.

use async_trait::async_trait;
use shared_types::{ApplicationRecord, JobId, Wei};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::algorithms::{self, AbiError};
use crate::config::GatewayConfig;
use crate::domain::{
    GatewayError, JobPreview, LedgerCall, Signer, TransactionFailure, TxHash, TxReceipt,
};
use crate::ports::inbound::LedgerGateway;
use crate::ports::outbound::{
    ProviderError, TransactionRequest, WalletProvider, USER_REJECTED_CODE,
};

/// Escrow contract reached through a wallet provider.
pub struct ContractGateway<W: WalletProvider> {
    wallet: W,
    config: GatewayConfig,
}

impl<W: WalletProvider> ContractGateway<W> {
    /// Create a gateway for the configured contract.
    pub fn new(wallet: W, config: GatewayConfig) -> Self {
        Self { wallet, config }
    }

    /// Underlying wallet provider.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Bring the wallet onto the required chain, switching if needed.
    async fn ensure_network(&self) -> Result<u64, GatewayError> {
        let expected = self.config.chain_id;
        let actual = self.wallet.chain_id().await.map_err(unavailable)?;
        if actual == expected {
            return Ok(actual);
        }

        info!(expected, actual, "Wallet on wrong chain, requesting switch");
        if let Err(e) = self.wallet.switch_chain(expected).await {
            warn!(expected, actual, error = %e, "Chain switch refused");
            return Err(GatewayError::NetworkMismatch { expected, actual });
        }

        // Wallets may accept the request and stay put
        let actual = self.wallet.chain_id().await.map_err(unavailable)?;
        if actual != expected {
            return Err(GatewayError::NetworkMismatch { expected, actual });
        }
        Ok(actual)
    }

    async fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, GatewayError> {
        self.wallet
            .call(&self.config.contract_address, &data)
            .await
            .map_err(read_error)
    }

    /// Poll until the transaction is mined or the wait bound passes.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, GatewayError> {
        let started = Instant::now();
        let timeout = self.config.confirmation_timeout();

        loop {
            match self.wallet.transaction_receipt(&tx_hash).await {
                Ok(Some(receipt)) if receipt.success => {
                    return Ok(TxReceipt {
                        tx_hash,
                        block_number: receipt.block_number,
                    });
                }
                Ok(Some(_)) => {
                    return Err(TransactionFailure::Reverted {
                        tx_hash: Some(tx_hash),
                        reason: "execution reverted".to_string(),
                    }
                    .into());
                }
                Ok(None) => {}
                // A flaky provider does not mean the transaction is lost
                Err(ProviderError::Transport(e)) => {
                    debug!(%tx_hash, error = %e, "Receipt poll failed, retrying");
                }
                Err(e) => return Err(TransactionFailure::Network(e.to_string()).into()),
            }

            if started.elapsed() >= timeout {
                return Err(TransactionFailure::Timeout {
                    tx_hash,
                    waited_secs: started.elapsed().as_secs(),
                }
                .into());
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }
}

#[async_trait]
impl<W: WalletProvider> LedgerGateway for ContractGateway<W> {
    async fn connect(&self) -> Result<Signer, GatewayError> {
        let accounts = self.wallet.request_accounts().await.map_err(|e| match e {
            ProviderError::Rpc { code, .. } if code == USER_REJECTED_CODE => {
                GatewayError::WalletUnavailable("account access rejected".to_string())
            }
            other => unavailable(other),
        })?;

        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| GatewayError::WalletUnavailable("no accounts".to_string()))?;

        let chain_id = self.ensure_network().await?;
        info!(account = %address, chain_id, "Wallet connected");
        Ok(Signer { address, chain_id })
    }

    async fn job_count(&self) -> Result<u64, GatewayError> {
        let data = self.read(algorithms::encode_count_query()).await?;
        let count = algorithms::decode_u64(&data).map_err(decode_error)?;
        debug!(count, "Read job counter");
        Ok(count)
    }

    async fn job_preview(&self, id: JobId) -> Result<JobPreview, GatewayError> {
        if id == JobId::UNASSIGNED {
            return Err(GatewayError::UnknownJob(id));
        }
        let data = self.read(algorithms::encode_preview_query(id)).await?;
        let preview = algorithms::decode_job_preview(&data).map_err(decode_error)?;
        debug!(job_id = id.value(), "Read job preview");
        Ok(preview)
    }

    async fn applications(&self, id: JobId) -> Result<Vec<ApplicationRecord>, GatewayError> {
        let data = self.read(algorithms::encode_applications_query(id)).await?;
        let records = algorithms::decode_applications(&data).map_err(decode_error)?;
        debug!(job_id = id.value(), count = records.len(), "Read applications");
        Ok(records)
    }

    async fn application_fee(&self) -> Result<Wei, GatewayError> {
        let data = self.read(algorithms::encode_fee_query()).await?;
        algorithms::decode_uint(&data).map_err(decode_error)
    }

    async fn submit(
        &self,
        signer: &Signer,
        call: LedgerCall,
        value: Wei,
    ) -> Result<TxReceipt, GatewayError> {
        let action = call.action_kind();
        let job_id = call.job_id().value();

        let request = TransactionRequest {
            from: signer.address,
            to: self.config.contract_address,
            data: algorithms::encode_ledger_call(&call),
            value,
        };

        let tx_hash = self
            .wallet
            .send_transaction(&request)
            .await
            .map_err(|e| GatewayError::Transaction(send_failure(e)))?;
        info!(%action, job_id, %tx_hash, "Transaction sent, awaiting confirmation");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        info!(%action, job_id, %tx_hash, block = receipt.block_number, "Transaction confirmed");
        Ok(receipt)
    }
}

fn unavailable(e: ProviderError) -> GatewayError {
    GatewayError::WalletUnavailable(e.to_string())
}

fn read_error(e: ProviderError) -> GatewayError {
    match e {
        ProviderError::Transport(msg) => GatewayError::Transport(msg),
        ProviderError::Rpc { code, message } => GatewayError::Rpc { code, message },
        ProviderError::Decode(msg) => GatewayError::Decode(msg),
    }
}

fn decode_error(e: AbiError) -> GatewayError {
    GatewayError::Decode(e.to_string())
}

fn send_failure(e: ProviderError) -> TransactionFailure {
    match e {
        ProviderError::Rpc { code, .. } if code == USER_REJECTED_CODE => TransactionFailure::Rejected,
        ProviderError::Rpc { message, .. } => TransactionFailure::Reverted {
            tx_hash: None,
            reason: message,
        },
        ProviderError::Transport(msg) | ProviderError::Decode(msg) => {
            TransactionFailure::Network(msg)
        }
    }
}
