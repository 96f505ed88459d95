//! JSON-RPC Wallet Adapter
//!
//! Implements `WalletProvider` against an HTTP JSON-RPC endpoint that holds
//! the user's account (a wallet daemon or an unlocked dev node).

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{Address, U256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::domain::TxHash;
use crate::ports::outbound::{
    ProviderError, ReceiptInfo, TransactionRequest, WalletProvider, METHOD_NOT_FOUND_CODE,
};

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Receipt fields we care about.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: String,
    block_number: Option<String>,
    status: Option<String>,
}

/// Wallet provider over HTTP JSON-RPC.
pub struct JsonRpcWallet {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl JsonRpcWallet {
    /// Create a new wallet client.
    pub fn new(rpc_url: String, timeout: Duration) -> Self {
        // reqwest::Client::new() is the infallible fallback
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url,
            request_id: AtomicU64::new(1),
        }
    }

    /// Endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Make a JSON-RPC call. A `null` result deserializes into `R` as-is, so
    /// `()` and `Option<_>` results work.
    async fn rpc<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ProviderError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        debug!(method, id, "JSON-RPC request");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("{method}: {e}")))?;

        if let Some(error) = rpc_response.error {
            return Err(ProviderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(rpc_response.result.unwrap_or(Value::Null))
            .map_err(|e| ProviderError::Decode(format!("{method}: {e}")))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let raw: Vec<String> = match self.rpc("eth_requestAccounts", Vec::<()>::new()).await {
            Err(ProviderError::Rpc { code, .. }) if code == METHOD_NOT_FOUND_CODE => {
                // Plain nodes only expose the non-interactive variant
                self.rpc("eth_accounts", Vec::<()>::new()).await?
            }
            other => other?,
        };

        raw.iter()
            .map(|a| a.parse::<Address>().map_err(|e| ProviderError::Decode(e.to_string())))
            .collect()
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let result: String = self.rpc("eth_chainId", Vec::<()>::new()).await?;
        parse_hex_u64(&result)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        let _: Value = self
            .rpc(
                "wallet_switchEthereumChain",
                [json!({ "chainId": format!("0x{chain_id:x}") })],
            )
            .await?;
        Ok(())
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let params = (
            json!({ "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) }),
            "latest",
        );
        let result: String = self.rpc("eth_call", params).await?;
        hex::decode(result.trim_start_matches("0x"))
            .map_err(|e| ProviderError::Decode(format!("eth_call: {e}")))
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ProviderError> {
        let params = [json!({
            "from": tx.from.to_string(),
            "to": tx.to.to_string(),
            "data": format!("0x{}", hex::encode(&tx.data)),
            "value": format_hex_u256(tx.value),
        })];
        let result: String = self.rpc("eth_sendTransaction", params).await?;
        result
            .parse::<TxHash>()
            .map_err(|e| ProviderError::Decode(format!("tx hash: {e}")))
    }

    async fn transaction_receipt(
        &self,
        tx_hash: &TxHash,
    ) -> Result<Option<ReceiptInfo>, ProviderError> {
        let raw: Option<RawReceipt> = self
            .rpc("eth_getTransactionReceipt", [tx_hash.to_string()])
            .await?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        // Some providers return a receipt shell before inclusion
        let Some(block) = raw.block_number else {
            return Ok(None);
        };

        Ok(Some(ReceiptInfo {
            tx_hash: raw
                .transaction_hash
                .parse()
                .map_err(|e| ProviderError::Decode(format!("receipt hash: {e}")))?,
            block_number: parse_hex_u64(&block)?,
            success: match raw.status.as_deref() {
                Some(status) => parse_hex_u64(status)? == 1,
                None => true,
            },
        }))
    }
}

/// Parse a `0x`-prefixed quantity.
fn parse_hex_u64(s: &str) -> Result<u64, ProviderError> {
    let digits = s.trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::Decode(format!("hex quantity {s:?}: {e}")))
}

/// Format a quantity the way JSON-RPC expects (no leading zeros).
fn format_hex_u256(value: U256) -> String {
    format!("0x{value:x}")
}
