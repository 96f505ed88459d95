//! # Client Configuration
//!
//! One struct per component, gathered here. Values come from `Default`,
//! then environment overrides, then command-line flags.

use eb_01_ledger_gateway::GatewayConfig;
use eb_02_role_store::PreferencesConfig;
use eb_04_job_reconciler::ReconcilerConfig;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Escrow Board client configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Ledger access.
    pub gateway: GatewayConfig,

    /// Reconciliation passes.
    pub reconciler: ReconcilerConfig,

    /// Role preference storage.
    pub preferences: PreferencesConfig,

    /// Run against the in-memory ledger instead of a wallet endpoint.
    pub simulate: bool,
}

impl ClientConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self {
            gateway: GatewayConfig::for_testing(),
            reconciler: ReconcilerConfig::for_testing(),
            preferences: PreferencesConfig::for_testing(),
            simulate: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EB_RPC_URL`: Wallet JSON-RPC endpoint (default: http://localhost:8545)
    /// - `EB_CONTRACT_ADDRESS`: Escrow contract address (default: Sepolia deployment)
    /// - `EB_CHAIN_ID`: Required chain id (default: 11155111)
    /// - `EB_PREFS_PATH`: Preference file (default: .escrow-board/preferences.json)
    /// - `EB_CONFIRM_TIMEOUT_SECS`: Receipt wait bound (default: 600)
    /// - `EB_POLL_INTERVAL_MS`: Receipt polling interval (default: 2000)
    /// - `EB_READ_BATCH_SIZE`: Concurrent preview reads (default: 1)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable source.
    ///
    /// Unparseable values are logged and the default kept.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("EB_RPC_URL") {
            config.gateway.rpc_url = url;
        }
        if let Some(address) = parsed::<Address, _>(&lookup, "EB_CONTRACT_ADDRESS") {
            config.gateway.contract_address = address;
        }
        if let Some(chain_id) = parsed(&lookup, "EB_CHAIN_ID") {
            config.gateway.chain_id = chain_id;
        }
        if let Some(path) = lookup("EB_PREFS_PATH") {
            config.preferences.path = Some(PathBuf::from(path));
        }
        if let Some(secs) = parsed(&lookup, "EB_CONFIRM_TIMEOUT_SECS") {
            config.gateway.confirmation_timeout_secs = secs;
        }
        if let Some(ms) = parsed(&lookup, "EB_POLL_INTERVAL_MS") {
            config.gateway.poll_interval_ms = ms;
        }
        if let Some(size) = parsed(&lookup, "EB_READ_BATCH_SIZE") {
            config.reconciler.read_batch_size = size;
        }

        config
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid environment override");
            None
        }
    }
}
