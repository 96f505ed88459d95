//! Shared test fixtures.

use client_runtime::{EscrowClient, RecordingNotifier};
use eb_01_ledger_gateway::InMemoryLedger;
use eb_02_role_store::InMemoryPreferences;
use eb_04_job_reconciler::ReconcilerConfig;
use shared_types::{Address, Role, Wei, U256};
use std::sync::Arc;

pub type TestClient = EscrowClient<InMemoryLedger, InMemoryPreferences>;

pub const EMPLOYER: Address = Address::from_bytes([0xE1; 20]);
pub const SECOND_EMPLOYER: Address = Address::from_bytes([0xE2; 20]);
pub const FREELANCER_X: Address = Address::from_bytes([0xAA; 20]);
pub const FREELANCER_Y: Address = Address::from_bytes([0xBB; 20]);

/// `tenths` / 10 ether in wei.
pub fn eth_tenths(tenths: u64) -> Wei {
    U256::from(tenths) * U256::exp10(17)
}

pub fn ledger() -> Arc<InMemoryLedger> {
    Arc::new(InMemoryLedger::default())
}

/// Connect `account` as its own client and select `role`.
pub async fn connect_as(
    ledger: &Arc<InMemoryLedger>,
    account: Address,
    role: Option<Role>,
) -> (TestClient, Arc<RecordingNotifier>) {
    ledger.use_account(account);
    let notices = Arc::new(RecordingNotifier::new());
    let client = EscrowClient::new(
        Arc::clone(ledger),
        InMemoryPreferences::new(),
        notices.clone(),
        ReconcilerConfig::for_testing(),
    );
    client.connect().await.expect("connect");
    if let Some(role) = role {
        client.select_role(role.as_str()).await.expect("select role");
    }
    (client, notices)
}

/// Post `count` jobs of 1 ETH each from `client`.
pub async fn post_jobs(client: &TestClient, count: usize) {
    for i in 1..=count {
        client
            .post_job(&format!("Job {i}"), "Details", "1")
            .await
            .expect("post");
    }
}
