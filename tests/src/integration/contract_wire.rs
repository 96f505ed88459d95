//! # Contract Wire Scenarios
//!
//! The client over the real contract gateway, with a scripted wallet that
//! answers `eth_call` with contract-shaped ABI payloads.

#[cfg(test)]
mod tests {
    use client_runtime::{ClientConfig, ClientError, EscrowClient, RecordingNotifier};
    use eb_01_ledger_gateway::algorithms::abi::{encode_tokens, Token};
    use eb_01_ledger_gateway::algorithms::{
        encode_count_query, encode_fee_query, encode_ledger_call, encode_preview_query,
    };
    use eb_01_ledger_gateway::{
        ContractGateway, GatewayConfig, LedgerCall, MockWallet, ProviderError,
    };
    use eb_02_role_store::InMemoryPreferences;
    use eb_04_job_reconciler::ReadFailureKind;
    use shared_types::{Address, JobId, Role, U256};
    use std::sync::Arc;

    type WireClient = EscrowClient<ContractGateway<MockWallet>, InMemoryPreferences>;

    /// Account the mock wallet hands out.
    const ME: Address = Address::from_bytes([0x11; 20]);
    const SOMEONE: Address = Address::from_bytes([0x22; 20]);

    fn uint(value: u64) -> Token {
        Token::Uint(U256::from(value))
    }

    fn open_preview(id: u64, employer: Address, title: &str) -> Vec<u8> {
        encode_tokens(&[
            Token::Tuple(vec![
                uint(id),
                Token::Address(employer),
                Token::String(title.to_string()),
                Token::Uint(U256::exp10(18)),
                Token::Bool(true),
                Token::Address(Address::ZERO),
                Token::Bool(false),
                Token::Bool(false),
            ]),
            Token::Array(vec![]),
        ])
    }

    /// Three jobs: #1 mine, #2 someone else's, #3 garbage on the wire.
    fn scripted_wallet() -> MockWallet {
        let wallet = MockWallet::default();
        wallet.respond(encode_count_query(), Ok(encode_tokens(&[uint(3)])));
        wallet.respond(encode_preview_query(JobId(1)), Ok(open_preview(1, ME, "Mine")));
        wallet.respond(
            encode_preview_query(JobId(2)),
            Ok(open_preview(2, SOMEONE, "Theirs")),
        );
        wallet.respond(encode_preview_query(JobId(3)), Ok(vec![0xFF; 7]));
        wallet.respond(encode_fee_query(), Ok(encode_tokens(&[uint(500)])));
        wallet
    }

    async fn connected(wallet: MockWallet) -> (Arc<ContractGateway<MockWallet>>, WireClient) {
        let config = ClientConfig::for_testing();
        let gateway = Arc::new(ContractGateway::new(wallet, config.gateway));
        let client = EscrowClient::new(
            Arc::clone(&gateway),
            InMemoryPreferences::new(),
            Arc::new(RecordingNotifier::new()),
            config.reconciler,
        );
        client.connect().await.unwrap();
        (gateway, client)
    }

    async fn wired(
        wallet: MockWallet,
        role: Role,
    ) -> (Arc<ContractGateway<MockWallet>>, WireClient) {
        let (gateway, client) = connected(wallet).await;
        client.select_role(role.as_str()).await.unwrap();
        (gateway, client)
    }

    #[tokio::test]
    async fn test_board_read_from_contract_payloads() {
        let (_, client) = wired(scripted_wallet(), Role::Employer).await;
        let snapshot = client.session().unwrap().snapshot;

        assert_eq!(snapshot.job_counter(), 3);
        assert_eq!(snapshot.jobs().len(), 2);
        assert_eq!(snapshot.failures()[0].job_id, JobId(3));
        assert_eq!(snapshot.failures()[0].kind, ReadFailureKind::Unreadable);

        let views = client.projections().unwrap();
        assert_eq!(views.open_jobs.len(), 2);
        assert_eq!(views.my_posted.len(), 1);
        assert_eq!(views.my_posted[0].title, "Mine");
        assert_eq!(views.excluded_jobs, vec![JobId(3)]);
    }

    #[tokio::test]
    async fn test_cancel_sends_encoded_call() {
        let (gateway, client) = wired(scripted_wallet(), Role::Employer).await;
        assert!(client.cancel(JobId(1)).await.unwrap().is_confirmed());

        let sent = gateway.wallet().sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, ME);
        assert_eq!(sent[0].to, GatewayConfig::for_testing().contract_address);
        assert_eq!(sent[0].data, encode_ledger_call(&LedgerCall::Cancel(JobId(1))));
        assert!(sent[0].value.is_zero());
    }

    #[tokio::test]
    async fn test_apply_attaches_fee_from_contract() {
        let (gateway, client) = wired(scripted_wallet(), Role::Freelancer).await;

        assert!(matches!(
            client.apply(JobId(1), "mine", "1").await,
            Err(ClientError::Unauthorized { .. })
        ));
        client.apply(JobId(2), "Can start today", "0.5").await.unwrap();

        let sent = gateway.wallet().sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value, U256::from(500u64));
        assert_eq!(
            sent[0].data,
            encode_ledger_call(&LedgerCall::Apply {
                job_id: JobId(2),
                message: "Can start today".to_string(),
                bid: U256::exp10(17) * U256::from(5u64),
            })
        );
    }

    #[tokio::test]
    async fn test_user_rejection_from_wallet() {
        let wallet = scripted_wallet();
        *wallet.send_error.lock() = Some(ProviderError::Rpc {
            code: 4001,
            message: "User denied transaction signature".to_string(),
        });
        let (_, client) = wired(wallet, Role::Employer).await;

        let err = client.cancel(JobId(1)).await.unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(client.guard().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_counter_revert_voids_first_read() {
        let wallet = MockWallet::default();
        wallet.respond(
            encode_count_query(),
            Err(ProviderError::Rpc {
                code: 3,
                message: "execution reverted".to_string(),
            }),
        );
        let (_, client) = connected(wallet).await;
        // Connected with an empty, unreconciled board
        let session = client.session().unwrap();
        assert!(session.snapshot.jobs().is_empty());
        assert!(!session.is_reconciled());
        assert!(matches!(
            client.refresh().await,
            Err(ClientError::Reconcile(_))
        ));

        // The role lock cannot be judged without a board
        assert!(matches!(
            client.select_role("freelancer").await,
            Err(ClientError::Reconcile(_))
        ));
        assert_eq!(client.session().unwrap().role, None);
    }
}
