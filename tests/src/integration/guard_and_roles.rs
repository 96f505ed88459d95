//! # Guard and Role Scenarios
//!
//! Duplicate suppression while a transaction is outstanding, the employer
//! role lock, and wallet connection failures.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use client_runtime::{
        ActionOutcome, ApplicantChoice, ClientConfig, ClientError, EscrowClient, Notice,
        RecordingNotifier,
    };
    use eb_01_ledger_gateway::{GatewayError, InMemoryLedger, LedgerCall, TransactionFailure};
    use eb_02_role_store::{InMemoryPreferences, JsonFilePreferences, RoleError};
    use eb_03_action_guard::ActionGuard;
    use shared_types::{ActionKind, JobId, Role};
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_guard_double_begin_end_rebegin() {
        let guard = ActionGuard::new();
        assert!(guard.begin(ActionKind::Approve, JobId(7)));
        assert!(!guard.begin(ActionKind::Approve, JobId(7)));
        // Other jobs and other actions are independent
        assert!(guard.begin(ActionKind::Approve, JobId(8)));
        assert!(guard.begin(ActionKind::Cancel, JobId(7)));

        guard.end(ActionKind::Approve, JobId(7));
        assert!(guard.begin(ActionKind::Approve, JobId(7)));

        let stats = guard.stats();
        assert_eq!(stats.duplicates, 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_approve() {
        let ledger = ledger();
        let (employer, notices) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 1).await;
        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        x.apply(JobId(1), "Ready", "1").await.unwrap();
        employer
            .hire(JobId(1), ApplicantChoice::Index(1))
            .await
            .unwrap();
        x.refresh().await.unwrap();
        x.submit_work(JobId(1)).await.unwrap();
        employer.refresh().await.unwrap();

        ledger.set_submit_delay(Duration::from_millis(100));

        let observe = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            let views = employer.projections().unwrap();
            let approve = views.my_posted[0].action(ActionKind::Approve).cloned();
            (employer.guard().pending_count(), approve)
        };
        let (first, second, (pending, approve)) = tokio::join!(
            employer.approve(JobId(1)),
            employer.approve(JobId(1)),
            observe
        );

        assert!(first.unwrap().is_confirmed());
        assert_eq!(second.unwrap(), ActionOutcome::AlreadyPending);
        assert_eq!(pending, 1);
        assert!(!approve.unwrap().enabled);

        let approvals = ledger
            .mined_calls()
            .into_iter()
            .filter(|(_, call)| matches!(call, LedgerCall::Approve(_)))
            .count();
        assert_eq!(approvals, 1);
        assert_eq!(employer.guard().pending_count(), 0);
        assert!(notices.notices().contains(&Notice::AlreadyPending {
            action: ActionKind::Approve,
            job_id: JobId(1),
        }));
    }

    #[tokio::test]
    async fn test_rejected_signature_releases_marker() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 1).await;

        ledger.reject_next_submit();
        let err = employer.cancel(JobId(1)).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Gateway(GatewayError::Transaction(TransactionFailure::Rejected))
        ));
        assert_eq!(employer.guard().pending_count(), 0);

        // State is untouched and the action can be retried
        assert_eq!(employer.projections().unwrap().open_jobs.len(), 1);
        assert!(employer.cancel(JobId(1)).await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn test_role_lock_released_after_cancel() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 2).await;

        assert!(employer.projections().unwrap().role_change_locked);
        assert!(matches!(
            employer.select_role("freelancer").await,
            Err(ClientError::Role(RoleError::RoleLocked { .. }))
        ));

        employer.cancel(JobId(1)).await.unwrap();
        assert!(!employer.can_change_role().await.unwrap());

        employer.cancel(JobId(2)).await.unwrap();
        assert!(employer.can_change_role().await.unwrap());
        assert!(!employer.projections().unwrap().role_change_locked);
        assert_eq!(employer.select_role("freelancer").await.unwrap(), Role::Freelancer);
    }

    #[tokio::test]
    async fn test_hiring_also_releases_role_lock() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 1).await;
        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        x.apply(JobId(1), "Ready", "1").await.unwrap();

        employer
            .hire(JobId(1), ApplicantChoice::Index(1))
            .await
            .unwrap();
        assert_eq!(employer.select_role("freelancer").await.unwrap(), Role::Freelancer);
    }

    async fn file_client(
        ledger: &Arc<InMemoryLedger>,
        path: &Path,
    ) -> EscrowClient<InMemoryLedger, JsonFilePreferences> {
        let client = EscrowClient::new(
            Arc::clone(ledger),
            JsonFilePreferences::open(path).unwrap(),
            Arc::new(RecordingNotifier::new()),
            ClientConfig::for_testing().reconciler,
        );
        client.connect().await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_role_persists_in_preference_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let ledger = ledger();
        ledger.use_account(SECOND_EMPLOYER);

        let first = file_client(&ledger, &path).await;
        assert_eq!(first.session().unwrap().role, None);
        first.select_role("freelancer").await.unwrap();

        let second = file_client(&ledger, &path).await;
        assert_eq!(second.session().unwrap().role, Some(Role::Freelancer));

        second.logout().unwrap();
        let third = file_client(&ledger, &path).await;
        assert_eq!(third.session().unwrap().role, None);
    }

    #[tokio::test]
    async fn test_wrong_network_without_switch() {
        let ledger = Arc::new(InMemoryLedger::default());
        ledger.use_account(EMPLOYER);
        ledger.set_wallet_chain(1);
        ledger.set_allow_switch(false);

        let client = EscrowClient::new(
            Arc::clone(&ledger),
            InMemoryPreferences::new(),
            Arc::new(RecordingNotifier::new()),
            ClientConfig::for_testing().reconciler,
        );
        let err = client.connect().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Gateway(GatewayError::NetworkMismatch {
                expected: 11_155_111,
                actual: 1
            })
        ));
        assert!(!client.is_connected());

        ledger.set_allow_switch(true);
        let signer = client.connect().await.unwrap();
        assert_eq!(signer.chain_id, 11_155_111);
        assert_eq!(ledger.wallet_chain(), 11_155_111);
    }

    #[tokio::test]
    async fn test_locked_wallet_is_unavailable() {
        let ledger = Arc::new(InMemoryLedger::default());
        let client = EscrowClient::new(
            Arc::clone(&ledger),
            InMemoryPreferences::new(),
            Arc::new(RecordingNotifier::new()),
            ClientConfig::for_testing().reconciler,
        );
        assert!(matches!(
            client.connect().await,
            Err(ClientError::Gateway(GatewayError::WalletUnavailable(_)))
        ));
    }
}
