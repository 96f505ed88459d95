//! # Reconciliation Scenarios
//!
//! Full passes over a ledger holding jobs in every lifecycle state.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use client_runtime::{ApplicantChoice, ClientError, Notice};
    use eb_01_ledger_gateway::InMemoryLedger;
    use eb_04_job_reconciler::{JobReconciler, ReadFailureKind, ReconcilerConfig};
    use shared_types::{Address, JobId, JobState, Role};
    use std::sync::Arc;

    /// Jobs 1..=6: open, assigned, submitted, paid, cancelled, open.
    async fn mixed_board() -> Arc<InMemoryLedger> {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 6).await;

        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        for id in 2..=4 {
            x.apply(JobId(id), "Available", "1").await.unwrap();
            employer
                .hire(JobId(id), ApplicantChoice::Address(FREELANCER_X))
                .await
                .unwrap();
        }
        x.refresh().await.unwrap();
        x.submit_work(JobId(3)).await.unwrap();
        x.submit_work(JobId(4)).await.unwrap();

        employer.refresh().await.unwrap();
        employer.approve(JobId(4)).await.unwrap();
        employer.cancel(JobId(5)).await.unwrap();
        ledger
    }

    fn reconciler(ledger: &Arc<InMemoryLedger>) -> JobReconciler<InMemoryLedger> {
        JobReconciler::new(Arc::clone(ledger), ReconcilerConfig::for_testing())
    }

    #[tokio::test]
    async fn test_every_reconciled_job_is_valid() {
        let ledger = mixed_board().await;
        let snapshot = reconciler(&ledger).reconcile_all().await.unwrap();

        assert!(snapshot.is_complete());
        assert_eq!(snapshot.job_counter(), 6);
        let states: Vec<JobState> = snapshot.jobs().iter().map(|j| j.state()).collect();
        assert_eq!(
            states,
            vec![
                JobState::Open,
                JobState::Assigned,
                JobState::Submitted,
                JobState::Paid,
                JobState::Cancelled,
                JobState::Open,
            ]
        );
        for job in snapshot.jobs() {
            assert!(job.verify().is_ok(), "job {} invalid", job.id);
            assert!(job.id.value() > 0);
            if job.submitted || job.paid {
                assert!(job.has_freelancer());
            }
            if job.paid {
                assert!(job.submitted);
            }
            assert_ne!(job.employer, job.freelancer);
        }
    }

    #[tokio::test]
    async fn test_reconciliation_is_idempotent() {
        let ledger = mixed_board().await;
        let reconciler = reconciler(&ledger);
        let first = reconciler.reconcile_all().await.unwrap();
        let second = reconciler.reconcile_all().await.unwrap();
        assert_eq!(first, second);

        // Sequential reads produce the same set
        let sequential = JobReconciler::new(Arc::clone(&ledger), ReconcilerConfig::default())
            .reconcile_all()
            .await
            .unwrap();
        assert_eq!(first, sequential);
    }

    #[tokio::test]
    async fn test_unreadable_job_five_is_excluded() {
        let ledger = mixed_board().await;
        ledger.make_unreadable(JobId(5));

        let (client, notices) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        let snapshot = client.session().unwrap().snapshot;

        assert!(snapshot.get(JobId(5)).is_none());
        let ids: Vec<u64> = snapshot.jobs().iter().map(|j| j.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 6]);
        assert_eq!(snapshot.failures().len(), 1);
        assert_eq!(snapshot.failures()[0].kind, ReadFailureKind::Unreadable);
        assert!(notices.notices().contains(&Notice::PartialRead {
            excluded: vec![JobId(5)]
        }));

        // Recovery is just another pass
        ledger.make_readable(JobId(5));
        let snapshot = client.refresh().await.unwrap();
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.jobs().len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_record_is_excluded() {
        let ledger = mixed_board().await;
        // Paid without a freelancer violates the entity invariants
        assert!(ledger.tamper(JobId(1), |p| {
            p.is_open = false;
            p.paid = true;
            p.submitted = true;
        }));
        assert!(ledger.tamper(JobId(6), |p| p.freelancer = p.employer));

        let snapshot = reconciler(&ledger).reconcile_all().await.unwrap();
        let excluded: Vec<JobId> = snapshot.failures().iter().map(|f| f.job_id).collect();
        assert_eq!(excluded, vec![JobId(1), JobId(6)]);
        assert!(snapshot
            .failures()
            .iter()
            .all(|f| f.kind == ReadFailureKind::Malformed));
        assert_eq!(snapshot.jobs().len(), 4);
    }

    #[tokio::test]
    async fn test_hire_left_flagged_open_still_counts_as_assignment() {
        let ledger = mixed_board().await;
        assert!(ledger.tamper(JobId(1), |p| {
            p.freelancer = FREELANCER_X;
            p.applicants.push(FREELANCER_X);
        }));

        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        let snapshot = x.session().unwrap().snapshot;
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.get(JobId(1)).unwrap().state(), JobState::Assigned);

        let views = x.projections().unwrap();
        assert!(views.my_assignments.iter().any(|card| card.id == JobId(1)));
        assert!(views.open_jobs.iter().all(|card| card.id != JobId(1)));
    }

    #[tokio::test]
    async fn test_counter_failure_keeps_previous_board() {
        let ledger = mixed_board().await;
        let (client, _) = connect_as(&ledger, FREELANCER_Y, Some(Role::Freelancer)).await;
        assert_eq!(client.projections().unwrap().open_jobs.len(), 2);

        ledger.set_count_failure(true);
        assert!(matches!(
            client.refresh().await,
            Err(ClientError::Reconcile(_))
        ));
        assert_eq!(client.projections().unwrap().open_jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_aggregates_follow_the_board() {
        let ledger = mixed_board().await;
        let snapshot = reconciler(&ledger).reconcile_all().await.unwrap();
        assert_eq!(snapshot.open_authored_count(&EMPLOYER), 2);
        assert!(snapshot.has_open_authored_jobs(&EMPLOYER));
        assert_eq!(snapshot.open_authored_count(&Address::ZERO), 0);
        assert!(!snapshot.has_open_authored_jobs(&FREELANCER_X));
    }
}
