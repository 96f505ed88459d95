//! # Board Flows
//!
//! User actions end to end: dispatch, confirmation, full re-read, and the
//! resulting role-scoped views.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use client_runtime::{ApplicantChoice, ClientError, Notice};
    use eb_03_action_guard::NothingPending;
    use eb_05_view_projector::{project, Viewer};
    use shared_types::{ActionKind, JobId, JobState, Role};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_post_one_and_a_half_ether() {
        let ledger = ledger();
        let (employer, notices) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        let before = employer.projections().unwrap().open_jobs.len();

        employer
            .post_job("Logo design", "Vector logo for a bakery", "1.5")
            .await
            .unwrap();

        let views = employer.projections().unwrap();
        assert_eq!(views.open_jobs.len(), before + 1);
        let card = &views.open_jobs[0];
        assert_eq!(card.title, "Logo design");
        assert_eq!(card.budget, eth_tenths(15));
        assert_eq!(card.state, JobState::Open);
        assert_eq!(views.my_posted.len(), 1);
        assert_eq!(views.my_posted[0].id, card.id);

        assert_eq!(ledger.escrow_balance(), eth_tenths(15));
        assert_eq!(
            ledger.description(card.id).as_deref(),
            Some("Vector logo for a bakery")
        );
        assert!(notices.notices().iter().any(|n| matches!(
            n,
            Notice::ActionConfirmed {
                action: ActionKind::Post,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn test_hire_x_on_job_three() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 3).await;

        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        let (y, _) = connect_as(&ledger, FREELANCER_Y, Some(Role::Freelancer)).await;
        y.apply(JobId(3), "Done by Friday", "0.8").await.unwrap();
        x.apply(JobId(3), "Portfolio attached", "0.9").await.unwrap();

        employer.refresh().await.unwrap();
        let records = employer.applicants(JobId(3)).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].applicant, FREELANCER_X);

        employer
            .hire(JobId(3), ApplicantChoice::Address(FREELANCER_X))
            .await
            .unwrap();

        let snapshot = employer.session().unwrap().snapshot;
        let job = snapshot.get(JobId(3)).unwrap();
        assert_eq!(job.freelancer, FREELANCER_X);
        assert!(!job.is_open);

        let employer_views = employer.projections().unwrap();
        assert!(employer_views.open_jobs.iter().all(|c| c.id != JobId(3)));

        x.refresh().await.unwrap();
        let x_views = x.projections().unwrap();
        assert!(x_views.open_jobs.iter().all(|c| c.id != JobId(3)));
        let assignment = x_views
            .my_assignments
            .iter()
            .find(|c| c.id == JobId(3))
            .unwrap();
        let submit = assignment.action(ActionKind::Submit).unwrap();
        assert!(submit.enabled);

        y.refresh().await.unwrap();
        let y_views = y.projections().unwrap();
        assert!(y_views.my_assignments.is_empty());
        assert_eq!(y_views.my_applications[0].status.label(), "Hired");
        assert!(!y_views.my_applications[0].hired_viewer);
    }

    #[tokio::test]
    async fn test_cancelled_job_offers_nothing() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 2).await;

        employer.cancel(JobId(2)).await.unwrap();
        assert_eq!(ledger.paid_out(&EMPLOYER), eth_tenths(10));

        let snapshot = employer.session().unwrap().snapshot;
        let job = snapshot.get(JobId(2)).unwrap();
        assert_eq!(job.state(), JobState::Cancelled);

        for role in [None, Some(Role::Employer), Some(Role::Freelancer)] {
            for viewer in [EMPLOYER, FREELANCER_X] {
                let views = project(&snapshot, &Viewer::new(viewer, role), &NothingPending);
                let cards = views
                    .open_jobs
                    .iter()
                    .chain(&views.my_posted)
                    .chain(&views.my_assignments);
                for card in cards.filter(|c| c.id == JobId(2)) {
                    assert_eq!(card.state, JobState::Cancelled);
                    assert!(card.actions.is_empty());
                }
                assert!(views.open_jobs.iter().all(|c| c.id != JobId(2)));
            }
        }

        // The ledger agrees: cancelling twice reverts
        assert!(matches!(
            employer.cancel(JobId(2)).await,
            Err(ClientError::Gateway(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_and_approve_release_payment() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 1).await;

        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        x.apply(JobId(1), "Ready", "1").await.unwrap();
        employer.hire(JobId(1), ApplicantChoice::Index(1)).await.unwrap();

        x.refresh().await.unwrap();
        x.submit_work(JobId(1)).await.unwrap();

        employer.refresh().await.unwrap();
        let views = employer.projections().unwrap();
        let posted = &views.my_posted[0];
        assert_eq!(posted.state, JobState::Submitted);
        assert!(posted.action(ActionKind::Approve).unwrap().enabled);

        employer.approve(JobId(1)).await.unwrap();
        assert_eq!(ledger.paid_out(&FREELANCER_X), eth_tenths(10));
        assert_eq!(ledger.escrow_balance(), eth_tenths(0));

        x.refresh().await.unwrap();
        let x_views = x.projections().unwrap();
        assert_eq!(x_views.my_assignments[0].state, JobState::Paid);
        assert!(x_views.my_assignments[0].actions.is_empty());
        assert!(x_views.my_applications[0].hired_viewer);
    }

    #[tokio::test]
    async fn test_open_jobs_and_assignments_disjoint() {
        let ledger = ledger();
        let (employer, _) = connect_as(&ledger, EMPLOYER, Some(Role::Employer)).await;
        post_jobs(&employer, 4).await;

        let (x, _) = connect_as(&ledger, FREELANCER_X, Some(Role::Freelancer)).await;
        for id in 1..=4 {
            x.apply(JobId(id), "Interested", "1").await.unwrap();
        }
        employer.hire(JobId(1), ApplicantChoice::Index(1)).await.unwrap();
        employer.hire(JobId(3), ApplicantChoice::Index(1)).await.unwrap();

        x.refresh().await.unwrap();
        let views = x.projections().unwrap();
        let open: HashSet<JobId> = views.open_jobs.iter().map(|c| c.id).collect();
        let assigned: HashSet<JobId> = views.my_assignments.iter().map(|c| c.id).collect();
        assert!(open.is_disjoint(&assigned));
        assert_eq!(assigned, HashSet::from([JobId(1), JobId(3)]));
        assert_eq!(open, HashSet::from([JobId(2), JobId(4)]));
    }
}
