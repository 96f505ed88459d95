//! # Projection
//!
//! Derives every list from one snapshot. Pure: same snapshot, viewer and
//! pending set in, same projections out.

use eb_03_action_guard::PendingQuery;
use eb_04_job_reconciler::JobSnapshot;
use shared_types::{Job, Role};

use super::actions::available_actions;
use crate::domain::{ApplicationEntry, ApplicationStatus, JobCard, Projections, Viewer};

/// Build the role-scoped projections for `viewer`.
pub fn project<Q: PendingQuery + ?Sized>(
    snapshot: &JobSnapshot,
    viewer: &Viewer,
    pending: &Q,
) -> Projections {
    let card = |job: &Job| {
        JobCard::new(
            job,
            job.state(),
            available_actions(job, viewer, pending),
        )
    };
    let jobs = snapshot.jobs();

    let open_jobs = jobs
        .iter()
        .filter(|job| job.is_accepting_applications())
        .map(card)
        .collect();

    let my_posted = if viewer.acts_as(Role::Employer) {
        jobs.iter()
            .filter(|job| job.is_employer(&viewer.address))
            .map(card)
            .collect()
    } else {
        Vec::new()
    };

    let (my_applications, my_assignments) = if viewer.acts_as(Role::Freelancer) {
        let applications = jobs
            .iter()
            .filter(|job| job.has_applied(&viewer.address))
            .map(|job| ApplicationEntry {
                job_id: job.id,
                title: job.title.clone(),
                budget: job.budget,
                status: if job.has_freelancer() {
                    ApplicationStatus::Hired
                } else {
                    ApplicationStatus::Pending
                },
                hired_viewer: job.is_freelancer(&viewer.address),
            })
            .collect();
        let assignments = jobs
            .iter()
            .filter(|job| job.is_freelancer(&viewer.address))
            .map(card)
            .collect();
        (applications, assignments)
    } else {
        (Vec::new(), Vec::new())
    };

    let open_authored_count = snapshot.open_authored_count(&viewer.address);

    Projections {
        viewer: *viewer,
        open_jobs,
        my_posted,
        my_applications,
        my_assignments,
        open_authored_count,
        role_change_locked: viewer.acts_as(Role::Employer) && open_authored_count > 0,
        excluded_jobs: snapshot.failures().iter().map(|f| f.job_id).collect(),
    }
}

/// Is `card` a job that can never change again?
pub fn is_settled(card: &JobCard) -> bool {
    card.state.is_terminal()
}
