//! # Action Mapping
//!
//! (state, role, identity) → offered actions. The only place that decides
//! which buttons exist; renderers never look at job flags.

use eb_03_action_guard::PendingQuery;
use shared_types::{ActionKind, Job, JobState, Role};

use crate::domain::{ActionAffordance, Viewer};

/// Actions `viewer` may request on `job`, in lifecycle order.
///
/// An in-flight action stays listed but disabled. Jobs failing the entity
/// invariants get no actions.
pub fn available_actions<Q: PendingQuery + ?Sized>(
    job: &Job,
    viewer: &Viewer,
    pending: &Q,
) -> Vec<ActionAffordance> {
    let Ok(state) = JobState::classify(job) else {
        return Vec::new();
    };

    let is_employer = job.is_employer(&viewer.address);
    let is_freelancer = job.is_freelancer(&viewer.address);
    let employer_view = viewer.acts_as(Role::Employer) && is_employer;

    let offered: &[ActionKind] = match state {
        JobState::Open if employer_view => &[ActionKind::Hire, ActionKind::Cancel],
        JobState::Open if viewer.acts_as(Role::Freelancer) && !is_employer => &[ActionKind::Apply],
        JobState::Assigned if is_freelancer => &[ActionKind::Submit],
        JobState::Submitted if employer_view => &[ActionKind::Approve],
        _ => &[],
    };

    offered
        .iter()
        .map(|&action| ActionAffordance {
            action,
            job_id: job.id,
            enabled: !pending.is_pending(action, job.id),
        })
        .collect()
}
