//! # View Models
//!
//! Plain data: everything the render layer needs, nothing it must derive.

use serde::{Deserialize, Serialize};
use shared_types::{ActionKind, Address, Job, JobId, JobState, Role, Wei};

/// Who is looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Connected account.
    pub address: Address,
    /// Selected role, `None` until the user picks one.
    pub role: Option<Role>,
}

impl Viewer {
    /// Create a viewer.
    pub fn new(address: Address, role: Option<Role>) -> Self {
        Self { address, role }
    }

    /// Is the selected role `role`?
    pub fn acts_as(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

/// One action the viewer may request on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAffordance {
    /// Action kind.
    pub action: ActionKind,
    /// Target job.
    pub job_id: JobId,
    /// `false` while the same action on the same job is in flight.
    pub enabled: bool,
}

/// A job as shown in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCard {
    /// Job id.
    pub id: JobId,
    /// Title.
    pub title: String,
    /// Posting party.
    pub employer: Address,
    /// Hired party, if any.
    pub freelancer: Option<Address>,
    /// Escrowed budget.
    pub budget: Wei,
    /// Number of applications.
    pub applicant_count: usize,
    /// Lifecycle state.
    pub state: JobState,
    /// Actions offered to the viewer.
    pub actions: Vec<ActionAffordance>,
}

impl JobCard {
    /// Build a card for `job` with the given actions.
    pub fn new(job: &Job, state: JobState, actions: Vec<ActionAffordance>) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            employer: job.employer,
            freelancer: job.has_freelancer().then_some(job.freelancer),
            budget: job.budget,
            applicant_count: job.applicants.len(),
            state,
            actions,
        }
    }

    /// Affordance for `action`, if offered.
    pub fn action(&self, action: ActionKind) -> Option<&ActionAffordance> {
        self.actions.iter().find(|a| a.action == action)
    }
}

/// Outcome of an application, as far as the applicant can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Someone was hired.
    Hired,
    /// Nobody hired yet.
    Pending,
}

impl ApplicationStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Pending => "Pending",
        }
    }
}

/// One job the viewer applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    /// Job id.
    pub job_id: JobId,
    /// Title.
    pub title: String,
    /// Escrowed budget.
    pub budget: Wei,
    /// Hired or pending.
    pub status: ApplicationStatus,
    /// The viewer is the one who got hired.
    pub hired_viewer: bool,
}

/// Every list the client shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projections {
    /// Who the projections were built for.
    pub viewer: Viewer,
    /// Jobs accepting applications (everyone).
    pub open_jobs: Vec<JobCard>,
    /// Jobs the viewer posted (employer role).
    pub my_posted: Vec<JobCard>,
    /// Jobs the viewer applied to (freelancer role).
    pub my_applications: Vec<ApplicationEntry>,
    /// Jobs the viewer was hired for (freelancer role).
    pub my_assignments: Vec<JobCard>,
    /// Open jobs the viewer posted.
    pub open_authored_count: usize,
    /// Role change is blocked until those jobs are filled or cancelled.
    pub role_change_locked: bool,
    /// Jobs left out of the snapshot.
    pub excluded_jobs: Vec<JobId>,
}
