//! # Escrow Client Service
//!
//! Every user action runs the same sequence: require a session, check the
//! role and identity client-side, take the pending marker, dispatch, wait
//! for confirmation, re-read the whole board, notify. The marker is
//! released on every path.

use eb_01_ledger_gateway::{parse_ether, GatewayError, LedgerCall, LedgerGateway, Signer};
use eb_02_role_store::{PreferenceStore, RoleStore};
use eb_03_action_guard::ActionGuard;
use eb_04_job_reconciler::{normalize, JobReconciler, JobSnapshot, ReconcilerConfig};
use eb_05_view_projector::{project, Projections};
use parking_lot::RwLock;
use shared_types::{ActionKind, ApplicationRecord, Job, JobId, Role, Wei};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{ActionOutcome, ApplicantChoice, ClientError, Notice, Session};
use crate::ports::Notifier;

/// Escrow Board application service.
pub struct EscrowClient<G: LedgerGateway + ?Sized, P: PreferenceStore> {
    gateway: Arc<G>,
    reconciler: JobReconciler<G>,
    roles: RoleStore<P>,
    guard: ActionGuard,
    notifier: Arc<dyn Notifier>,
    session: RwLock<Option<Session>>,
    /// Numbers reconciliation passes in start order.
    passes: AtomicU64,
}

impl<G: LedgerGateway + ?Sized, P: PreferenceStore> EscrowClient<G, P> {
    /// Create a disconnected client.
    pub fn new(
        gateway: Arc<G>,
        preferences: P,
        notifier: Arc<dyn Notifier>,
        reconciler_config: ReconcilerConfig,
    ) -> Self {
        Self {
            reconciler: JobReconciler::new(Arc::clone(&gateway), reconciler_config),
            gateway,
            roles: RoleStore::new(preferences),
            guard: ActionGuard::new(),
            notifier,
            session: RwLock::new(None),
            passes: AtomicU64::new(0),
        }
    }

    /// Pending-action markers.
    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    /// Role preferences.
    pub fn roles(&self) -> &RoleStore<P> {
        &self.roles
    }

    /// Current session, if connected.
    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Is a wallet connected?
    pub fn is_connected(&self) -> bool {
        self.session.read().is_some()
    }

    fn require_session(&self) -> Result<Session, ClientError> {
        self.session.read().clone().ok_or(ClientError::NotConnected)
    }

    /// Session whose board came from at least one completed pass. Runs a
    /// pass first when none has landed yet.
    async fn reconciled_session(&self) -> Result<Session, ClientError> {
        let session = self.require_session()?;
        if session.is_reconciled() {
            return Ok(session);
        }
        self.refresh().await?;
        self.require_session()
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Connect the wallet, restore the stored role and read the board.
    ///
    /// A failed first read leaves an empty, unreconciled board; the
    /// connection stands.
    pub async fn connect(&self) -> Result<Signer, ClientError> {
        let signer = self.gateway.connect().await?;

        let role = self.roles.get(&signer.address).unwrap_or_else(|e| {
            warn!(account = %signer.address, error = %e, "Stored role unreadable");
            None
        });

        // Passes started before this connect never land in the new session
        let floor = self.passes.load(Ordering::SeqCst);
        *self.session.write() = Some(Session::new(signer, role, floor));
        self.notify(Notice::Connected {
            address: signer.address,
            chain_id: signer.chain_id,
        });

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Initial job read failed");
        }
        Ok(signer)
    }

    /// End the session and forget the account's role.
    pub fn logout(&self) -> Result<(), ClientError> {
        let Some(session) = self.session.write().take() else {
            return Ok(());
        };
        self.roles.clear(&session.address())?;

        let stats = self.guard.stats();
        info!(
            account = %session.address(),
            actions = stats.begun,
            duplicates = stats.duplicates,
            settled = stats.completed,
            "Session closed"
        );
        self.notify(Notice::LoggedOut);
        Ok(())
    }

    /// Choose the role for the connected account.
    ///
    /// The role lock is judged against a reconciled board, so a session
    /// whose first read failed re-reads the ledger before deciding.
    ///
    /// # Errors
    /// `InvalidRole` for unknown input, `RoleLocked` when leaving the
    /// employer role with open jobs on the board, `Reconcile` when the
    /// board cannot be read.
    pub async fn select_role(&self, input: &str) -> Result<Role, ClientError> {
        let session = self.reconciled_session().await?;
        let role = self.roles.set_from_str(
            &session.address(),
            input,
            session.has_open_authored_jobs(),
        )?;

        if let Some(current) = self.session.write().as_mut() {
            current.role = Some(role);
        }
        self.notify(Notice::RoleSelected(role));
        Ok(role)
    }

    /// May the connected account switch roles right now?
    pub async fn can_change_role(&self) -> Result<bool, ClientError> {
        let session = self.reconciled_session().await?;
        Ok(self
            .roles
            .can_change_role(&session.address(), session.has_open_authored_jobs()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Run a full reconciliation pass and swap in the result.
    ///
    /// On failure the previous snapshot stays in place. A pass that
    /// finishes after a later-started one is discarded, and the newer
    /// snapshot is returned instead.
    pub async fn refresh(&self) -> Result<Arc<JobSnapshot>, ClientError> {
        self.require_session()?;
        let pass = self.passes.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot = match self.reconciler.reconcile_all().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                self.notify(Notice::RefreshFailed(e.to_string()));
                return Err(e.into());
            }
        };

        {
            let mut guard = self.session.write();
            // A logout during the pass wins
            let Some(current) = guard.as_mut() else {
                return Ok(snapshot);
            };
            if pass <= current.generation {
                debug!(pass, installed = current.generation, "Discarding overtaken pass");
                return Ok(Arc::clone(&current.snapshot));
            }
            current.install(Arc::clone(&snapshot), pass);
        }

        if !snapshot.is_complete() {
            self.notify(Notice::PartialRead {
                excluded: snapshot.failures().iter().map(|f| f.job_id).collect(),
            });
        }
        Ok(snapshot)
    }

    /// Role-scoped views of the current snapshot.
    pub fn projections(&self) -> Result<Projections, ClientError> {
        let session = self.require_session()?;
        Ok(project(&session.snapshot, &session.viewer(), &self.guard))
    }

    /// Applications to a job, in application order. Only the job's
    /// employer may list them.
    pub async fn applicants(&self, job_id: JobId) -> Result<Vec<ApplicationRecord>, ClientError> {
        let session = self.require_session()?;
        if session.role != Some(Role::Employer) {
            return Err(not_job_employer(&session, job_id));
        }
        let job = self.read_job(job_id).await?;
        if !job.is_employer(&session.address()) {
            return Err(not_job_employer(&session, job_id));
        }
        Ok(self.gateway.applications(job_id).await?)
    }

    /// Fee the contract charges per application.
    pub async fn application_fee(&self) -> Result<Wei, ClientError> {
        self.require_session()?;
        Ok(self.gateway.application_fee().await?)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Post a job funded with `budget` ether.
    pub async fn post_job(
        &self,
        title: &str,
        description: &str,
        budget: &str,
    ) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        require_role(&session, Role::Employer, ActionKind::Post, JobId::UNASSIGNED)?;

        let title = non_empty(title, "title")?;
        let description = non_empty(description, "description")?;
        let budget = parse_ether(budget)?;
        if budget.is_zero() {
            return Err(GatewayError::InvalidAmount("budget must be above zero".to_string()).into());
        }

        let call = LedgerCall::PostJob { title, description };
        self.execute(&session, call, budget).await
    }

    /// Apply to an open job with a bid in ether. The current application
    /// fee is read and attached.
    pub async fn apply(
        &self,
        job_id: JobId,
        message: &str,
        bid: &str,
    ) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        require_role(&session, Role::Freelancer, ActionKind::Apply, job_id)?;

        let job = session
            .snapshot
            .get(job_id)
            .ok_or(ClientError::UnknownJob(job_id))?;
        if job.is_employer(&session.address()) {
            return Err(unauthorized(&session, ActionKind::Apply, job_id));
        }
        require_transition(job, ActionKind::Apply)?;

        let message = non_empty(message, "message")?;
        let bid = parse_ether(bid)?;
        let fee = self.gateway.application_fee().await?;
        debug!(job_id = job_id.value(), %fee, "Attaching application fee");

        let call = LedgerCall::Apply {
            job_id,
            message,
            bid,
        };
        self.execute(&session, call, fee).await
    }

    /// Hire one of the job's applicants.
    pub async fn hire(
        &self,
        job_id: JobId,
        choice: ApplicantChoice,
    ) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        require_role(&session, Role::Employer, ActionKind::Hire, job_id)?;

        let job = self.read_job(job_id).await?;
        if !job.is_employer(&session.address()) {
            return Err(unauthorized(&session, ActionKind::Hire, job_id));
        }
        require_transition(&job, ActionKind::Hire)?;

        let applicant = match choice {
            ApplicantChoice::Index(n) => n
                .checked_sub(1)
                .and_then(|i| job.applicants.get(i))
                .copied()
                .ok_or_else(|| ClientError::InvalidApplicant {
                    job_id,
                    reason: format!(
                        "no applicant number {n} ({} applied)",
                        job.applicants.len()
                    ),
                })?,
            ApplicantChoice::Address(address) => {
                if !job.has_applied(&address) {
                    return Err(ClientError::InvalidApplicant {
                        job_id,
                        reason: format!("{address} has not applied"),
                    });
                }
                address
            }
        };

        let call = LedgerCall::Hire { job_id, applicant };
        self.execute(&session, call, Wei::zero()).await
    }

    /// Mark the assigned work as submitted. Only the hired freelancer may.
    pub async fn submit_work(&self, job_id: JobId) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        let job = session
            .snapshot
            .get(job_id)
            .ok_or(ClientError::UnknownJob(job_id))?;
        if !job.is_freelancer(&session.address()) {
            return Err(unauthorized(&session, ActionKind::Submit, job_id));
        }
        require_transition(job, ActionKind::Submit)?;

        self.execute(&session, LedgerCall::Submit(job_id), Wei::zero())
            .await
    }

    /// Approve submitted work, releasing the budget to the freelancer.
    pub async fn approve(&self, job_id: JobId) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        require_role(&session, Role::Employer, ActionKind::Approve, job_id)?;

        let job = self.read_job(job_id).await?;
        if !job.is_employer(&session.address()) {
            return Err(unauthorized(&session, ActionKind::Approve, job_id));
        }
        require_transition(&job, ActionKind::Approve)?;

        self.execute(&session, LedgerCall::Approve(job_id), Wei::zero())
            .await
    }

    /// Cancel an open job and get the budget back.
    pub async fn cancel(&self, job_id: JobId) -> Result<ActionOutcome, ClientError> {
        let session = self.require_session()?;
        require_role(&session, Role::Employer, ActionKind::Cancel, job_id)?;

        let job = session
            .snapshot
            .get(job_id)
            .ok_or(ClientError::UnknownJob(job_id))?;
        if !job.is_employer(&session.address()) {
            return Err(unauthorized(&session, ActionKind::Cancel, job_id));
        }
        require_transition(job, ActionKind::Cancel)?;

        self.execute(&session, LedgerCall::Cancel(job_id), Wei::zero())
            .await
    }

    /// Fresh, normalized read of one job straight from the ledger.
    async fn read_job(&self, job_id: JobId) -> Result<Job, ClientError> {
        let preview = self.gateway.job_preview(job_id).await?;
        Ok(normalize(preview, job_id)?)
    }

    /// Guarded dispatch followed by a full re-read.
    async fn execute(
        &self,
        session: &Session,
        call: LedgerCall,
        value: Wei,
    ) -> Result<ActionOutcome, ClientError> {
        let action = call.action_kind();
        let job_id = call.job_id();

        let Some(ticket) = self.guard.try_acquire(action, job_id) else {
            self.notify(Notice::AlreadyPending { action, job_id });
            return Ok(ActionOutcome::AlreadyPending);
        };

        let result = self.gateway.submit(&session.signer, call, value).await;
        drop(ticket);

        let outcome = match result {
            Ok(receipt) => {
                info!(
                    %action,
                    job_id = job_id.value(),
                    tx_hash = %receipt.tx_hash,
                    "Action confirmed"
                );
                self.notify(Notice::ActionConfirmed {
                    action,
                    job_id,
                    tx_hash: receipt.tx_hash,
                });
                Ok(ActionOutcome::Confirmed(receipt))
            }
            Err(e) => {
                self.notify(Notice::ActionFailed {
                    action,
                    job_id,
                    reason: e.to_string(),
                });
                Err(ClientError::from(e))
            }
        };

        // Truth is re-derived from the ledger after every attempt
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "Post-action refresh failed");
        }
        outcome
    }
}

fn require_role(
    session: &Session,
    required: Role,
    action: ActionKind,
    job_id: JobId,
) -> Result<(), ClientError> {
    match session.role {
        None => Err(ClientError::RoleNotSelected(action)),
        Some(role) if role == required => Ok(()),
        Some(_) => Err(unauthorized(session, action, job_id)),
    }
}

/// The job's lifecycle state must allow `action`.
fn require_transition(job: &Job, action: ActionKind) -> Result<(), ClientError> {
    let state = job.state();
    if state.transition(action).is_none() {
        warn!(%action, job_id = job.id.value(), %state, "Action not allowed in this state");
        return Err(ClientError::InvalidTransition {
            action,
            job_id: job.id,
            state,
        });
    }
    Ok(())
}

fn not_job_employer(session: &Session, job_id: JobId) -> ClientError {
    warn!(account = %session.address(), job_id = job_id.value(), "Applicants requested by non-employer");
    ClientError::NotJobEmployer {
        job_id,
        address: session.address(),
    }
}

fn unauthorized(session: &Session, action: ActionKind, job_id: JobId) -> ClientError {
    warn!(account = %session.address(), %action, job_id = job_id.value(), "Action not permitted");
    ClientError::Unauthorized {
        action,
        job_id,
        address: session.address(),
    }
}

fn non_empty(value: &str, field: &'static str) -> Result<String, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}
