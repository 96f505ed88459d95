//! # In-Memory Ledger
//!
//! A simulated escrow contract. It enforces the same state machine and
//! authorization rules as the deployed contract, so the client can be
//! driven end to end without a chain. Failure injection hooks let tests
//! exercise partial reads, rejected signatures and slow confirmations.

use async_trait::async_trait;
use parking_lot::Mutex;
use sha3::{Digest, Keccak256};
use shared_types::{Address, ApplicationRecord, JobId, Wei};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

use crate::config::SEPOLIA_CHAIN_ID;
use crate::domain::{
    GatewayError, JobPreview, LedgerCall, Signer, TransactionFailure, TxHash, TxReceipt,
};
use crate::ports::inbound::LedgerGateway;

/// One job as the simulated contract stores it.
#[derive(Debug, Clone)]
struct StoredJob {
    preview: JobPreview,
    description: String,
    applications: Vec<ApplicationRecord>,
}

#[derive(Debug)]
struct LedgerState {
    jobs: Vec<StoredJob>,
    accounts: Vec<Address>,
    wallet_chain: u64,
    required_chain: u64,
    allow_switch: bool,
    application_fee: Wei,
    escrow: Wei,
    fees_collected: Wei,
    payouts: HashMap<Address, Wei>,
    block_number: u64,
    nonce: u64,
    calls: Vec<(Address, LedgerCall)>,
    unreadable: HashSet<JobId>,
    fail_count: bool,
    reject_next_submit: bool,
    submit_delay: Duration,
    count_delay: Option<Duration>,
}

/// Simulated escrow contract behind the `LedgerGateway` port.
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(SEPOLIA_CHAIN_ID)
    }
}

impl InMemoryLedger {
    /// Empty ledger requiring `required_chain`; the wallet starts on it.
    pub fn new(required_chain: u64) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                jobs: Vec::new(),
                accounts: Vec::new(),
                wallet_chain: required_chain,
                required_chain,
                allow_switch: true,
                application_fee: Wei::zero(),
                escrow: Wei::zero(),
                fees_collected: Wei::zero(),
                payouts: HashMap::new(),
                block_number: 0,
                nonce: 0,
                calls: Vec::new(),
                unreadable: HashSet::new(),
                fail_count: false,
                reject_next_submit: false,
                submit_delay: Duration::ZERO,
                count_delay: None,
            }),
        }
    }

    /// Make `account` the wallet's selected account.
    pub fn use_account(&self, account: Address) {
        let mut state = self.state.lock();
        state.accounts.retain(|a| *a != account);
        state.accounts.insert(0, account);
    }

    /// Remove every account from the wallet.
    pub fn lock_wallet(&self) {
        self.state.lock().accounts.clear();
    }

    /// Put the wallet on another chain.
    pub fn set_wallet_chain(&self, chain_id: u64) {
        self.state.lock().wallet_chain = chain_id;
    }

    /// Chain the wallet is on.
    pub fn wallet_chain(&self) -> u64 {
        self.state.lock().wallet_chain
    }

    /// Allow or refuse chain switch requests.
    pub fn set_allow_switch(&self, allow: bool) {
        self.state.lock().allow_switch = allow;
    }

    /// Flat fee required by `applyToJob`.
    pub fn set_application_fee(&self, fee: Wei) {
        self.state.lock().application_fee = fee;
    }

    /// Make preview reads of `id` fail.
    pub fn make_unreadable(&self, id: JobId) {
        self.state.lock().unreadable.insert(id);
    }

    /// Undo [`InMemoryLedger::make_unreadable`].
    pub fn make_readable(&self, id: JobId) {
        self.state.lock().unreadable.remove(&id);
    }

    /// Make `jobCounter()` reads fail.
    pub fn set_count_failure(&self, fail: bool) {
        self.state.lock().fail_count = fail;
    }

    /// The next submission is declined as if the user refused to sign.
    pub fn reject_next_submit(&self) {
        self.state.lock().reject_next_submit = true;
    }

    /// Delay before a submission is mined.
    pub fn set_submit_delay(&self, delay: Duration) {
        self.state.lock().submit_delay = delay;
    }

    /// The next `jobCounter()` read answers with the count at call time,
    /// but only after `delay`.
    pub fn delay_next_count(&self, delay: Duration) {
        self.state.lock().count_delay = Some(delay);
    }

    /// Overwrite stored fields of a job, bypassing contract rules.
    ///
    /// Returns `false` if the job does not exist.
    pub fn tamper<F: FnOnce(&mut JobPreview)>(&self, id: JobId, f: F) -> bool {
        let mut state = self.state.lock();
        match slot(id).and_then(|i| state.jobs.get_mut(i)) {
            Some(job) => {
                f(&mut job.preview);
                true
            }
            None => false,
        }
    }

    /// Stored description of a job.
    pub fn description(&self, id: JobId) -> Option<String> {
        let state = self.state.lock();
        slot(id)
            .and_then(|i| state.jobs.get(i))
            .map(|job| job.description.clone())
    }

    /// Funds currently held in escrow.
    pub fn escrow_balance(&self) -> Wei {
        self.state.lock().escrow
    }

    /// Application fees collected so far.
    pub fn fees_collected(&self) -> Wei {
        self.state.lock().fees_collected
    }

    /// Total paid out to `account` (releases and refunds).
    pub fn paid_out(&self, account: &Address) -> Wei {
        self.state
            .lock()
            .payouts
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Every mined call with its sender, in order.
    pub fn mined_calls(&self) -> Vec<(Address, LedgerCall)> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn connect(&self) -> Result<Signer, GatewayError> {
        let mut state = self.state.lock();
        let address = state
            .accounts
            .first()
            .copied()
            .ok_or_else(|| GatewayError::WalletUnavailable("no accounts".to_string()))?;

        if state.wallet_chain != state.required_chain {
            if !state.allow_switch {
                return Err(GatewayError::NetworkMismatch {
                    expected: state.required_chain,
                    actual: state.wallet_chain,
                });
            }
            state.wallet_chain = state.required_chain;
        }

        Ok(Signer {
            address,
            chain_id: state.wallet_chain,
        })
    }

    async fn job_count(&self) -> Result<u64, GatewayError> {
        let (count, delay) = {
            let mut state = self.state.lock();
            if state.fail_count {
                return Err(GatewayError::Transport("injected counter failure".to_string()));
            }
            (state.jobs.len() as u64, state.count_delay.take())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(count)
    }

    async fn job_preview(&self, id: JobId) -> Result<JobPreview, GatewayError> {
        let state = self.state.lock();
        if state.unreadable.contains(&id) {
            return Err(GatewayError::Transport(format!(
                "injected read failure for job {id}"
            )));
        }
        slot(id)
            .and_then(|i| state.jobs.get(i))
            .map(|job| job.preview.clone())
            .ok_or(GatewayError::UnknownJob(id))
    }

    async fn applications(&self, id: JobId) -> Result<Vec<ApplicationRecord>, GatewayError> {
        let state = self.state.lock();
        slot(id)
            .and_then(|i| state.jobs.get(i))
            .map(|job| job.applications.clone())
            .ok_or(GatewayError::UnknownJob(id))
    }

    async fn application_fee(&self) -> Result<Wei, GatewayError> {
        Ok(self.state.lock().application_fee)
    }

    async fn submit(
        &self,
        signer: &Signer,
        call: LedgerCall,
        value: Wei,
    ) -> Result<TxReceipt, GatewayError> {
        let delay = {
            let mut state = self.state.lock();
            if std::mem::take(&mut state.reject_next_submit) {
                return Err(TransactionFailure::Rejected.into());
            }
            state.submit_delay
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        state
            .execute(signer.address, &call, value)
            .map_err(|reason| TransactionFailure::Reverted {
                tx_hash: None,
                reason: reason.to_string(),
            })?;

        state.nonce += 1;
        state.block_number += 1;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&Keccak256::digest(state.nonce.to_be_bytes()));
        let tx_hash = TxHash(hash);
        debug!(
            action = %call.action_kind(),
            job_id = call.job_id().value(),
            %tx_hash,
            "Simulated call mined"
        );
        state.calls.push((signer.address, call));

        Ok(TxReceipt {
            tx_hash,
            block_number: state.block_number,
        })
    }
}

impl LedgerState {
    /// Apply a call with the contract's rules. Nothing changes on revert.
    fn execute(
        &mut self,
        sender: Address,
        call: &LedgerCall,
        value: Wei,
    ) -> Result<(), &'static str> {
        if !call.is_payable() && !value.is_zero() {
            return Err("function is not payable");
        }

        match call {
            LedgerCall::PostJob { title, description } => {
                if value.is_zero() {
                    return Err("budget required");
                }
                let id = JobId(self.jobs.len() as u64 + 1);
                self.jobs.push(StoredJob {
                    preview: JobPreview {
                        id,
                        employer: sender,
                        title: title.clone(),
                        budget: value,
                        is_open: true,
                        freelancer: Address::ZERO,
                        submitted: false,
                        paid: false,
                        applicants: Vec::new(),
                    },
                    description: description.clone(),
                    applications: Vec::new(),
                });
                self.escrow += value;
            }
            LedgerCall::Apply {
                job_id,
                message,
                bid,
            } => {
                let fee = self.application_fee;
                let job = self.job_mut(*job_id)?;
                if !job.preview.is_open || !job.preview.freelancer.is_zero() {
                    return Err("job not open");
                }
                if job.preview.employer == sender {
                    return Err("employer cannot apply");
                }
                if job.preview.applicants.contains(&sender) {
                    return Err("already applied");
                }
                if value != fee {
                    return Err("incorrect application fee");
                }
                job.preview.applicants.push(sender);
                job.applications.push(ApplicationRecord {
                    applicant: sender,
                    message: message.clone(),
                    bid: *bid,
                });
                self.fees_collected += value;
            }
            LedgerCall::Hire { job_id, applicant } => {
                let job = self.job_mut(*job_id)?;
                if job.preview.employer != sender {
                    return Err("only employer");
                }
                if !job.preview.is_open || !job.preview.freelancer.is_zero() {
                    return Err("job not open");
                }
                if !job.preview.applicants.contains(applicant) {
                    return Err("not an applicant");
                }
                job.preview.freelancer = *applicant;
                job.preview.is_open = false;
            }
            LedgerCall::Submit(job_id) => {
                let job = self.job_mut(*job_id)?;
                if job.preview.freelancer.is_zero() || job.preview.freelancer != sender {
                    return Err("only freelancer");
                }
                if job.preview.submitted {
                    return Err("already submitted");
                }
                job.preview.submitted = true;
            }
            LedgerCall::Approve(job_id) => {
                let job = self.job_mut(*job_id)?;
                if job.preview.employer != sender {
                    return Err("only employer");
                }
                if !job.preview.submitted || job.preview.paid {
                    return Err("nothing to approve");
                }
                job.preview.paid = true;
                let (to, amount) = (job.preview.freelancer, job.preview.budget);
                self.release(to, amount);
            }
            LedgerCall::Cancel(job_id) => {
                let job = self.job_mut(*job_id)?;
                if job.preview.employer != sender {
                    return Err("only employer");
                }
                if !job.preview.is_open || !job.preview.freelancer.is_zero() {
                    return Err("cannot cancel");
                }
                job.preview.is_open = false;
                let (to, amount) = (job.preview.employer, job.preview.budget);
                self.release(to, amount);
            }
        }
        Ok(())
    }

    fn job_mut(&mut self, id: JobId) -> Result<&mut StoredJob, &'static str> {
        slot(id)
            .and_then(|i| self.jobs.get_mut(i))
            .ok_or("job does not exist")
    }

    fn release(&mut self, to: Address, amount: Wei) {
        self.escrow = self.escrow.saturating_sub(amount);
        *self.payouts.entry(to).or_default() += amount;
    }
}

/// Storage index of a job id; ids start at 1.
fn slot(id: JobId) -> Option<usize> {
    usize::try_from(id.value()).ok()?.checked_sub(1)
}
