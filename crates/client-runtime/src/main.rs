//! Escrow Board: command-line client for the escrow contract.
//!
//! Each invocation connects the wallet, reads the whole board, runs one
//! command and prints the result.
//!
//! ## Usage
//!
//! ```bash
//! # Show the board through a local wallet endpoint
//! escrow-board jobs
//!
//! # Act as an employer and post a job funded with 1.5 ETH
//! escrow-board role employer
//! escrow-board post "Logo design" --description "Vector logo" --budget 1.5
//!
//! # Try everything against a simulated contract
//! escrow-board --simulate jobs
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use client_runtime::render::{render_applicants, render_board};
use client_runtime::{ApplicantChoice, ClientConfig, ConsoleNotifier, EscrowClient};
use eb_01_ledger_gateway::{
    format_ether, parse_ether, ContractGateway, InMemoryLedger, JsonRpcWallet, LedgerCall,
    LedgerGateway, Signer,
};
use eb_02_role_store::{InMemoryPreferences, JsonFilePreferences, PreferenceStore};
use shared_types::{Address, JobId};

/// Escrow Board command-line client
#[derive(Parser, Debug)]
#[command(name = "escrow-board")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Wallet JSON-RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Escrow contract address
    #[arg(long, global = true)]
    contract: Option<Address>,

    /// Chain id the wallet must be on
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    /// Role preference file
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Use a simulated contract seeded with demo jobs
    #[arg(long, global = true)]
    simulate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board for the connected account
    Jobs,
    /// Choose to act as employer or freelancer
    Role {
        /// `employer` or `freelancer`
        role: String,
    },
    /// Forget the connected account's role
    Logout,
    /// Post a job (employer)
    Post {
        /// Job title
        title: String,
        /// Job description
        #[arg(long)]
        description: String,
        /// Budget in ETH, e.g. 1.5
        #[arg(long)]
        budget: String,
    },
    /// Apply to an open job (freelancer)
    Apply {
        /// Job id
        job: u64,
        /// Cover message
        #[arg(long)]
        message: String,
        /// Bid in ETH
        #[arg(long)]
        bid: String,
    },
    /// List the applications to a job
    Applicants {
        /// Job id
        job: u64,
    },
    /// Hire an applicant by number (1-based) or address (employer)
    Hire {
        /// Job id
        job: u64,
        /// Applicant number or 0x address
        applicant: ApplicantChoice,
    },
    /// Submit work on an assigned job (hired freelancer)
    Submit {
        /// Job id
        job: u64,
    },
    /// Approve submitted work and release payment (employer)
    Approve {
        /// Job id
        job: u64,
    },
    /// Cancel an open job and get the budget back (employer)
    Cancel {
        /// Job id
        job: u64,
    },
}

/// Account the simulated wallet hands out.
const SIMULATED_ACCOUNT: Address = Address::from_bytes([0x11; 20]);

/// Author of the demo jobs in simulation.
const DEMO_EMPLOYER: Address = Address::from_bytes([0xE0; 20]);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = load_config(&args);
    debug!(?config, "Configuration loaded");

    let gateway = build_gateway(&config).await?;
    let preferences = build_preferences(&config)?;
    let client = EscrowClient::new(
        gateway,
        preferences,
        Arc::new(ConsoleNotifier),
        config.reconciler.clone(),
    );

    client
        .connect()
        .await
        .context("Failed to connect wallet")?;

    run(&client, args.command).await
}

/// Log filter from `EB_LOG_LEVEL` or `RUST_LOG`, default `info`. Logs go to
/// stderr so the board on stdout stays clean.
fn init_logging() {
    let filter = std::env::var("EB_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then environment, then flags.
fn load_config(args: &Args) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.rpc_url {
        config.gateway.rpc_url = url.clone();
    }
    if let Some(contract) = args.contract {
        config.gateway.contract_address = contract;
    }
    if let Some(chain_id) = args.chain_id {
        config.gateway.chain_id = chain_id;
    }
    if let Some(path) = &args.prefs {
        config.preferences.path = Some(path.clone());
    }
    config.simulate |= args.simulate;
    config
}

async fn build_gateway(config: &ClientConfig) -> Result<Arc<dyn LedgerGateway>> {
    if config.simulate {
        info!("Using simulated contract");
        return Ok(Arc::new(simulated_ledger(config.gateway.chain_id).await?));
    }

    info!(
        rpc_url = %config.gateway.rpc_url,
        contract = %config.gateway.contract_address,
        "Using wallet endpoint"
    );
    let wallet = JsonRpcWallet::new(
        config.gateway.rpc_url.clone(),
        Duration::from_secs(config.gateway.request_timeout_secs),
    );
    Ok(Arc::new(ContractGateway::new(wallet, config.gateway.clone())))
}

fn build_preferences(config: &ClientConfig) -> Result<Box<dyn PreferenceStore>> {
    match &config.preferences.path {
        Some(path) => {
            let store = JsonFilePreferences::open(path).with_context(|| {
                format!("Failed to open preference file {}", path.display())
            })?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(InMemoryPreferences::new())),
    }
}

/// In-memory contract with a few demo jobs, wallet on `SIMULATED_ACCOUNT`.
async fn simulated_ledger(chain_id: u64) -> Result<InMemoryLedger> {
    let ledger = InMemoryLedger::new(chain_id);
    let author = Signer {
        address: DEMO_EMPLOYER,
        chain_id,
    };

    for (title, description, budget) in [
        ("Landing page", "Responsive single-page site", "1.5"),
        ("Contract audit", "Review a 300-line escrow contract", "3"),
    ] {
        let call = LedgerCall::PostJob {
            title: title.to_string(),
            description: description.to_string(),
        };
        let budget = parse_ether(budget)?;
        ledger
            .submit(&author, call, budget)
            .await
            .context("Failed to seed simulated contract")?;
    }

    ledger.use_account(SIMULATED_ACCOUNT);
    Ok(ledger)
}

async fn run<P: PreferenceStore>(
    client: &EscrowClient<dyn LedgerGateway, P>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Jobs => {}
        Command::Role { role } => {
            client.select_role(&role).await?;
        }
        Command::Logout => {
            client.logout()?;
            return Ok(());
        }
        Command::Post {
            title,
            description,
            budget,
        } => {
            client.post_job(&title, &description, &budget).await?;
        }
        Command::Apply { job, message, bid } => {
            let fee = client.application_fee().await?;
            println!("Application fee: {} ETH", format_ether(fee));
            client.apply(JobId(job), &message, &bid).await?;
        }
        Command::Applicants { job } => {
            let records = client.applicants(JobId(job)).await?;
            print!("{}", render_applicants(&records));
            return Ok(());
        }
        Command::Hire { job, applicant } => {
            client.hire(JobId(job), applicant).await?;
        }
        Command::Submit { job } => {
            client.submit_work(JobId(job)).await?;
        }
        Command::Approve { job } => {
            client.approve(JobId(job)).await?;
        }
        Command::Cancel { job } => {
            client.cancel(JobId(job)).await?;
        }
    }

    print!("{}", render_board(&client.projections()?));
    Ok(())
}
