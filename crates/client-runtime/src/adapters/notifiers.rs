//! # Notifier Adapters

use tracing::{error, info, warn};

use crate::domain::Notice;
use crate::ports::Notifier;

/// Emits notices as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::ActionFailed { action, job_id, reason } => {
                error!(%action, job_id = job_id.value(), %reason, "Action failed");
            }
            Notice::AlreadyPending { action, job_id } => {
                warn!(%action, job_id = job_id.value(), "Action already pending");
            }
            Notice::PartialRead { .. } | Notice::RefreshFailed(_) => warn!("{notice}"),
            _ => info!("{notice}"),
        }
    }
}

/// Prints notices for a terminal user. Failures go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn is_problem(notice: &Notice) -> bool {
        matches!(
            notice,
            Notice::ActionFailed { .. }
                | Notice::AlreadyPending { .. }
                | Notice::PartialRead { .. }
                | Notice::RefreshFailed(_)
        )
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        if Self::is_problem(notice) {
            eprintln!("! {notice}");
        } else {
            println!("* {notice}");
        }
    }
}
