//! # Text Rendering
//!
//! Plain-text board for the terminal. Consumes projections only; which
//! actions appear is decided upstream.

use eb_01_ledger_gateway::format_ether;
use eb_05_view_projector::{is_settled, ApplicationEntry, JobCard, Projections};
use shared_types::ApplicationRecord;
use std::fmt::Write;

/// Render every section visible to the viewer.
pub fn render_board(views: &Projections) -> String {
    let mut out = String::new();
    let role = views
        .viewer
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "no role".to_string());
    let _ = writeln!(out, "Account {} ({role})", views.viewer.address);
    if views.open_authored_count > 0 {
        let _ = writeln!(out, "Open jobs you posted: {}", views.open_authored_count);
    }
    if views.role_change_locked {
        let _ = writeln!(out, "Role change locked until your open jobs are filled or cancelled");
    }

    section(&mut out, "Open jobs", &views.open_jobs, card_line);
    if !views.my_posted.is_empty() {
        section(&mut out, "My posted jobs", &views.my_posted, card_line);
    }
    if !views.my_applications.is_empty() {
        section(&mut out, "My applications", &views.my_applications, application_line);
    }
    if !views.my_assignments.is_empty() {
        section(&mut out, "My assignments", &views.my_assignments, card_line);
    }

    if !views.excluded_jobs.is_empty() {
        let ids: Vec<String> = views.excluded_jobs.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "\nNot shown (unreadable): {}", ids.join(", "));
    }
    out
}

/// Render the applications to one job, numbered for `hire`.
pub fn render_applicants(records: &[ApplicationRecord]) -> String {
    if records.is_empty() {
        return "No applications yet\n".to_string();
    }
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}  bid {} ETH  {:?}",
            i + 1,
            record.applicant,
            format_ether(record.bid),
            record.message
        );
    }
    out
}

fn section<T>(out: &mut String, heading: &str, items: &[T], line: fn(&T) -> String) {
    let _ = writeln!(out, "\n{heading}");
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in items {
        let _ = writeln!(out, "  {}", line(item));
    }
}

fn card_line(card: &JobCard) -> String {
    let mut line = format!(
        "{} {:?}  {} ETH  [{}]",
        card.id,
        card.title,
        format_ether(card.budget),
        card.state.label()
    );
    if card.applicant_count > 0 {
        let _ = write!(line, "  {} applicant(s)", card.applicant_count);
    }
    if let Some(freelancer) = card.freelancer {
        let _ = write!(line, "  freelancer {}", freelancer.short());
    }
    if is_settled(card) {
        line.push_str("  (closed)");
    }
    let actions: Vec<String> = card
        .actions
        .iter()
        .map(|a| {
            if a.enabled {
                a.action.to_string()
            } else {
                format!("{} (pending)", a.action)
            }
        })
        .collect();
    if !actions.is_empty() {
        let _ = write!(line, "  -> {}", actions.join(", "));
    }
    line
}

fn application_line(entry: &ApplicationEntry) -> String {
    let mut line = format!(
        "{} {:?}  {} ETH  [{}]",
        entry.job_id,
        entry.title,
        format_ether(entry.budget),
        entry.status.label()
    );
    if entry.hired_viewer {
        line.push_str("  (you)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use eb_03_action_guard::NothingPending;
    use eb_04_job_reconciler::JobSnapshot;
    use eb_05_view_projector::{project, Viewer};
    use shared_types::{Address, Job, JobId, Role, U256};

    fn job(id: u64, employer: Address) -> Job {
        Job {
            id: JobId(id),
            employer,
            title: format!("Job {id}"),
            description: String::new(),
            budget: U256::exp10(18),
            is_open: true,
            freelancer: Address::ZERO,
            submitted: false,
            paid: false,
            applicants: vec![],
        }
    }

    #[test]
    fn test_board_lists_sections_and_actions() {
        let me = Address::from_bytes([0xE1; 20]);
        let snapshot = JobSnapshot::new(vec![job(1, me)], vec![], 1);
        let views = project(&snapshot, &Viewer::new(me, Some(Role::Employer)), &NothingPending);

        let text = render_board(&views);
        assert!(text.contains("(employer)"));
        assert!(text.contains("Open jobs you posted: 1"));
        assert!(text.contains("My posted jobs"));
        assert!(text.contains("#1 \"Job 1\"  1.0 ETH  [Open]"));
        assert!(text.contains("-> hire, cancel"));
        assert!(!text.contains("My applications"));
        assert!(!text.contains("(closed)"));
    }

    #[test]
    fn test_cancelled_job_marked_closed() {
        let me = Address::from_bytes([0xE1; 20]);
        let mut cancelled = job(2, me);
        cancelled.is_open = false;
        let snapshot = JobSnapshot::new(vec![cancelled], vec![], 2);
        let views = project(&snapshot, &Viewer::new(me, Some(Role::Employer)), &NothingPending);

        let text = render_board(&views);
        assert!(text.contains("#2 \"Job 2\"  1.0 ETH  [Cancelled]  (closed)"));
        assert!(!text.contains("->"));
    }

    #[test]
    fn test_applicants_numbered_from_one() {
        let records = vec![ApplicationRecord {
            applicant: Address::from_bytes([0xF1; 20]),
            message: "Ready".to_string(),
            bid: U256::exp10(17),
        }];
        let text = render_applicants(&records);
        assert!(text.starts_with("  1. 0xf1f1"));
        assert!(text.contains("bid 0.1 ETH"));
        assert_eq!(render_applicants(&[]), "No applications yet\n");
    }
}
