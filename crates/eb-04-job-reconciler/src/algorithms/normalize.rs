//! # Normalization
//!
//! Turns a raw ledger preview into the canonical `Job` entity, or rejects
//! it. Nothing is repaired: a record either satisfies every entity
//! invariant as read, or it is excluded.

use eb_01_ledger_gateway::JobPreview;
use shared_types::{Job, JobId};

use crate::domain::NormalizeError;

/// Normalize the preview read for `requested`.
///
/// # Errors
/// - `IdMismatch` if the record carries another id
/// - `Invariant` if the flag combination is impossible
pub fn normalize(preview: JobPreview, requested: JobId) -> Result<Job, NormalizeError> {
    if preview.id != requested {
        return Err(NormalizeError::IdMismatch {
            requested,
            reported: preview.id,
        });
    }

    let job = Job {
        id: preview.id,
        employer: preview.employer,
        title: preview.title,
        description: String::new(),
        budget: preview.budget,
        is_open: preview.is_open,
        freelancer: preview.freelancer,
        submitted: preview.submitted,
        paid: preview.paid,
        applicants: preview.applicants,
    };
    job.verify()?;
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::{Address, JobInvariantError, JobState, Wei};

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn preview(id: u64) -> JobPreview {
        JobPreview {
            id: JobId(id),
            employer: addr(0xE1),
            title: "Design".to_string(),
            budget: Wei::from(100u64),
            is_open: true,
            freelancer: Address::ZERO,
            submitted: false,
            paid: false,
            applicants: vec![addr(1), addr(2)],
        }
    }

    #[test]
    fn test_open_preview_normalizes() {
        let job = normalize(preview(3), JobId(3)).unwrap();
        assert_eq!(job.id, JobId(3));
        assert_eq!(job.applicants, vec![addr(1), addr(2)]);
        assert!(job.description.is_empty());
        assert_eq!(job.state(), JobState::Open);
    }

    #[test]
    fn test_cancelled_preview_normalizes() {
        let mut p = preview(3);
        p.is_open = false;
        assert_eq!(
            normalize(p, JobId(3)).unwrap().state(),
            JobState::Cancelled
        );
    }

    #[test]
    fn test_id_mismatch_rejected() {
        assert_eq!(
            normalize(preview(4), JobId(3)),
            Err(NormalizeError::IdMismatch {
                requested: JobId(3),
                reported: JobId(4)
            })
        );
    }

    #[test]
    fn test_impossible_flags_rejected() {
        let mut p = preview(3);
        p.is_open = false;
        p.paid = true;
        assert_eq!(
            normalize(p, JobId(3)),
            Err(NormalizeError::Invariant(
                JobInvariantError::PaidWithoutSubmission
            ))
        );

        let mut p = preview(3);
        p.is_open = false;
        p.submitted = true;
        assert_eq!(
            normalize(p, JobId(3)),
            Err(NormalizeError::Invariant(JobInvariantError::MissingFreelancer))
        );

        let mut p = preview(3);
        p.is_open = false;
        p.freelancer = p.employer;
        assert_eq!(
            normalize(p, JobId(3)),
            Err(NormalizeError::Invariant(
                JobInvariantError::EmployerIsFreelancer
            ))
        );
    }

    #[test]
    fn test_zero_id_rejected() {
        assert_eq!(
            normalize(preview(0), JobId(0)),
            Err(NormalizeError::Invariant(JobInvariantError::InvalidId))
        );
    }

    fn arb_preview() -> impl Strategy<Value = JobPreview> {
        (
            0u64..4,
            prop_oneof![Just(Address::ZERO), Just(addr(0xE1)), Just(addr(0x02))],
            any::<bool>(),
            prop_oneof![Just(Address::ZERO), Just(addr(0xE1)), Just(addr(0x02))],
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(id, employer, is_open, freelancer, submitted, paid)| JobPreview {
                id: JobId(id),
                employer,
                title: String::new(),
                budget: Wei::zero(),
                is_open,
                freelancer,
                submitted,
                paid,
                applicants: Vec::new(),
            })
    }

    proptest! {
        #[test]
        fn prop_normalized_jobs_satisfy_invariants(p in arb_preview(), requested in 0u64..4) {
            if let Ok(job) = normalize(p, JobId(requested)) {
                prop_assert_eq!(job.id, JobId(requested));
                prop_assert!(job.id.value() > 0);
                prop_assert!(!job.employer.is_zero());
                prop_assert!(!(job.submitted || job.paid) || job.has_freelancer());
                prop_assert!(!job.paid || job.submitted);
                prop_assert!(!job.has_freelancer() || job.freelancer != job.employer);
                prop_assert!(JobState::classify(&job).is_ok());
                if !job.is_open && !job.has_freelancer() && !job.paid {
                    prop_assert_eq!(job.state(), JobState::Cancelled);
                }
            }
        }
    }
}
