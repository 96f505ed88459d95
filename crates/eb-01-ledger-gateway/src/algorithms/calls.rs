//! # Escrow Call Shapes
//!
//! Maps each ledger operation onto its contract function and back. One
//! typed result per read, so callers never see positional tuples.

use shared_types::{ApplicationRecord, JobId, U256};

use super::abi::{encode_call, signatures, AbiDecoder, AbiError, Token, WORD};
use crate::domain::{JobPreview, LedgerCall};

/// Call data for a state-changing operation.
pub fn encode_ledger_call(call: &LedgerCall) -> Vec<u8> {
    match call {
        LedgerCall::PostJob { title, description } => encode_call(
            signatures::POST_JOB,
            &[
                Token::String(title.clone()),
                Token::String(description.clone()),
            ],
        ),
        LedgerCall::Apply {
            job_id,
            message,
            bid,
        } => encode_call(
            signatures::APPLY_TO_JOB,
            &[
                job_token(*job_id),
                Token::String(message.clone()),
                Token::Uint(*bid),
            ],
        ),
        LedgerCall::Hire { job_id, applicant } => encode_call(
            signatures::HIRE_APPLICANT,
            &[job_token(*job_id), Token::Address(*applicant)],
        ),
        LedgerCall::Submit(id) => encode_call(signatures::SUBMIT_WORK, &[job_token(*id)]),
        LedgerCall::Approve(id) => encode_call(signatures::APPROVE_WORK, &[job_token(*id)]),
        LedgerCall::Cancel(id) => encode_call(signatures::CANCEL_JOB, &[job_token(*id)]),
    }
}

/// Call data for `getJobPreview(id)`.
pub fn encode_preview_query(id: JobId) -> Vec<u8> {
    encode_call(signatures::GET_JOB_PREVIEW, &[job_token(id)])
}

/// Call data for `getApplications(id)`.
pub fn encode_applications_query(id: JobId) -> Vec<u8> {
    encode_call(signatures::GET_APPLICATIONS, &[job_token(id)])
}

/// Call data for `jobCounter()`.
pub fn encode_count_query() -> Vec<u8> {
    encode_call(signatures::JOB_COUNTER, &[])
}

/// Call data for `applicationFeeWei()`.
pub fn encode_fee_query() -> Vec<u8> {
    encode_call(signatures::APPLICATION_FEE, &[])
}

/// Decode a single `uint256` return value.
pub fn decode_uint(data: &[u8]) -> Result<U256, AbiError> {
    AbiDecoder::new(data).uint(0)
}

/// Decode a single `uint256` return value that must fit a `u64`.
pub fn decode_u64(data: &[u8]) -> Result<u64, AbiError> {
    AbiDecoder::new(data).u64(0)
}

/// Decode `(JobPreview preview, address[] applicants)`.
///
/// The preview tuple holds a string, so it is dynamic: the head carries an
/// offset to it, and the title offset inside it is relative to the tuple.
pub fn decode_job_preview(data: &[u8]) -> Result<JobPreview, AbiError> {
    let dec = AbiDecoder::new(data);
    let base = dec.offset(0)?;
    let applicants_at = dec.offset(WORD)?;

    let title_at = base
        .checked_add(dec.offset(base + 2 * WORD)?)
        .ok_or(AbiError::Overflow(base + 2 * WORD))?;

    Ok(JobPreview {
        id: JobId(dec.u64(base)?),
        employer: dec.address(base + WORD)?,
        title: dec.string(title_at)?,
        budget: dec.uint(base + 3 * WORD)?,
        is_open: dec.boolean(base + 4 * WORD)?,
        freelancer: dec.address(base + 5 * WORD)?,
        submitted: dec.boolean(base + 6 * WORD)?,
        paid: dec.boolean(base + 7 * WORD)?,
        applicants: dec.address_array(applicants_at)?,
    })
}

/// Decode `(address[] applicants, string[] messages, uint256[] bids)` into
/// records. The three arrays must line up.
pub fn decode_applications(data: &[u8]) -> Result<Vec<ApplicationRecord>, AbiError> {
    let dec = AbiDecoder::new(data);
    let applicants = dec.address_array(dec.offset(0)?)?;
    let messages = dec.string_array(dec.offset(WORD)?)?;
    let bids = dec.uint_array(dec.offset(2 * WORD)?)?;

    if applicants.len() != messages.len() || applicants.len() != bids.len() {
        return Err(AbiError::LengthMismatch(format!(
            "{} applicants, {} messages, {} bids",
            applicants.len(),
            messages.len(),
            bids.len()
        )));
    }

    Ok(applicants
        .into_iter()
        .zip(messages)
        .zip(bids)
        .map(|((applicant, message), bid)| ApplicationRecord {
            applicant,
            message,
            bid,
        })
        .collect())
}

fn job_token(id: JobId) -> Token {
    Token::Uint(U256::from(id.value()))
}
