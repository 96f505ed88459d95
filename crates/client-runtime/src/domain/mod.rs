//! Domain layer for the client runtime.

pub mod errors;
pub mod notice;
pub mod session;

pub use errors::ClientError;
pub use notice::{ActionOutcome, ApplicantChoice, Notice};
pub use session::Session;
