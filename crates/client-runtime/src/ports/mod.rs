//! Ports for the client runtime.

pub mod outbound;

pub use outbound::{Notifier, RecordingNotifier};
