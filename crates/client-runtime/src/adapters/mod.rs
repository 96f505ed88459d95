//! Adapters for the client runtime.

pub mod notifiers;

pub use notifiers::{ConsoleNotifier, TracingNotifier};
