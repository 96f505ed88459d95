//! # Algorithms

pub mod actions;
pub mod project;

pub use actions::available_actions;
pub use project::{is_settled, project};
