//! # Adapters Layer (Hexagonal Architecture)
//!
//! `PreferenceStore` backends.

mod json_file;
mod memory;

pub use json_file::JsonFilePreferences;
pub use memory::InMemoryPreferences;
