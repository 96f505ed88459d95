//! # Application Module
//!
//! The Role Store service.

pub mod service;

pub use service::RoleStore;
