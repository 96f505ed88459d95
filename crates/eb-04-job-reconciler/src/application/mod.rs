//! # Application Module

pub mod reconciler;

pub use reconciler::JobReconciler;
