//! # Domain Module
//!
//! View models handed to the render layer.

pub mod views;

pub use views::*;
