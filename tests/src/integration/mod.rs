//! Cross-component scenarios.

pub mod board_flows;
pub mod contract_wire;
pub mod guard_and_roles;
pub mod reconciliation;
