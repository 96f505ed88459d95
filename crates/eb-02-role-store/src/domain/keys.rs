//! Preference key layout.

use shared_types::Address;

/// Prefix of per-address role keys.
pub const ROLE_KEY_PREFIX: &str = "role:";

/// Preference key holding the role of `address` (`role:<lowercase address>`).
pub fn role_key(address: &Address) -> String {
    format!("{ROLE_KEY_PREFIX}{address}")
}
