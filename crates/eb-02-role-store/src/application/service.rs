//! # Role Store Service
//!
//! Per-address role selection on top of a `PreferenceStore`.

use shared_types::{Address, Role};
use tracing::{info, warn};

use crate::domain::{role_key, RoleError};
use crate::ports::PreferenceStore;

/// Role Store - remembers which role each address acts in.
pub struct RoleStore<P: PreferenceStore> {
    prefs: P,
}

impl<P: PreferenceStore> RoleStore<P> {
    /// Create a role store over `prefs`.
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    /// Underlying preference store.
    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    /// Role of `address`, `None` when unset.
    ///
    /// A stored value that is not a valid role is logged and reads as unset.
    pub fn get(&self, address: &Address) -> Result<Option<Role>, RoleError> {
        let Some(raw) = self.prefs.get(&role_key(address))? else {
            return Ok(None);
        };
        match raw.parse::<Role>() {
            Ok(role) => Ok(Some(role)),
            Err(e) => {
                warn!(%address, stored = %raw, error = %e, "Ignoring unrecognized stored role");
                Ok(None)
            }
        }
    }

    /// Record `role` for `address`.
    ///
    /// # Errors
    /// `RoleLocked` when the address is currently an employer, the new role
    /// differs, and it still has open authored jobs.
    pub fn set(
        &self,
        address: &Address,
        role: Role,
        has_open_authored_jobs: bool,
    ) -> Result<(), RoleError> {
        let current = self.get(address)?;
        if is_locked(current, role, has_open_authored_jobs) {
            warn!(%address, requested = %role, "Role change blocked by open jobs");
            return Err(RoleError::RoleLocked { address: *address });
        }

        self.prefs.put(&role_key(address), role.as_str())?;
        if current != Some(role) {
            info!(%address, %role, "Role selected");
        }
        Ok(())
    }

    /// Parse user input and record it.
    ///
    /// # Errors
    /// `InvalidRole` unless the input is `employer` or `freelancer`, plus the
    /// errors of [`RoleStore::set`].
    pub fn set_from_str(
        &self,
        address: &Address,
        input: &str,
        has_open_authored_jobs: bool,
    ) -> Result<Role, RoleError> {
        let role: Role = input.parse()?;
        self.set(address, role, has_open_authored_jobs)?;
        Ok(role)
    }

    /// Forget the role of `address`.
    pub fn clear(&self, address: &Address) -> Result<(), RoleError> {
        self.prefs.remove(&role_key(address))?;
        info!(%address, "Role cleared");
        Ok(())
    }

    /// May `address` switch away from its current role?
    ///
    /// Only an employer with open authored jobs is locked. Storage failures
    /// read as unset, which never locks.
    pub fn can_change_role(&self, address: &Address, has_open_authored_jobs: bool) -> bool {
        let current = self.get(address).unwrap_or(None);
        current != Some(Role::Employer) || !has_open_authored_jobs
    }
}

/// Switching from employer to anything else is blocked while jobs are open.
fn is_locked(current: Option<Role>, requested: Role, has_open_authored_jobs: bool) -> bool {
    current == Some(Role::Employer) && requested != Role::Employer && has_open_authored_jobs
}
