//! Permission service
//!
//! Resolves whether a role set may run a command. Staff tiers grant
//! capability sets; a member's capabilities are the union over every tier
//! held, and each command requires a capability.

use std::collections::BTreeSet;

use tracing::debug;

use warden_core::{CommandName, DomainError, Permissions, RoleCatalog, Snowflake};

/// Outcome of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied { missing: Permissions },
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Permission service for command access control
///
/// A pure function of (role set, command); never touches the platform.
pub struct PermissionService<'a> {
    catalog: &'a RoleCatalog,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(catalog: &'a RoleCatalog) -> Self {
        Self { catalog }
    }

    /// Union of capabilities granted by the staff tiers in `roles`
    pub fn capabilities(&self, roles: &BTreeSet<Snowflake>) -> Permissions {
        self.catalog.permissions_for(roles)
    }

    /// Decide whether `roles` may run `command`
    pub fn resolve(&self, roles: &BTreeSet<Snowflake>, command: CommandName) -> Decision {
        let required = command.required_permissions();
        let granted = self.capabilities(roles);

        if granted.has(required) {
            Decision::Allowed
        } else {
            let missing = required.difference(granted);
            debug!(%command, missing = %missing, "Command denied");
            Decision::Denied { missing }
        }
    }

    /// Check permission and return error if denied
    pub fn require(
        &self,
        roles: &BTreeSet<Snowflake>,
        command: CommandName,
    ) -> Result<(), DomainError> {
        match self.resolve(roles, command) {
            Decision::Allowed => Ok(()),
            Decision::Denied { .. } => Err(DomainError::PermissionDenied { command }),
        }
    }

    /// Highest staff rank in `roles`; 0 for non-staff
    pub fn rank(&self, roles: &BTreeSet<Snowflake>) -> u8 {
        self.catalog.highest_rank(roles)
    }

    /// Invoker must strictly outrank the target
    pub fn require_outranks(
        &self,
        invoker_roles: &BTreeSet<Snowflake>,
        target_roles: &BTreeSet<Snowflake>,
        command: CommandName,
    ) -> Result<(), DomainError> {
        if self.rank(invoker_roles) > self.rank(target_roles) {
            Ok(())
        } else {
            Err(DomainError::HierarchyViolation { command })
        }
    }
}
