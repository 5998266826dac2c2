//! Permissions bitflags for role-derived access control
//!
//! Staff tiers grant capabilities; commands require them. A member's effective
//! capabilities are the union over every tier role they hold.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Engine capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Send messages in a text channel (the capability a channel lock toggles)
        const SEND_MESSAGES    = 1 << 0;
        /// Delete other members' messages, speak as the bot
        const MANAGE_MESSAGES  = 1 << 1;
        /// Edit channel permission overwrites
        const MANAGE_CHANNELS  = 1 << 2;
        /// Kick members from the guild
        const KICK_MEMBERS     = 1 << 3;
        /// Ban members from the guild
        const BAN_MEMBERS      = 1 << 4;
        /// Apply timed mutes
        const MODERATE_MEMBERS = 1 << 5;

        /// Everything a staff tier grants short of banning
        const STAFF = Self::MANAGE_MESSAGES.bits()
            | Self::MANAGE_CHANNELS.bits()
            | Self::KICK_MEMBERS.bits()
            | Self::MODERATE_MEMBERS.bits();

        /// Full moderation set
        const MODERATION = Self::STAFF.bits() | Self::BAN_MEMBERS.bits();
    }
}

impl Permissions {
    /// Check if the permission set contains every bit of `permission`
    ///
    /// The empty set is always satisfied.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(permission)
    }

    /// Check if the permission set has any of the given permissions
    #[inline]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        self.intersects(permissions)
    }

    /// Combine permissions from multiple roles
    pub fn combine<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Permissions>,
    {
        roles.into_iter().fold(Permissions::empty(), |acc, p| acc | p)
    }

    /// Get a list of all individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.list().join(", "))
    }
}
