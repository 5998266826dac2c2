//! Command names and the capability each one requires

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Permissions;

/// Every command the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    Kick,
    Ban,
    Timeout,
    Purge,
    Lock,
    Unlock,
    Say,
    Embed,
    Help,
}

impl CommandName {
    pub const ALL: [CommandName; 9] = [
        Self::Kick,
        Self::Ban,
        Self::Timeout,
        Self::Purge,
        Self::Lock,
        Self::Unlock,
        Self::Say,
        Self::Embed,
        Self::Help,
    ];

    /// Gating table: the capability a member needs to run this command
    ///
    /// An empty set means the command is open to every member.
    pub fn required_permissions(self) -> Permissions {
        match self {
            Self::Kick => Permissions::KICK_MEMBERS,
            Self::Ban => Permissions::BAN_MEMBERS,
            Self::Timeout => Permissions::MODERATE_MEMBERS,
            Self::Purge | Self::Say | Self::Embed => Permissions::MANAGE_MESSAGES,
            Self::Lock | Self::Unlock => Permissions::MANAGE_CHANNELS,
            Self::Help => Permissions::empty(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kick => "kick",
            Self::Ban => "ban",
            Self::Timeout => "timeout",
            Self::Purge => "purge",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Say => "say",
            Self::Embed => "embed",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown command: {s}"))
    }
}
