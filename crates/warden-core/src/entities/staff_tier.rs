//! Staff tiers - ordered moderation ranks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Permissions;

/// Ordered staff tier, lowest first
///
/// The derived `Ord` is the rank order used for hierarchy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffTier {
    TrialModerator,
    Staff,
    Manager,
    ExChair,
    HeadManager,
    Chair,
    Founder,
}

impl StaffTier {
    pub const ALL: [StaffTier; 7] = [
        Self::TrialModerator,
        Self::Staff,
        Self::Manager,
        Self::ExChair,
        Self::HeadManager,
        Self::Chair,
        Self::Founder,
    ];

    /// Numeric rank; 0 is reserved for members without any staff tier
    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Capabilities granted by holding this tier
    pub fn permissions(self) -> Permissions {
        match self {
            Self::TrialModerator => Permissions::STAFF,
            _ => Permissions::MODERATION,
        }
    }

    /// Configuration key for this tier
    pub fn key(self) -> &'static str {
        match self {
            Self::TrialModerator => "trial_mod",
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::ExChair => "ex_chairman",
            Self::HeadManager => "head_manager",
            Self::Chair => "chairman",
            Self::Founder => "founder",
        }
    }
}

impl fmt::Display for StaffTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StaffTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "trial_mod" | "trial_moderator" => Ok(Self::TrialModerator),
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "ex_chairman" | "ex_chair" => Ok(Self::ExChair),
            "head_manager" => Ok(Self::HeadManager),
            "chairman" | "chair" => Ok(Self::Chair),
            "founder" => Ok(Self::Founder),
            _ => Err(format!("Invalid staff tier: {s}")),
        }
    }
}
