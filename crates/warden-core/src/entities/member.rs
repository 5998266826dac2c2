//! Member entity - a snapshot of an account's membership in the guild

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild member snapshot as reported by the platform
///
/// The platform owns the member; the engine only reads this snapshot and asks
/// the platform to mutate roles or nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Snowflake,
    /// Account username (not the guild nickname)
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub role_ids: BTreeSet<Snowflake>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub bot: bool,
}

impl Member {
    /// Create a member whose account-creation instant is taken from its ID
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            nickname: None,
            role_ids: BTreeSet::new(),
            created_at: id.created_at(),
            bot: false,
        }
    }

    /// Override the account-creation instant
    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder: start with the given roles
    pub fn with_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = Snowflake>,
    {
        self.role_ids.extend(roles);
        self
    }

    /// Builder: mark as a bot account
    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }

    /// Get display name (nickname if set, otherwise username)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// Add a role; returns false if it was already held
    pub fn add_role(&mut self, role_id: Snowflake) -> bool {
        self.role_ids.insert(role_id)
    }

    /// Remove a role; returns false if it was not held
    pub fn remove_role(&mut self, role_id: Snowflake) -> bool {
        self.role_ids.remove(&role_id)
    }

    /// Whole days between account creation and `now` (floored, never negative)
    pub fn account_age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }
}
