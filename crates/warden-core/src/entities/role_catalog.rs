//! Role catalog - maps opaque role IDs to their meaning in the engine

use std::collections::BTreeMap;

use crate::value_objects::{Permissions, Snowflake};

use super::{LeagueTag, StaffTier};

/// Semantic tag of a configured role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTag {
    Unverified,
    Verified,
    Auto,
    Trusted,
    Staff(StaffTier),
    League(LeagueTag),
}

/// Static role configuration
///
/// Built once at startup; roles are never created or destroyed at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    pub unverified: Snowflake,
    pub verified: Snowflake,
    pub auto: Snowflake,
    pub trusted: Snowflake,
    pub staff: BTreeMap<Snowflake, StaffTier>,
    pub leagues: BTreeMap<Snowflake, LeagueTag>,
}

impl RoleCatalog {
    /// Create a catalog with the four fixed roles and no staff or league roles
    pub fn new(
        unverified: Snowflake,
        verified: Snowflake,
        auto: Snowflake,
        trusted: Snowflake,
    ) -> Self {
        Self {
            unverified,
            verified,
            auto,
            trusted,
            staff: BTreeMap::new(),
            leagues: BTreeMap::new(),
        }
    }

    /// Builder: register a staff tier role
    pub fn with_staff(mut self, role_id: Snowflake, tier: StaffTier) -> Self {
        self.staff.insert(role_id, tier);
        self
    }

    /// Builder: register a league tag role
    pub fn with_league(mut self, role_id: Snowflake, tag: LeagueTag) -> Self {
        self.leagues.insert(role_id, tag);
        self
    }

    /// Look up what a role means, if anything
    pub fn tag_of(&self, role_id: Snowflake) -> Option<RoleTag> {
        if role_id == self.unverified {
            Some(RoleTag::Unverified)
        } else if role_id == self.verified {
            Some(RoleTag::Verified)
        } else if role_id == self.auto {
            Some(RoleTag::Auto)
        } else if role_id == self.trusted {
            Some(RoleTag::Trusted)
        } else if let Some(tier) = self.staff.get(&role_id) {
            Some(RoleTag::Staff(*tier))
        } else {
            self.leagues.get(&role_id).map(|tag| RoleTag::League(*tag))
        }
    }

    /// Staff tiers held among `roles`
    pub fn staff_tiers<'a, I>(&'a self, roles: I) -> impl Iterator<Item = StaffTier> + 'a
    where
        I: IntoIterator<Item = &'a Snowflake>,
        I::IntoIter: 'a,
    {
        roles
            .into_iter()
            .filter_map(move |role_id| self.staff.get(role_id).copied())
    }

    /// Highest staff rank among `roles`; 0 when no staff tier is held
    pub fn highest_rank<'a, I>(&'a self, roles: I) -> u8
    where
        I: IntoIterator<Item = &'a Snowflake>,
        I::IntoIter: 'a,
    {
        self.staff_tiers(roles)
            .map(StaffTier::rank)
            .max()
            .unwrap_or(0)
    }

    /// Union of the capabilities granted by every staff tier in `roles`
    pub fn permissions_for<'a, I>(&'a self, roles: I) -> Permissions
    where
        I: IntoIterator<Item = &'a Snowflake>,
        I::IntoIter: 'a,
    {
        Permissions::combine(self.staff_tiers(roles).map(StaffTier::permissions))
    }

    /// League tag mapped to a role, if any
    pub fn league_tag(&self, role_id: Snowflake) -> Option<LeagueTag> {
        self.leagues.get(&role_id).copied()
    }

    /// The league role that wins among `roles`, by fixed tag priority
    ///
    /// Ties on the same tag (two role IDs mapped to one tag) fall back to the
    /// smaller role ID, so the choice never depends on input order.
    pub fn winning_league<'a, I>(&self, roles: I) -> Option<(Snowflake, LeagueTag)>
    where
        I: IntoIterator<Item = &'a Snowflake>,
    {
        roles
            .into_iter()
            .filter_map(|role_id| self.league_tag(*role_id).map(|tag| (*role_id, tag)))
            .min_by_key(|(role_id, tag)| (*tag, *role_id))
    }
}
