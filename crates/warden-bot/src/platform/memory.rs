//! In-memory guild
//!
//! A self-contained [`GuildPlatform`] that keeps members, roles, nicknames and
//! channel state in process. The replay driver runs against it, and so do the
//! scenario tests. Individual calls can be made to fail to exercise partial
//! success paths.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use warden_core::traits::{GuildPlatform, OutgoingMessage, PlatformResult};
use warden_core::{Member, Permissions, PlatformError, Snowflake};

/// Platform-side view of one member
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub roles: BTreeSet<Snowflake>,
    pub nickname: Option<String>,
    pub timed_out_until: Option<DateTime<Utc>>,
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            username: member.username.clone(),
            created_at: member.created_at,
            roles: member.role_ids.clone(),
            nickname: member.nickname.clone(),
            timed_out_until: None,
        }
    }
}

/// Platform-side view of one text channel
#[derive(Debug, Clone, Default)]
pub struct ChannelRecord {
    /// Capabilities denied to the everyone principal
    pub everyone_denied: Permissions,
    /// Messages currently in the channel history
    pub history: u64,
    /// Messages the bot posted here, oldest first
    pub posted: Vec<OutgoingMessage>,
}

#[derive(Debug, Default)]
struct GuildState {
    members: HashMap<Snowflake, MemberRecord>,
    channels: HashMap<Snowflake, ChannelRecord>,
    kicked: Vec<Snowflake>,
    banned: BTreeSet<Snowflake>,

    // Injected failures
    nickname_forbidden: HashSet<Snowflake>,
    role_mutations_fail: bool,
    send_fails_in: HashSet<Snowflake>,
}

/// In-process guild
#[derive(Debug, Default)]
pub struct MemoryGuild {
    state: RwLock<GuildState>,
}

impl MemoryGuild {
    pub fn new() -> Self {
        Self::default()
    }

    // === Membership ===

    /// Register a member, replacing any previous record
    pub fn insert_member(&self, member: &Member) {
        self.state
            .write()
            .members
            .insert(member.id, MemberRecord::from(member));
    }

    /// Register a member seen in an event if the guild does not know them yet
    ///
    /// Known members keep their platform-side roles; event snapshots can be
    /// older than the platform state.
    pub fn observe_member(&self, member: &Member) {
        self.state
            .write()
            .members
            .entry(member.id)
            .or_insert_with(|| MemberRecord::from(member));
    }

    /// Apply roles granted outside the engine (e.g. a member picking a club)
    pub fn grant_roles(&self, member_id: Snowflake, roles: &[Snowflake]) -> PlatformResult<()> {
        let mut state = self.state.write();
        let record = state
            .members
            .get_mut(&member_id)
            .ok_or(PlatformError::UnknownMember(member_id))?;
        record.roles.extend(roles.iter().copied());
        Ok(())
    }

    pub fn member(&self, member_id: Snowflake) -> Option<MemberRecord> {
        self.state.read().members.get(&member_id).cloned()
    }

    pub fn roles_of(&self, member_id: Snowflake) -> BTreeSet<Snowflake> {
        self.member(member_id)
            .map(|record| record.roles)
            .unwrap_or_default()
    }

    pub fn nickname_of(&self, member_id: Snowflake) -> Option<String> {
        self.member(member_id).and_then(|record| record.nickname)
    }

    pub fn timed_out_until(&self, member_id: Snowflake) -> Option<DateTime<Utc>> {
        self.member(member_id)
            .and_then(|record| record.timed_out_until)
    }

    pub fn was_kicked(&self, member_id: Snowflake) -> bool {
        self.state.read().kicked.contains(&member_id)
    }

    pub fn is_banned(&self, member_id: Snowflake) -> bool {
        self.state.read().banned.contains(&member_id)
    }

    // === Channels ===

    /// Seed a channel's history with `count` messages
    pub fn add_history(&self, channel_id: Snowflake, count: u64) {
        let mut state = self.state.write();
        let channel = state.channels.entry(channel_id).or_default();
        channel.history = channel.history.saturating_add(count);
    }

    pub fn channel(&self, channel_id: Snowflake) -> ChannelRecord {
        self.state
            .read()
            .channels
            .get(&channel_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the everyone principal currently holds `capability`
    pub fn everyone_allowed(&self, channel_id: Snowflake, capability: Permissions) -> bool {
        !self.channel(channel_id).everyone_denied.intersects(capability)
    }

    pub fn posted(&self, channel_id: Snowflake) -> Vec<OutgoingMessage> {
        self.channel(channel_id).posted
    }

    // === Failure injection ===

    /// Make nickname edits for `member_id` fail with `Forbidden`
    pub fn forbid_nickname(&self, member_id: Snowflake) {
        self.state.write().nickname_forbidden.insert(member_id);
    }

    /// Make every role mutation fail with `Forbidden`
    pub fn fail_role_mutations(&self, fail: bool) {
        self.state.write().role_mutations_fail = fail;
    }

    /// Make posting to `channel_id` fail
    pub fn fail_sends_in(&self, channel_id: Snowflake) {
        self.state.write().send_fails_in.insert(channel_id);
    }
}

#[async_trait]
impl GuildPlatform for MemoryGuild {
    async fn role_set(&self, member_id: Snowflake) -> PlatformResult<BTreeSet<Snowflake>> {
        self.state
            .read()
            .members
            .get(&member_id)
            .map(|record| record.roles.clone())
            .ok_or(PlatformError::UnknownMember(member_id))
    }

    async fn mutate_roles(
        &self,
        member_id: Snowflake,
        add: &BTreeSet<Snowflake>,
        remove: &BTreeSet<Snowflake>,
    ) -> PlatformResult<()> {
        let mut state = self.state.write();
        if state.role_mutations_fail {
            return Err(PlatformError::forbidden("role mutations are disabled"));
        }
        let record = state
            .members
            .get_mut(&member_id)
            .ok_or(PlatformError::UnknownMember(member_id))?;

        record.roles.retain(|role| !remove.contains(role));
        record.roles.extend(add.iter().copied());
        debug!(%member_id, added = add.len(), removed = remove.len(), "Roles mutated");
        Ok(())
    }

    async fn edit_nickname(&self, member_id: Snowflake, nickname: &str) -> PlatformResult<()> {
        let mut state = self.state.write();
        if state.nickname_forbidden.contains(&member_id) {
            return Err(PlatformError::forbidden(
                "member outranks the bot's highest role",
            ));
        }
        let record = state
            .members
            .get_mut(&member_id)
            .ok_or(PlatformError::UnknownMember(member_id))?;
        record.nickname = Some(nickname.to_string());
        Ok(())
    }

    async fn created_at(&self, member_id: Snowflake) -> PlatformResult<DateTime<Utc>> {
        self.state
            .read()
            .members
            .get(&member_id)
            .map(|record| record.created_at)
            .ok_or(PlatformError::UnknownMember(member_id))
    }

    async fn send_message(
        &self,
        channel_id: Snowflake,
        message: OutgoingMessage,
    ) -> PlatformResult<()> {
        let mut state = self.state.write();
        if state.send_fails_in.contains(&channel_id) {
            return Err(PlatformError::UnknownChannel(channel_id));
        }
        let channel = state.channels.entry(channel_id).or_default();
        channel.history = channel.history.saturating_add(1);
        channel.posted.push(message);
        Ok(())
    }

    async fn set_channel_default_permission(
        &self,
        channel_id: Snowflake,
        capability: Permissions,
        allow: bool,
    ) -> PlatformResult<()> {
        let mut state = self.state.write();
        let channel = state.channels.entry(channel_id).or_default();
        channel.everyone_denied.set(capability, !allow);
        Ok(())
    }

    async fn purge_messages(&self, channel_id: Snowflake, limit: u64) -> PlatformResult<u64> {
        let mut state = self.state.write();
        let channel = state.channels.entry(channel_id).or_default();
        let removed = channel.history.min(limit);
        channel.history -= removed;
        Ok(removed)
    }

    async fn kick_member(&self, member_id: Snowflake, reason: Option<&str>) -> PlatformResult<()> {
        let mut state = self.state.write();
        state
            .members
            .remove(&member_id)
            .ok_or(PlatformError::UnknownMember(member_id))?;
        state.kicked.push(member_id);
        debug!(%member_id, ?reason, "Member kicked");
        Ok(())
    }

    async fn ban_member(&self, member_id: Snowflake, reason: Option<&str>) -> PlatformResult<()> {
        let mut state = self.state.write();
        // Bans work on ids, so members who already left can be banned too
        state.members.remove(&member_id);
        state.banned.insert(member_id);
        debug!(%member_id, ?reason, "Member banned");
        Ok(())
    }

    async fn timeout_member(
        &self,
        member_id: Snowflake,
        until: DateTime<Utc>,
        reason: Option<&str>,
    ) -> PlatformResult<()> {
        let mut state = self.state.write();
        let record = state
            .members
            .get_mut(&member_id)
            .ok_or(PlatformError::UnknownMember(member_id))?;
        record.timed_out_until = Some(until);
        debug!(%member_id, %until, ?reason, "Member timed out");
        Ok(())
    }
}
