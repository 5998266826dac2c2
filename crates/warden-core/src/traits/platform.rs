//! Platform capabilities (ports) - what the engine needs from the chat platform
//!
//! The engine defines what it needs; the platform shell provides the
//! implementation. Every call is awaited to completion before the engine does
//! anything else.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::value_objects::{Permissions, Snowflake};

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Structured notification body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Outgoing message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text { content: String },
    Embed { embed: Embed },
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait GuildPlatform: Send + Sync {
    /// Current role set of a member
    async fn role_set(&self, member_id: Snowflake) -> PlatformResult<BTreeSet<Snowflake>>;

    /// Add and remove roles in one request
    async fn mutate_roles(
        &self,
        member_id: Snowflake,
        add: &BTreeSet<Snowflake>,
        remove: &BTreeSet<Snowflake>,
    ) -> PlatformResult<()>;

    /// Set a member's guild nickname
    async fn edit_nickname(&self, member_id: Snowflake, nickname: &str) -> PlatformResult<()>;

    /// Account-creation instant of a member
    async fn created_at(&self, member_id: Snowflake) -> PlatformResult<DateTime<Utc>>;

    /// Post a message in a channel
    async fn send_message(
        &self,
        channel_id: Snowflake,
        message: OutgoingMessage,
    ) -> PlatformResult<()>;

    /// Allow or deny a capability for the channel's everyone principal
    async fn set_channel_default_permission(
        &self,
        channel_id: Snowflake,
        capability: Permissions,
        allow: bool,
    ) -> PlatformResult<()>;

    /// Delete up to `limit` recent messages; returns how many were removed
    async fn purge_messages(&self, channel_id: Snowflake, limit: u64) -> PlatformResult<u64>;

    async fn kick_member(&self, member_id: Snowflake, reason: Option<&str>) -> PlatformResult<()>;

    async fn ban_member(&self, member_id: Snowflake, reason: Option<&str>) -> PlatformResult<()>;

    /// Mute a member until `until`
    async fn timeout_member(
        &self,
        member_id: Snowflake,
        until: DateTime<Utc>,
        reason: Option<&str>,
    ) -> PlatformResult<()>;
}
