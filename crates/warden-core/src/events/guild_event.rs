//! Inbound guild events - everything the engine reacts to
//!
//! The platform shell translates its callbacks into these and feeds them to a
//! single router, one at a time.

use serde::{Deserialize, Serialize};

use crate::entities::Member;
use crate::value_objects::{CommandName, Snowflake};

/// All inbound events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuildEvent {
    MemberJoined(MemberJoinedEvent),
    RoleSetChanged(RoleSetChangedEvent),
    MessageReceived(MessageReceivedEvent),
    CommandInvoked(CommandInvocation),
}

impl GuildEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MemberJoined(_) => "MEMBER_JOINED",
            Self::RoleSetChanged(_) => "ROLE_SET_CHANGED",
            Self::MessageReceived(_) => "MESSAGE_RECEIVED",
            Self::CommandInvoked(_) => "COMMAND_INVOKED",
        }
    }

    /// The member the event is about (the invoker for commands)
    pub fn member(&self) -> &Member {
        match self {
            Self::MemberJoined(e) => &e.member,
            Self::RoleSetChanged(e) => &e.member,
            Self::MessageReceived(e) => &e.author,
            Self::CommandInvoked(e) => &e.invoker,
        }
    }
}

/// A member joined the guild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberJoinedEvent {
    pub member: Member,
}

/// A member's role set changed
///
/// `member` is the snapshot after the change; `roles_added` keeps the order
/// the platform reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSetChangedEvent {
    pub member: Member,
    pub roles_added: Vec<Snowflake>,
}

/// A message was posted in a guild channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReceivedEvent {
    pub author: Member,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: String,
}

/// A command was invoked by a member in a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub invoker: Member,
    pub channel_id: Snowflake,
    pub command: Command,
}

/// Command with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum Command {
    Kick {
        target: Snowflake,
        #[serde(default)]
        reason: Option<String>,
    },
    Ban {
        target: Snowflake,
        #[serde(default)]
        reason: Option<String>,
    },
    Timeout {
        target: Snowflake,
        duration: String,
        #[serde(default)]
        reason: Option<String>,
    },
    Purge {
        amount: i64,
    },
    Lock,
    Unlock,
    Say {
        message: String,
    },
    Embed {
        input: EmbedInput,
    },
    Help,
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Self::Kick { .. } => CommandName::Kick,
            Self::Ban { .. } => CommandName::Ban,
            Self::Timeout { .. } => CommandName::Timeout,
            Self::Purge { .. } => CommandName::Purge,
            Self::Lock => CommandName::Lock,
            Self::Unlock => CommandName::Unlock,
            Self::Say { .. } => CommandName::Say,
            Self::Embed { .. } => CommandName::Embed,
            Self::Help => CommandName::Help,
        }
    }
}

/// Embed arguments, either as two fields or as one `title | description` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbedInput {
    Fields { title: String, description: String },
    Delimited(String),
}
