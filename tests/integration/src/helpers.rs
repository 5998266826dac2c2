//! Test helpers for integration tests
//!
//! Provides a fully wired engine over an in-memory guild and shortcuts for
//! driving events and commands through the router.

use std::sync::Arc;

use anyhow::Result;
use chrono::TimeDelta;

use warden_bot::{MemoryGuild, RecordingAuditSink};
use warden_common::PolicyConfig;
use warden_core::{
    Command, CommandInvocation, FixedClock, GuildEvent, Member, MemberJoinedEvent,
    MessageReceivedEvent, ParticipationStore, RoleSetChangedEvent, Snowflake,
};
use warden_service::{CommandReply, EngineContext, EventRouter, RouteOutcome};
use warden_store::InMemoryParticipationStore;

use crate::fixtures::{catalog, test_now, GENERAL_CHANNEL};

/// Engine instance with handles on every collaborator
pub struct TestEngine {
    pub ctx: EngineContext,
    pub guild: Arc<MemoryGuild>,
    pub audit: Arc<RecordingAuditSink>,
    pub clock: Arc<FixedClock>,
}

impl TestEngine {
    /// Engine with default policy and an empty participation store
    pub fn start() -> Result<Self> {
        Self::start_with(PolicyConfig::default(), Arc::new(InMemoryParticipationStore::new()))
    }

    /// Engine with custom policy and participation store
    pub fn start_with(policy: PolicyConfig, store: Arc<dyn ParticipationStore>) -> Result<Self> {
        let guild = Arc::new(MemoryGuild::new());
        let audit = Arc::new(RecordingAuditSink::new());
        let clock = Arc::new(FixedClock::new(test_now()));

        let ctx = EngineContext::builder()
            .platform(guild.clone())
            .clock(clock.clone())
            .audit_sink(audit.clone())
            .participation(store)
            .catalog(catalog())
            .policy(policy)
            .command_prefix("+")
            .build()?;

        Ok(Self {
            ctx,
            guild,
            audit,
            clock,
        })
    }

    /// Register members with the guild as they are right now
    pub fn seed(&self, members: &[&Member]) {
        for member in members {
            self.guild.insert_member(member);
        }
    }

    /// Route one event
    pub async fn route(&self, event: GuildEvent) -> Result<RouteOutcome> {
        Ok(EventRouter::new(&self.ctx).route(event).await?)
    }

    /// A member joins the guild
    pub async fn join(&self, member: &Member) -> Result<RouteOutcome> {
        self.guild.insert_member(member);
        self.route(GuildEvent::MemberJoined(MemberJoinedEvent {
            member: member.clone(),
        }))
        .await
    }

    /// Roles are added to a member outside the engine, then reported
    pub async fn add_roles(&self, member: &Member, roles: &[Snowflake]) -> Result<RouteOutcome> {
        self.guild.grant_roles(member.id, roles)?;
        let mut snapshot = member.clone();
        snapshot.role_ids.extend(roles.iter().copied());
        self.route(GuildEvent::RoleSetChanged(RoleSetChangedEvent {
            member: snapshot,
            roles_added: roles.to_vec(),
        }))
        .await
    }

    /// A member posts `content` in the general channel
    pub async fn say_in_general(&self, author: &Member, content: &str) -> Result<RouteOutcome> {
        self.guild.add_history(GENERAL_CHANNEL, 1);
        self.route(GuildEvent::MessageReceived(MessageReceivedEvent {
            author: author.clone(),
            channel_id: GENERAL_CHANNEL,
            content: content.to_string(),
        }))
        .await
    }

    /// A member invokes a command in the general channel
    pub async fn invoke(&self, invoker: &Member, command: Command) -> Result<CommandReply> {
        self.invoke_in(invoker, GENERAL_CHANNEL, command).await
    }

    /// A member invokes a command in `channel_id`
    pub async fn invoke_in(
        &self,
        invoker: &Member,
        channel_id: Snowflake,
        command: Command,
    ) -> Result<CommandReply> {
        let outcome = self
            .route(GuildEvent::CommandInvoked(CommandInvocation {
                invoker: invoker.clone(),
                channel_id,
                command,
            }))
            .await?;
        match outcome {
            RouteOutcome::Command(reply) => Ok(reply),
            other => anyhow::bail!("expected a command reply, got {other:?}"),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: TimeDelta) {
        self.clock.advance(by);
    }
}

/// Reply text from a routed message, if the message carried a command
pub fn message_reply(outcome: &RouteOutcome) -> Option<&CommandReply> {
    match outcome {
        RouteOutcome::Message { reply, .. } => reply.as_ref(),
        _ => None,
    }
}
