//! Moderation service
//!
//! Every command runs validate → execute → audit. Validation failures return
//! before the platform is touched; denials are reported to the invoker only
//! and never audited.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use warden_core::{
    AuditEvent, AuditKind, AuditSubject, Command, CommandInvocation, CommandName, DomainError,
    Embed, EmbedInput, Member, OutgoingMessage, Permissions, PlatformError, Severity, Snowflake,
    TimeoutDuration,
};

use crate::dto::{CommandReply, EmbedRequest, SayRequest};

use super::context::EngineContext;
use super::error::ServiceResult;
use super::help::help_text;
use super::permission::PermissionService;

const NO_REASON: &str = "No reason provided";

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    fn permissions(&self) -> PermissionService<'_> {
        PermissionService::new(self.ctx.catalog())
    }

    /// Run a command on behalf of its invoker
    #[instrument(
        skip(self, invocation),
        fields(
            invoker = %invocation.invoker.id,
            channel = %invocation.channel_id,
            command = %invocation.command.name()
        )
    )]
    pub async fn execute(&self, invocation: &CommandInvocation) -> ServiceResult<CommandReply> {
        let invoker = &invocation.invoker;
        let channel_id = invocation.channel_id;

        self.permissions()
            .require(&invoker.role_ids, invocation.command.name())?;

        match &invocation.command {
            Command::Kick { target, reason } => {
                self.kick(invoker, *target, reason.as_deref()).await
            }
            Command::Ban { target, reason } => self.ban(invoker, *target, reason.as_deref()).await,
            Command::Timeout {
                target,
                duration,
                reason,
            } => {
                self.timeout(invoker, *target, duration, reason.as_deref())
                    .await
            }
            Command::Purge { amount } => self.purge(invoker, channel_id, *amount).await,
            Command::Lock => self.set_locked(invoker, channel_id, true).await,
            Command::Unlock => self.set_locked(invoker, channel_id, false).await,
            Command::Say { message } => self.say(invoker, channel_id, message).await,
            Command::Embed { input } => self.embed(invoker, channel_id, input).await,
            Command::Help => Ok(CommandReply::ephemeral(help_text(
                self.ctx.command_prefix(),
                self.ctx.policy(),
            ))),
        }
    }

    /// Kick a member the invoker outranks
    pub async fn kick(
        &self,
        invoker: &Member,
        target: Snowflake,
        reason: Option<&str>,
    ) -> ServiceResult<CommandReply> {
        self.check_hierarchy(invoker, target, CommandName::Kick)
            .await?;
        self.ctx.platform().kick_member(target, reason).await?;

        self.audit(
            AuditSubject::from_id(target),
            AuditKind::Kick,
            format!(
                "{} kicked {}\nReason: {}",
                invoker.id.mention(),
                target.mention(),
                reason.unwrap_or(NO_REASON)
            ),
        )
        .await;

        info!(%target, "Member kicked");
        Ok(CommandReply::public(format!(
            "{} has been kicked.",
            target.mention()
        )))
    }

    /// Ban a member the invoker outranks
    pub async fn ban(
        &self,
        invoker: &Member,
        target: Snowflake,
        reason: Option<&str>,
    ) -> ServiceResult<CommandReply> {
        self.check_hierarchy(invoker, target, CommandName::Ban)
            .await?;
        self.ctx.platform().ban_member(target, reason).await?;

        self.audit(
            AuditSubject::from_id(target),
            AuditKind::Ban,
            format!(
                "{} banned {}\nReason: {}",
                invoker.id.mention(),
                target.mention(),
                reason.unwrap_or(NO_REASON)
            ),
        )
        .await;

        info!(%target, "Member banned");
        Ok(CommandReply::public(format!(
            "{} has been banned.",
            target.mention()
        )))
    }

    /// Mute a member until now + `duration`
    pub async fn timeout(
        &self,
        invoker: &Member,
        target: Snowflake,
        duration: &str,
        reason: Option<&str>,
    ) -> ServiceResult<CommandReply> {
        if target == invoker.id {
            return Err(DomainError::SelfActionDenied {
                command: CommandName::Timeout,
            }
            .into());
        }
        let input = duration;
        let duration = TimeoutDuration::parse(input)?;
        // Past the representable calendar range
        let until = self
            .ctx
            .now()
            .checked_add_signed(duration.as_delta())
            .ok_or_else(|| DomainError::InvalidDuration(input.trim().to_string()))?;

        self.ctx
            .platform()
            .timeout_member(target, until, reason)
            .await?;

        let reason = reason.unwrap_or(NO_REASON);
        self.audit(
            AuditSubject::from_id(target),
            AuditKind::Timeout,
            format!(
                "{} timed out {} for {duration}. Reason: {reason}",
                invoker.id.mention(),
                target.mention()
            ),
        )
        .await;

        info!(%target, %duration, %until, "Member timed out");
        Ok(CommandReply::public(format!(
            "✅ {} has been timed out for {duration}. Reason: {reason}",
            target.mention()
        )))
    }

    /// Delete up to `amount` recent messages from a channel
    pub async fn purge(
        &self,
        invoker: &Member,
        channel_id: Snowflake,
        amount: i64,
    ) -> ServiceResult<CommandReply> {
        let limit = u64::try_from(amount)
            .ok()
            .filter(|n| *n > 0)
            .ok_or(DomainError::InvalidPurgeAmount(amount))?;

        let removed = self
            .ctx
            .platform()
            .purge_messages(channel_id, limit)
            .await?;

        self.audit(
            AuditSubject::from(invoker),
            AuditKind::Purge,
            format!(
                "{} deleted {removed} messages in {}",
                invoker.id.mention(),
                channel_id.channel_mention()
            ),
        )
        .await;

        info!(%channel_id, requested = limit, removed, "Messages purged");
        Ok(CommandReply::ephemeral(format!(
            "✅ Deleted {removed} messages."
        )))
    }

    /// Deny or restore the everyone-principal send permission
    pub async fn set_locked(
        &self,
        invoker: &Member,
        channel_id: Snowflake,
        locked: bool,
    ) -> ServiceResult<CommandReply> {
        self.ctx
            .platform()
            .set_channel_default_permission(channel_id, Permissions::SEND_MESSAGES, !locked)
            .await?;

        let (kind, verb) = if locked {
            (AuditKind::ChannelLocked, "locked")
        } else {
            (AuditKind::ChannelUnlocked, "unlocked")
        };
        self.audit(
            AuditSubject::from(invoker),
            kind,
            format!(
                "{} {verb} {}",
                invoker.id.mention(),
                channel_id.channel_mention()
            ),
        )
        .await;

        info!(%channel_id, locked, "Channel send permission changed");
        Ok(CommandReply::public(format!(
            "{} is now {verb}.",
            channel_id.channel_mention()
        )))
    }

    /// Speak as the bot
    pub async fn say(
        &self,
        invoker: &Member,
        channel_id: Snowflake,
        message: &str,
    ) -> ServiceResult<CommandReply> {
        let request = SayRequest::new(message).validated()?;

        self.ctx
            .platform()
            .send_message(channel_id, OutgoingMessage::text(request.message.clone()))
            .await?;

        self.audit(
            AuditSubject::from(invoker),
            AuditKind::Say,
            format!("{} used /say: {}", invoker.id.mention(), request.message),
        )
        .await;

        Ok(CommandReply::ephemeral("✅ Message sent."))
    }

    /// Post an embed as the bot
    pub async fn embed(
        &self,
        invoker: &Member,
        channel_id: Snowflake,
        input: &EmbedInput,
    ) -> ServiceResult<CommandReply> {
        let request = EmbedRequest::try_from(input.clone())?;

        let embed = Embed {
            title: request.title.clone(),
            description: request.description,
            color: Severity::Info.color(),
            author: None,
            timestamp: None,
        };
        self.ctx
            .platform()
            .send_message(channel_id, OutgoingMessage::Embed { embed })
            .await?;

        self.audit(
            AuditSubject::from(invoker),
            AuditKind::Embed,
            format!(
                "{} sent an embed titled '{}'",
                invoker.id.mention(),
                request.title
            ),
        )
        .await;

        Ok(CommandReply::ephemeral("✅ Embed sent."))
    }

    async fn check_hierarchy(
        &self,
        invoker: &Member,
        target: Snowflake,
        command: CommandName,
    ) -> ServiceResult<()> {
        let target_roles: BTreeSet<Snowflake> = if target == invoker.id {
            invoker.role_ids.clone()
        } else {
            match self.ctx.platform().role_set(target).await {
                Ok(roles) => roles,
                // Bans go by id; someone who already left holds no rank
                Err(PlatformError::UnknownMember(_)) if command == CommandName::Ban => {
                    BTreeSet::new()
                }
                Err(e) => return Err(e.into()),
            }
        };
        self.permissions()
            .require_outranks(&invoker.role_ids, &target_roles, command)?;
        Ok(())
    }

    async fn audit(&self, subject: AuditSubject, kind: AuditKind, detail: String) {
        self.ctx
            .audit(AuditEvent::new(subject, kind, detail, self.ctx.now()))
            .await;
    }
}
