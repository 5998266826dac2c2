//! Event router
//!
//! The single entry point for inbound guild events. Each event is processed
//! to completion before the caller hands over the next one.

use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use warden_core::{CommandInvocation, GuildEvent, MessageReceivedEvent};

use crate::dto::{parse_prefix_command, CommandReply};

use super::context::EngineContext;
use super::error::{ServiceError, ServiceResult};
use super::moderation::ModerationService;
use super::onboarding::{OnboardingOutcome, OnboardingService};
use super::participation::{ParticipationService, PromotionOutcome};
use super::verification::{VerificationOutcome, VerificationService};

/// What routing an event produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum RouteOutcome {
    Onboarded(OnboardingOutcome),
    Verification(VerificationOutcome),
    Message {
        promotion: Option<PromotionOutcome>,
        reply: Option<CommandReply>,
    },
    Command(CommandReply),
}

/// Routes guild events to the owning service
pub struct EventRouter<'a> {
    ctx: &'a EngineContext,
}

impl<'a> EventRouter<'a> {
    /// Create a new EventRouter
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Process one event
    ///
    /// Command failures become an ephemeral reply for the invoker. Failures
    /// while onboarding, verifying or counting are returned.
    #[instrument(skip(self, event), fields(event = event.event_type(), member_id = %event.member().id))]
    pub async fn route(&self, event: GuildEvent) -> ServiceResult<RouteOutcome> {
        match event {
            GuildEvent::MemberJoined(e) => OnboardingService::new(self.ctx)
                .on_member_joined(&e.member)
                .await
                .map(RouteOutcome::Onboarded),
            GuildEvent::RoleSetChanged(e) => VerificationService::new(self.ctx)
                .on_role_set_changed(&e.member, &e.roles_added)
                .await
                .map(RouteOutcome::Verification),
            GuildEvent::MessageReceived(e) => self.on_message(e).await,
            GuildEvent::CommandInvoked(invocation) => {
                Ok(RouteOutcome::Command(self.dispatch(&invocation).await))
            }
        }
    }

    async fn on_message(&self, event: MessageReceivedEvent) -> ServiceResult<RouteOutcome> {
        let promotion = ParticipationService::new(self.ctx)
            .on_message(&event.author)
            .await?;

        if event.author.bot {
            return Ok(RouteOutcome::Message {
                promotion,
                reply: None,
            });
        }

        let reply = match parse_prefix_command(&event.content, self.ctx.command_prefix()) {
            Ok(Some(command)) => {
                let invocation = CommandInvocation {
                    invoker: event.author,
                    channel_id: event.channel_id,
                    command,
                };
                Some(self.dispatch(&invocation).await)
            }
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "Malformed prefix command");
                Some(ServiceError::from(e).reply())
            }
        };

        Ok(RouteOutcome::Message { promotion, reply })
    }

    async fn dispatch(&self, invocation: &CommandInvocation) -> CommandReply {
        match ModerationService::new(self.ctx).execute(invocation).await {
            Ok(reply) => reply,
            Err(e) if e.is_rejection() => {
                debug!(code = e.error_code(), error = %e, "Command rejected");
                e.reply()
            }
            Err(e) if e.is_collaborator_failure() => {
                warn!(error = %e, "Command failed at the platform");
                e.reply()
            }
            Err(e) => {
                error!(code = e.error_code(), error = %e, "Command failed");
                e.reply()
            }
        }
    }
}
