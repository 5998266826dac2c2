//! # warden-service
//!
//! Application layer: the permission resolver, the verification state
//! machine, the moderation dispatcher, the participation counter, and the
//! router that feeds inbound guild events to them.

pub mod dto;
pub mod services;

pub use dto::{parse_prefix_command, CommandReply, EmbedRequest, SayRequest};
pub use services::{
    Decision, EngineContext, EngineContextBuilder, EventRouter, ModerationService,
    OnboardingOutcome, OnboardingService, ParticipationService, PermissionService,
    PromotionOutcome, RouteOutcome, ServiceError, ServiceResult, VerificationOutcome,
    VerificationService,
};
