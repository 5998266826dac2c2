//! Engine services
//!
//! Each service borrows the shared [`EngineContext`] and owns one slice of the
//! member state rules; [`EventRouter`] feeds them inbound events.

pub mod context;
pub mod error;
pub mod help;
pub mod moderation;
pub mod onboarding;
pub mod participation;
pub mod permission;
pub mod router;
pub mod verification;

pub use context::{EngineContext, EngineContextBuilder, DEFAULT_COMMAND_PREFIX};
pub use error::{ServiceError, ServiceResult};
pub use help::help_text;
pub use moderation::ModerationService;
pub use onboarding::{OnboardingOutcome, OnboardingService};
pub use participation::{ParticipationService, PromotionOutcome};
pub use permission::{Decision, PermissionService};
pub use router::{EventRouter, RouteOutcome};
pub use verification::{VerificationOutcome, VerificationService};
