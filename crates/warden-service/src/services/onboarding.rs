//! Onboarding service
//!
//! New members start unverified and receive the auto-assigned cohort role.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, instrument};

use warden_core::{AuditEvent, AuditKind, AuditSubject, Member, Snowflake};

use super::context::EngineContext;
use super::error::ServiceResult;

/// Roles handed out on join
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingOutcome {
    pub roles_added: BTreeSet<Snowflake>,
}

/// Onboarding service
pub struct OnboardingService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> OnboardingService<'a> {
    /// Create a new OnboardingService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Apply the unverified and auto roles to a newly joined member
    #[instrument(skip(self, member), fields(member_id = %member.id))]
    pub async fn on_member_joined(&self, member: &Member) -> ServiceResult<OnboardingOutcome> {
        let catalog = self.ctx.catalog();
        let platform = self.ctx.platform();

        let held = platform.role_set(member.id).await?;
        let roles_added: BTreeSet<Snowflake> = [catalog.unverified, catalog.auto]
            .into_iter()
            .filter(|role| !held.contains(role))
            .collect();

        if !roles_added.is_empty() {
            platform
                .mutate_roles(member.id, &roles_added, &BTreeSet::new())
                .await?;
        }

        self.ctx
            .audit(AuditEvent::new(
                AuditSubject::from(member),
                AuditKind::MemberJoined,
                format!(
                    "{} joined the server.\nUnverified + Season role applied.",
                    member.id.mention()
                ),
                self.ctx.now(),
            ))
            .await;

        info!(added = roles_added.len(), "Member onboarded");

        Ok(OnboardingOutcome { roles_added })
    }
}
