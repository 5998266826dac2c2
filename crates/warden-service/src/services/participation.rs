//! Participation service
//!
//! Counts messages per member and grants the trusted role once the count
//! reaches the configured threshold.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, instrument};

use warden_core::{AuditEvent, AuditKind, AuditSubject, Member, Snowflake};

use super::context::EngineContext;
use super::error::ServiceResult;

/// Trusted role granted on this message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionOutcome {
    pub member_id: Snowflake,
    pub count: u64,
}

/// Participation service
pub struct ParticipationService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> ParticipationService<'a> {
    /// Create a new ParticipationService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// Count one message from `author`
    ///
    /// Bot authors are not counted.
    #[instrument(skip(self, author), fields(member_id = %author.id))]
    pub async fn on_message(&self, author: &Member) -> ServiceResult<Option<PromotionOutcome>> {
        if author.bot {
            debug!("Ignoring bot author");
            return Ok(None);
        }

        let count = self.ctx.participation().increment(author.id).await?;
        if count < self.ctx.policy().trusted_message_threshold {
            return Ok(None);
        }

        // Checked against the platform, not the event snapshot, so a stale
        // snapshot cannot grant twice
        let trusted = self.ctx.catalog().trusted;
        let held = self.ctx.platform().role_set(author.id).await?;
        if held.contains(&trusted) {
            return Ok(None);
        }

        self.ctx
            .platform()
            .mutate_roles(author.id, &BTreeSet::from([trusted]), &BTreeSet::new())
            .await?;

        self.ctx
            .audit(AuditEvent::new(
                AuditSubject::from(author),
                AuditKind::TrustedRoleGranted,
                format!(
                    "{} has been granted the Trusted role for sending {count} messages!",
                    author.id.mention()
                ),
                self.ctx.now(),
            ))
            .await;

        info!(count, "Trusted role granted");

        Ok(Some(PromotionOutcome {
            member_id: author.id,
            count,
        }))
    }

    /// Current count for a member
    pub async fn count(&self, member_id: Snowflake) -> ServiceResult<u64> {
        Ok(self.ctx.participation().count(member_id).await?)
    }
}
