//! Verification service
//!
//! Promotes members from unverified to verified when they pick a league or
//! club role, provided the account is old enough. A skip leaves the member
//! unverified; the next league role added re-evaluates.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, instrument, warn};

use warden_core::{AuditEvent, AuditKind, AuditSubject, LeagueTag, Member, Snowflake};

use super::context::EngineContext;
use super::error::ServiceResult;

/// Timestamp format used in verification audit entries
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Result of evaluating a role-set change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// No league role among the added roles
    NotTriggered,
    /// Account younger than the minimum; member stays unverified
    Skipped { tag: LeagueTag, age_days: i64 },
    /// Member now holds the verified role
    Verified {
        tag: LeagueTag,
        age_days: i64,
        nickname: String,
        nickname_applied: bool,
    },
}

/// Verification service
pub struct VerificationService<'a> {
    ctx: &'a EngineContext,
}

impl<'a> VerificationService<'a> {
    /// Create a new VerificationService
    pub fn new(ctx: &'a EngineContext) -> Self {
        Self { ctx }
    }

    /// React to roles being added to a member
    #[instrument(skip(self, member), fields(member_id = %member.id))]
    pub async fn on_role_set_changed(
        &self,
        member: &Member,
        roles_added: &[Snowflake],
    ) -> ServiceResult<VerificationOutcome> {
        let catalog = self.ctx.catalog();
        let Some((_, tag)) = catalog.winning_league(roles_added) else {
            return Ok(VerificationOutcome::NotTriggered);
        };

        let platform = self.ctx.platform();
        let now = self.ctx.now();
        let created_at = platform.created_at(member.id).await?;
        let age_days = (now - created_at).num_days().max(0);
        let subject = AuditSubject::from(member);

        if age_days < self.ctx.policy().min_verification_age_days {
            info!(%tag, age_days, "Verification skipped, account too new");
            self.ctx
                .audit(AuditEvent::new(
                    subject,
                    AuditKind::VerificationSkipped,
                    format!(
                        "{} received {} role but account is only {age_days} days old.",
                        member.id.mention(),
                        tag.label()
                    ),
                    now,
                ))
                .await;
            return Ok(VerificationOutcome::Skipped { tag, age_days });
        }

        // Role change first; a failure here ends the event with no success audit
        let held = platform.role_set(member.id).await?;
        let mut add = BTreeSet::new();
        let mut remove = BTreeSet::new();
        if held.contains(&catalog.unverified) {
            remove.insert(catalog.unverified);
        }
        if !held.contains(&catalog.verified) {
            add.insert(catalog.verified);
        }
        if !add.is_empty() || !remove.is_empty() {
            platform.mutate_roles(member.id, &add, &remove).await?;
        }

        let nickname = tag.nickname_for(&member.username);
        let nickname_applied = match platform.edit_nickname(member.id, &nickname).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, %nickname, "Nickname change failed");
                self.ctx
                    .audit(AuditEvent::new(
                        subject.clone(),
                        AuditKind::NicknameChangeFailed,
                        format!("Could not rename {} to '{nickname}'.", member.id.mention()),
                        now,
                    ))
                    .await;
                false
            }
        };

        self.ctx
            .audit(AuditEvent::new(
                subject,
                AuditKind::MemberVerified,
                format!(
                    "{} verified automatically.\n\
                     Account created: {} ({age_days} days old).\n\
                     Role assigned: {}\n\
                     Nickname set: {nickname}",
                    member.id.mention(),
                    created_at.format(CREATED_AT_FORMAT),
                    tag.label(),
                ),
                now,
            ))
            .await;

        info!(%tag, age_days, nickname_applied, "Member verified");

        Ok(VerificationOutcome::Verified {
            tag,
            age_days,
            nickname,
            nickname_applied,
        })
    }
}
