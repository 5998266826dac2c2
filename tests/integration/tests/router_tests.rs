//! Event routing scenarios
//!
//! Onboarding, prefix commands carried by ordinary messages, help, and a full
//! member lifecycle through the single router entry point.

use std::collections::BTreeSet;

use integration_tests::*;
use warden_core::{AuditKind, Command, Permissions};
use warden_service::{OnboardingOutcome, RouteOutcome, VerificationOutcome};

#[tokio::test]
async fn test_join_applies_unverified_and_auto_roles() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("newcomer", 3);

    let outcome = engine.join(&member).await.unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::Onboarded(OnboardingOutcome {
            roles_added: BTreeSet::from([UNVERIFIED_ROLE, AUTO_ROLE]),
        })
    );
    let roles = engine.guild.roles_of(member.id);
    assert!(roles.contains(&UNVERIFIED_ROLE));
    assert!(roles.contains(&AUTO_ROLE));

    assert_eq!(engine.audit.kinds(), vec![AuditKind::MemberJoined]);
    assert!(engine
        .audit
        .last()
        .unwrap()
        .detail
        .contains("joined the server"));
}

#[tokio::test]
async fn test_rejoin_only_adds_missing_roles() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("returner", 90).with_roles([AUTO_ROLE]);

    let outcome = engine.join(&member).await.unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::Onboarded(OnboardingOutcome {
            roles_added: BTreeSet::from([UNVERIFIED_ROLE]),
        })
    );
}

#[tokio::test]
async fn test_prefix_command_in_message() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("spammer", 5);
    engine.seed(&[&staff, &target]);

    let outcome = engine
        .say_in_general(&staff, &format!("+ban <@{}> posting links", target.id))
        .await
        .unwrap();

    let reply = message_reply(&outcome).unwrap();
    assert_eq!(reply.content, format!("<@{}> has been banned.", target.id));
    assert!(engine.guild.is_banned(target.id));
    assert!(engine
        .audit
        .last()
        .unwrap()
        .detail
        .contains("Reason: posting links"));

    // The command message itself still counts
    assert_eq!(engine.ctx.participation().count(staff.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_prefix_lock_in_current_channel() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[MANAGER_ROLE]);
    engine.seed(&[&staff]);

    engine.say_in_general(&staff, "+lock").await.unwrap();

    assert!(!engine
        .guild
        .everyone_allowed(GENERAL_CHANNEL, Permissions::SEND_MESSAGES));
}

#[tokio::test]
async fn test_prefix_command_denied_for_member() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("fan", 60);
    let target = member_aged_days("rival", 60);
    engine.seed(&[&member, &target]);

    let outcome = engine
        .say_in_general(&member, &format!("+kick <@{}>", target.id))
        .await
        .unwrap();

    let reply = message_reply(&outcome).unwrap();
    assert_eq!(reply.content, "❌ You do not have permission to use /kick");
    assert!(!engine.guild.was_kicked(target.id));
    assert!(engine.audit.events().is_empty());
}

#[tokio::test]
async fn test_prefix_command_missing_argument() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("loud", 60);
    engine.seed(&[&staff, &target]);

    let outcome = engine
        .say_in_general(&staff, &format!("+timeout <@{}>", target.id))
        .await
        .unwrap();

    let reply = message_reply(&outcome).unwrap();
    assert!(reply.ephemeral);
    assert!(reply.content.contains("Missing required argument: duration"));
    assert_eq!(engine.guild.timed_out_until(target.id), None);
}

#[tokio::test]
async fn test_ordinary_messages_carry_no_reply() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("fan", 60);
    engine.seed(&[&member]);

    for content in ["great match", "+dance", "kick <@1>", ""] {
        let outcome = engine.say_in_general(&member, content).await.unwrap();
        assert_eq!(message_reply(&outcome), None, "{content:?}");
    }
}

#[tokio::test]
async fn test_bot_prefix_commands_are_ignored() {
    let engine = TestEngine::start().unwrap();
    let bot = staff_member("helper-bot", &[FOUNDER_ROLE]).as_bot();
    let target = member_aged_days("fan", 60);
    engine.seed(&[&bot, &target]);

    let outcome = engine
        .say_in_general(&bot, &format!("+ban <@{}>", target.id))
        .await
        .unwrap();

    assert_eq!(message_reply(&outcome), None);
    assert!(!engine.guild.is_banned(target.id));
}

#[tokio::test]
async fn test_help_is_open_to_everyone() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("curious", 1);
    engine.seed(&[&member]);

    let reply = engine.invoke(&member, Command::Help).await.unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.contains("+kick <member> [reason]"));
    assert!(reply.content.contains("+embed <title> | <description>"));
    assert!(reply.content.contains("at least 30 days old"));
    assert!(reply.content.contains("granted after 5000 messages"));
    assert!(engine.audit.events().is_empty());

    let outcome = engine.say_in_general(&member, "+help").await.unwrap();
    assert_eq!(message_reply(&outcome), Some(&reply));
}

#[tokio::test]
async fn test_member_lifecycle() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("steward", &[STAFF_ROLE]);
    engine.seed(&[&staff]);
    let member = member_aged_days("gooner", 120);

    engine.join(&member).await.unwrap();
    let joined = member.clone().with_roles([UNVERIFIED_ROLE, AUTO_ROLE]);

    let outcome = engine.add_roles(&joined, &[PL_ROLE]).await.unwrap();
    assert!(matches!(
        outcome,
        RouteOutcome::Verification(VerificationOutcome::Verified {
            nickname_applied: true,
            ..
        })
    ));

    engine.say_in_general(&joined, "up the arsenal").await.unwrap();
    let reply = engine
        .invoke(
            &staff,
            Command::Timeout {
                target: member.id,
                duration: "2h".to_string(),
                reason: Some("banter got out of hand".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(!reply.ephemeral);

    assert_eq!(
        engine.audit.kinds(),
        vec![
            AuditKind::MemberJoined,
            AuditKind::MemberVerified,
            AuditKind::Timeout,
        ]
    );
    assert_eq!(
        engine.guild.nickname_of(member.id).as_deref(),
        Some("gooner | PL")
    );
}
