//! Moderation command scenarios
//!
//! Gating by staff tier, rank checks for kick and ban, input validation, and
//! the audit trail each command leaves behind.

use chrono::TimeDelta;

use integration_tests::*;
use warden_core::{AuditKind, Command, EmbedInput, OutgoingMessage, Permissions, Snowflake};

const MOD_CHANNEL: Snowflake = Snowflake::new(1_400_000_000_000_000_077);

fn ban(target: Snowflake, reason: Option<&str>) -> Command {
    Command::Ban {
        target,
        reason: reason.map(str::to_string),
    }
}

fn kick(target: Snowflake) -> Command {
    Command::Kick {
        target,
        reason: None,
    }
}

fn timeout(target: Snowflake, duration: &str) -> Command {
    Command::Timeout {
        target,
        duration: duration.to_string(),
        reason: None,
    }
}

// ============================================================================
// Gating and hierarchy
// ============================================================================

#[tokio::test]
async fn test_trial_moderator_cannot_ban() {
    let engine = TestEngine::start().unwrap();
    let trial = staff_member("trial", &[TRIAL_MOD_ROLE]);
    let target = member_aged_days("target", 100);
    engine.seed(&[&trial, &target]);

    let reply = engine.invoke(&trial, ban(target.id, None)).await.unwrap();

    assert!(reply.ephemeral);
    assert_eq!(reply.content, "❌ You do not have permission to use /ban");
    assert!(!engine.guild.is_banned(target.id));
    assert!(engine.audit.events().is_empty());
}

#[tokio::test]
async fn test_trial_moderator_with_higher_tier_can_ban() {
    let engine = TestEngine::start().unwrap();
    let dual = staff_member("dual", &[TRIAL_MOD_ROLE, STAFF_ROLE]);
    let target = member_aged_days("target", 100);
    engine.seed(&[&dual, &target]);

    let reply = engine
        .invoke(&dual, ban(target.id, Some("spam")))
        .await
        .unwrap();

    assert!(!reply.ephemeral);
    assert_eq!(reply.content, format!("<@{}> has been banned.", target.id));
    assert!(engine.guild.is_banned(target.id));

    assert_eq!(engine.audit.kinds(), vec![AuditKind::Ban]);
    let entry = engine.audit.last().unwrap();
    assert_eq!(entry.subject.id, target.id);
    assert!(entry.detail.contains("Reason: spam"));
}

#[tokio::test]
async fn test_trial_moderator_can_kick_regular_member() {
    let engine = TestEngine::start().unwrap();
    let trial = staff_member("trial", &[TRIAL_MOD_ROLE]);
    let target = member_aged_days("target", 100).with_roles([VERIFIED_ROLE]);
    engine.seed(&[&trial, &target]);

    let reply = engine.invoke(&trial, kick(target.id)).await.unwrap();

    assert_eq!(reply.content, format!("<@{}> has been kicked.", target.id));
    assert!(engine.guild.was_kicked(target.id));
    assert!(engine
        .audit
        .last()
        .unwrap()
        .detail
        .contains("Reason: No reason provided"));
}

#[tokio::test]
async fn test_member_without_staff_role_is_denied() {
    let engine = TestEngine::start().unwrap();
    let member = member_aged_days("fan", 100).with_roles([VERIFIED_ROLE, PL_ROLE]);
    let target = member_aged_days("rival", 100);
    engine.seed(&[&member, &target]);

    for command in [
        kick(target.id),
        ban(target.id, None),
        timeout(target.id, "5m"),
        Command::Purge { amount: 5 },
        Command::Lock,
        Command::Unlock,
        Command::Say {
            message: "hi".to_string(),
        },
    ] {
        let reply = engine.invoke(&member, command).await.unwrap();
        assert!(reply.content.starts_with("❌ You do not have permission"));
        assert!(reply.ephemeral);
    }

    assert!(engine.audit.events().is_empty());
    assert!(!engine.guild.was_kicked(target.id));
    assert_eq!(engine.guild.timed_out_until(target.id), None);
}

#[tokio::test]
async fn test_cannot_kick_equal_or_higher_rank() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let peer = staff_member("peer", &[STAFF_ROLE]);
    let manager = staff_member("manager", &[MANAGER_ROLE]);
    engine.seed(&[&staff, &peer, &manager]);

    let reply = engine.invoke(&staff, kick(peer.id)).await.unwrap();
    assert_eq!(
        reply.content,
        "❌ You cannot kick someone with an equal or higher role"
    );

    let reply = engine.invoke(&staff, ban(manager.id, None)).await.unwrap();
    assert_eq!(
        reply.content,
        "❌ You cannot ban someone with an equal or higher role"
    );

    assert!(!engine.guild.was_kicked(peer.id));
    assert!(!engine.guild.is_banned(manager.id));
    assert!(engine.audit.events().is_empty());
}

#[tokio::test]
async fn test_founder_outranks_chair() {
    let engine = TestEngine::start().unwrap();
    let founder = staff_member("founder", &[FOUNDER_ROLE]);
    let chair = staff_member("chair", &[CHAIR_ROLE, STAFF_ROLE]);
    engine.seed(&[&founder, &chair]);

    let reply = engine.invoke(&founder, kick(chair.id)).await.unwrap();

    assert!(!reply.ephemeral);
    assert!(engine.guild.was_kicked(chair.id));
}

#[tokio::test]
async fn test_ban_member_who_already_left() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);
    let departed = unique_id();

    let reply = engine
        .invoke(&staff, ban(departed, Some("ban evasion")))
        .await
        .unwrap();

    assert_eq!(reply.content, format!("<@{departed}> has been banned."));
    assert!(engine.guild.is_banned(departed));
    assert_eq!(engine.audit.count(AuditKind::Ban), 1);

    // Kicks still need the member to be present
    let reply = engine.invoke(&staff, kick(unique_id())).await.unwrap();
    assert!(reply.content.starts_with("❌ An error occurred:"));
}

#[tokio::test]
async fn test_cannot_kick_self() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine.invoke(&staff, kick(staff.id)).await.unwrap();

    assert!(reply.content.contains("equal or higher role"));
    assert!(!engine.guild.was_kicked(staff.id));
}

#[tokio::test]
async fn test_kick_unknown_member_reports_platform_failure() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine.invoke(&staff, kick(unique_id())).await.unwrap();

    assert!(reply.ephemeral);
    assert!(reply.content.starts_with("❌ An error occurred:"));
    assert!(engine.audit.events().is_empty());
}

// ============================================================================
// Timeout
// ============================================================================

#[tokio::test]
async fn test_timeout_durations() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("loud", 100);
    engine.seed(&[&staff, &target]);

    for (input, delta) in [
        ("30s", TimeDelta::seconds(30)),
        ("5m", TimeDelta::minutes(5)),
        ("2h", TimeDelta::hours(2)),
        ("7d", TimeDelta::days(7)),
    ] {
        let reply = engine.invoke(&staff, timeout(target.id, input)).await.unwrap();
        assert!(!reply.ephemeral, "{input}");
        assert_eq!(
            engine.guild.timed_out_until(target.id),
            Some(test_now() + delta),
            "{input}"
        );
    }

    assert_eq!(engine.audit.count(AuditKind::Timeout), 4);
}

#[tokio::test]
async fn test_timeout_reply_text() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("loud", 100);
    engine.seed(&[&staff, &target]);

    let reply = engine
        .invoke(
            &staff,
            Command::Timeout {
                target: target.id,
                duration: "5m".to_string(),
                reason: Some("caps lock".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        reply.content,
        format!(
            "✅ <@{}> has been timed out for 5 minutes. Reason: caps lock",
            target.id
        )
    );
}

#[tokio::test]
async fn test_invalid_timeout_durations() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("loud", 100);
    engine.seed(&[&staff, &target]);

    for input in ["10x", "abc", "", "0m", "5", "100000000d"] {
        let reply = engine.invoke(&staff, timeout(target.id, input)).await.unwrap();
        assert!(reply.ephemeral, "{input}");
        assert!(reply.content.contains("Invalid duration"), "{input}: {}", reply.content);
    }

    assert_eq!(engine.guild.timed_out_until(target.id), None);
    assert!(engine.audit.events().is_empty());
}

#[tokio::test]
async fn test_cannot_timeout_self() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine.invoke(&staff, timeout(staff.id, "5m")).await.unwrap();

    assert_eq!(reply.content, "❌ You can't timeout yourself");
    assert_eq!(engine.guild.timed_out_until(staff.id), None);
    assert!(engine.audit.events().is_empty());
}

// ============================================================================
// Channel commands
// ============================================================================

#[tokio::test]
async fn test_lock_and_unlock_round_trip() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);
    assert!(engine
        .guild
        .everyone_allowed(MOD_CHANNEL, Permissions::SEND_MESSAGES));

    let reply = engine
        .invoke_in(&staff, MOD_CHANNEL, Command::Lock)
        .await
        .unwrap();
    assert_eq!(reply.content, format!("<#{MOD_CHANNEL}> is now locked."));
    assert!(!engine
        .guild
        .everyone_allowed(MOD_CHANNEL, Permissions::SEND_MESSAGES));

    let reply = engine
        .invoke_in(&staff, MOD_CHANNEL, Command::Unlock)
        .await
        .unwrap();
    assert_eq!(reply.content, format!("<#{MOD_CHANNEL}> is now unlocked."));
    assert!(engine
        .guild
        .everyone_allowed(MOD_CHANNEL, Permissions::SEND_MESSAGES));

    assert_eq!(
        engine.audit.kinds(),
        vec![AuditKind::ChannelLocked, AuditKind::ChannelUnlocked]
    );
}

#[tokio::test]
async fn test_lock_is_idempotent() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    for _ in 0..2 {
        let reply = engine
            .invoke_in(&staff, MOD_CHANNEL, Command::Lock)
            .await
            .unwrap();
        assert!(!reply.ephemeral);
        assert_eq!(reply.content, format!("<#{MOD_CHANNEL}> is now locked."));
        assert!(!engine
            .guild
            .everyone_allowed(MOD_CHANNEL, Permissions::SEND_MESSAGES));
    }
    assert_eq!(engine.audit.count(AuditKind::ChannelLocked), 2);

    engine
        .invoke_in(&staff, MOD_CHANNEL, Command::Unlock)
        .await
        .unwrap();
    assert!(engine
        .guild
        .everyone_allowed(MOD_CHANNEL, Permissions::SEND_MESSAGES));
}

#[tokio::test]
async fn test_purge_removes_up_to_amount() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);
    engine.guild.add_history(MOD_CHANNEL, 12);

    let reply = engine
        .invoke_in(&staff, MOD_CHANNEL, Command::Purge { amount: 5 })
        .await
        .unwrap();
    assert!(reply.ephemeral);
    assert_eq!(reply.content, "✅ Deleted 5 messages.");
    assert_eq!(engine.guild.channel(MOD_CHANNEL).history, 7);

    let reply = engine
        .invoke_in(&staff, MOD_CHANNEL, Command::Purge { amount: 100 })
        .await
        .unwrap();
    assert_eq!(reply.content, "✅ Deleted 7 messages.");
    assert_eq!(engine.guild.channel(MOD_CHANNEL).history, 0);

    assert_eq!(engine.audit.count(AuditKind::Purge), 2);
}

#[tokio::test]
async fn test_purge_rejects_non_positive_amounts() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);
    engine.guild.add_history(MOD_CHANNEL, 3);

    for amount in [0, -4] {
        let reply = engine
            .invoke_in(&staff, MOD_CHANNEL, Command::Purge { amount })
            .await
            .unwrap();
        assert_eq!(
            reply.content,
            format!("❌ Purge amount must be a positive integer, got {amount}")
        );
    }

    assert_eq!(engine.guild.channel(MOD_CHANNEL).history, 3);
    assert!(engine.audit.events().is_empty());
}

// ============================================================================
// Say / embed
// ============================================================================

#[tokio::test]
async fn test_say_posts_as_bot() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine
        .invoke_in(
            &staff,
            MOD_CHANNEL,
            Command::Say {
                message: "Matchday thread is up".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(reply.ephemeral);
    assert_eq!(reply.content, "✅ Message sent.");
    assert_eq!(
        engine.guild.posted(MOD_CHANNEL),
        vec![OutgoingMessage::text("Matchday thread is up")]
    );
    assert_eq!(engine.audit.kinds(), vec![AuditKind::Say]);
}

#[tokio::test]
async fn test_say_rejects_empty_message() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine
        .invoke_in(
            &staff,
            MOD_CHANNEL,
            Command::Say {
                message: String::new(),
            },
        )
        .await
        .unwrap();

    assert!(reply.content.starts_with("❌ Invalid input"));
    assert!(engine.guild.posted(MOD_CHANNEL).is_empty());
    assert!(engine.audit.events().is_empty());
}

#[tokio::test]
async fn test_embed_from_delimited_input() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    let reply = engine
        .invoke_in(
            &staff,
            MOD_CHANNEL,
            Command::Embed {
                input: EmbedInput::Delimited("Derby day | Kick-off at 17:30".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(reply.content, "✅ Embed sent.");
    let posted = engine.guild.posted(MOD_CHANNEL);
    assert_eq!(posted.len(), 1);
    match &posted[0] {
        OutgoingMessage::Embed { embed } => {
            assert_eq!(embed.title, "Derby day");
            assert_eq!(embed.description, "Kick-off at 17:30");
        }
        other => panic!("expected an embed, got {other:?}"),
    }
    assert!(engine
        .audit
        .last()
        .unwrap()
        .detail
        .contains("titled 'Derby day'"));
}

#[tokio::test]
async fn test_malformed_embed_input() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    engine.seed(&[&staff]);

    for input in [
        EmbedInput::Delimited("no delimiter here".to_string()),
        EmbedInput::Delimited(" | body only".to_string()),
        EmbedInput::Fields {
            title: String::new(),
            description: "body".to_string(),
        },
    ] {
        let reply = engine
            .invoke_in(&staff, MOD_CHANNEL, Command::Embed { input })
            .await
            .unwrap();
        assert!(
            reply.content.starts_with("❌ Malformed embed input"),
            "{}",
            reply.content
        );
    }

    assert!(engine.guild.posted(MOD_CHANNEL).is_empty());
    assert!(engine.audit.events().is_empty());
}

// ============================================================================
// Audit delivery
// ============================================================================

#[tokio::test]
async fn test_audit_failure_does_not_fail_the_action() {
    let engine = TestEngine::start().unwrap();
    let staff = staff_member("staff", &[STAFF_ROLE]);
    let target = member_aged_days("target", 100);
    engine.seed(&[&staff, &target]);
    engine.audit.reject_all(true);

    let reply = engine.invoke(&staff, ban(target.id, None)).await.unwrap();

    assert_eq!(reply.content, format!("<@{}> has been banned.", target.id));
    assert!(engine.guild.is_banned(target.id));
    assert!(engine.audit.events().is_empty());
}
