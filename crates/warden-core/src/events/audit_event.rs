//! Audit events - append-only records of privileged actions
//!
//! The engine only ever writes these; rendering and delivery belong to the
//! audit sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Member;
use crate::value_objects::Snowflake;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditKind {
    MemberJoined,
    VerificationSkipped,
    MemberVerified,
    NicknameChangeFailed,
    TrustedRoleGranted,
    Kick,
    Ban,
    Timeout,
    Purge,
    ChannelLocked,
    ChannelUnlocked,
    Say,
    Embed,
}

impl AuditKind {
    /// Notification title
    pub fn title(self) -> &'static str {
        match self {
            Self::MemberJoined => "New Member Joined",
            Self::VerificationSkipped => "Verification Skipped",
            Self::MemberVerified => "Member Verified",
            Self::NicknameChangeFailed => "Nickname Change Failed",
            Self::TrustedRoleGranted => "Trusted Role Granted",
            Self::Kick => "Kick",
            Self::Ban => "Ban",
            Self::Timeout => "Timeout",
            Self::Purge => "Purge",
            Self::ChannelLocked => "Channel Locked",
            Self::ChannelUnlocked => "Channel Unlocked",
            Self::Say => "Say",
            Self::Embed => "Embed",
        }
    }

    /// Default classification for this kind
    pub fn severity(self) -> Severity {
        match self {
            Self::MemberJoined => Severity::Warning,
            Self::VerificationSkipped | Self::Kick | Self::Timeout => Severity::Notice,
            Self::MemberVerified | Self::TrustedRoleGranted => Severity::Success,
            Self::NicknameChangeFailed | Self::Ban => Severity::Danger,
            Self::Purge
            | Self::ChannelLocked
            | Self::ChannelUnlocked
            | Self::Say
            | Self::Embed => Severity::Info,
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Severity / color classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Notice,
    Danger,
}

impl Severity {
    /// RGB color used when rendering the notification
    pub fn color(self) -> u32 {
        match self {
            Self::Info => 0x0034_98DB,
            Self::Success => 0x002E_CC71,
            Self::Warning => 0x00F1_C40F,
            Self::Notice => 0x00E6_7E22,
            Self::Danger => 0x00E7_4C3C,
        }
    }
}

/// Who the event is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSubject {
    pub id: Snowflake,
    pub name: String,
}

impl AuditSubject {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Subject known only by id; the mention stands in for the name
    pub fn from_id(id: Snowflake) -> Self {
        Self::new(id, id.mention())
    }
}

impl From<&Member> for AuditSubject {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.username.clone(),
        }
    }
}

/// Audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub subject: AuditSubject,
    pub kind: AuditKind,
    pub detail: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Create an event with the kind's default severity
    pub fn new(
        subject: AuditSubject,
        kind: AuditKind,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            kind,
            detail: detail.into(),
            severity: kind.severity(),
            timestamp,
        }
    }
}
