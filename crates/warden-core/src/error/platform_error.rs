//! Failures reported by the chat platform when it rejects a request

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Reason the platform rejected a mutation or lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The bot lacks rank or permission for this action
    #[error("Missing access: {0}")]
    Forbidden(String),

    #[error("Rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Unknown member: {0}")]
    UnknownMember(Snowflake),

    #[error("Unknown channel: {0}")]
    UnknownChannel(Snowflake),

    #[error("Platform request failed: {0}")]
    Other(String),
}

impl PlatformError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "MISSING_ACCESS",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::UnknownMember(_) => "UNKNOWN_MEMBER",
            Self::UnknownChannel(_) => "UNKNOWN_CHANNEL",
            Self::Other(_) => "PLATFORM_ERROR",
        }
    }

    #[inline]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}
