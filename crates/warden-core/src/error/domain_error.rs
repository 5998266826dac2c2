//! Domain errors - the engine's rejection taxonomy

use thiserror::Error;

use crate::value_objects::CommandName;

use super::PlatformError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You do not have permission to use /{command}")]
    PermissionDenied { command: CommandName },

    #[error("You cannot {command} someone with an equal or higher role")]
    HierarchyViolation { command: CommandName },

    #[error("You can't {command} yourself")]
    SelfActionDenied { command: CommandName },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid duration '{0}': use e.g. 30s, 5m, 2h, 7d")]
    InvalidDuration(String),

    #[error("Malformed embed input: {0}")]
    MalformedEmbedInput(String),

    #[error("Purge amount must be a positive integer, got {0}")]
    InvalidPurgeAmount(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // =========================================================================
    // Collaborator & Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Platform rejected the request: {0}")]
    CollaboratorFailure(#[from] PlatformError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Get an error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            // Authorization
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::HierarchyViolation { .. } => "HIERARCHY_VIOLATION",
            Self::SelfActionDenied { .. } => "SELF_ACTION_DENIED",

            // Validation
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::MalformedEmbedInput(_) => "MALFORMED_EMBED_INPUT",
            Self::InvalidPurgeAmount(_) => "INVALID_PURGE_AMOUNT",
            Self::InvalidInput(_) => "INVALID_INPUT",

            // Infrastructure
            Self::CollaboratorFailure(_) => "COLLABORATOR_FAILURE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDuration(_)
                | Self::MalformedEmbedInput(_)
                | Self::InvalidPurgeAmount(_)
                | Self::InvalidInput(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. }
                | Self::HierarchyViolation { .. }
                | Self::SelfActionDenied { .. }
        )
    }

    /// Check if the platform rejected a request
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::CollaboratorFailure(_))
    }

    /// Validation and authorization failures happen before any mutation
    pub fn is_rejection(&self) -> bool {
        self.is_validation() || self.is_authorization()
    }
}
