//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use warden_common::AppError;
use warden_core::{DomainError, PlatformError};

use crate::dto::CommandReply;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or collaborator failure
    Domain(DomainError),

    /// Application error (config, telemetry, etc.)
    App(AppError),

    /// A required dependency was not supplied to the context builder
    MissingDependency(&'static str),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::MissingDependency(name) => write!(f, "{name} is required"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::MissingDependency(_) => "MISSING_DEPENDENCY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Rejected before any mutation (permission, hierarchy, bad input)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_rejection())
    }

    /// The platform refused or failed a request
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_collaborator())
    }

    /// The explanation shown to the invoker; always ephemeral
    pub fn reply(&self) -> CommandReply {
        if self.is_rejection() {
            CommandReply::ephemeral(format!("❌ {self}"))
        } else {
            CommandReply::ephemeral(format!("❌ An error occurred: {self}"))
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(err: PlatformError) -> Self {
        Self::Domain(DomainError::CollaboratorFailure(err))
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::MissingDependency(name) => {
                AppError::Internal(anyhow::anyhow!("{name} is required"))
            }
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
