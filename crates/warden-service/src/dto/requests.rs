//! Request DTOs for message-emitting commands
//!
//! Both implement `Validate`; the moderation service validates before it
//! touches the platform.

use validator::{Validate, ValidationErrors};

use warden_core::{DomainError, EmbedInput};

/// Separator between title and description in one-field embed input
pub const EMBED_DELIMITER: char = '|';

/// `say` request
#[derive(Debug, Clone, Validate)]
pub struct SayRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

impl SayRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Validate, mapping failures to `InvalidInput`
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidInput(validation_message(&e)))?;
        Ok(self)
    }
}

/// `embed` request
#[derive(Debug, Clone, Validate)]
pub struct EmbedRequest {
    #[validate(length(min = 1, max = 256, message = "Embed title must be 1-256 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 4096,
        message = "Embed description must be 1-4096 characters"
    ))]
    pub description: String,
}

impl EmbedRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            description: description.into().trim().to_string(),
        }
    }

    /// Split `title | description` at the first delimiter
    pub fn parse_delimited(input: &str) -> Result<Self, DomainError> {
        let (title, description) = input.split_once(EMBED_DELIMITER).ok_or_else(|| {
            DomainError::MalformedEmbedInput(format!(
                "expected '<title> {EMBED_DELIMITER} <description>'"
            ))
        })?;
        Ok(Self::new(title, description))
    }

    /// Validate, mapping failures to `MalformedEmbedInput`
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate()
            .map_err(|e| DomainError::MalformedEmbedInput(validation_message(&e)))?;
        Ok(self)
    }
}

impl TryFrom<EmbedInput> for EmbedRequest {
    type Error = DomainError;

    fn try_from(input: EmbedInput) -> Result<Self, Self::Error> {
        let request = match input {
            EmbedInput::Fields { title, description } => Self::new(title, description),
            EmbedInput::Delimited(raw) => Self::parse_delimited(&raw)?,
        };
        request.validated()
    }
}

/// Flatten validator output into one stable, human-readable line
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map_or_else(|| err.code.to_string(), ToString::to_string)
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
