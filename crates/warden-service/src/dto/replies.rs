//! Replies to the member who invoked a command

use serde::Serialize;

/// What the invoker sees after a command
///
/// Ephemeral replies are visible to the invoker only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandReply {
    pub content: String,
    pub ephemeral: bool,
}

impl CommandReply {
    /// Reply visible to the whole channel
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// Reply visible to the invoker only
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}
