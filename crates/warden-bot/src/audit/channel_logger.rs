//! Audit channel logger
//!
//! Renders audit events as embeds and posts them to the configured audit
//! channel through the guild platform.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use warden_core::traits::{AuditSink, Embed, GuildPlatform, OutgoingMessage};
use warden_core::{AuditEvent, PlatformError, Snowflake};

/// Posts audit events to one channel
#[derive(Clone)]
pub struct ChannelAuditLogger {
    platform: Arc<dyn GuildPlatform>,
    channel_id: Snowflake,
}

impl ChannelAuditLogger {
    pub fn new(platform: Arc<dyn GuildPlatform>, channel_id: Snowflake) -> Self {
        Self {
            platform,
            channel_id,
        }
    }

    pub fn channel_id(&self) -> Snowflake {
        self.channel_id
    }

    /// Embed shown in the audit channel for `event`
    pub fn render(event: &AuditEvent) -> Embed {
        Embed {
            title: event.kind.title().to_string(),
            description: event.detail.clone(),
            color: event.severity.color(),
            author: Some(event.subject.name.clone()),
            timestamp: Some(event.timestamp),
        }
    }
}

impl std::fmt::Debug for ChannelAuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelAuditLogger")
            .field("channel_id", &self.channel_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuditSink for ChannelAuditLogger {
    async fn record(&self, event: AuditEvent) -> Result<(), PlatformError> {
        let embed = Self::render(&event);
        self.platform
            .send_message(self.channel_id, OutgoingMessage::Embed { embed })
            .await?;
        debug!(kind = event.kind.title(), subject = %event.subject.id, "Audit event posted");
        Ok(())
    }
}
