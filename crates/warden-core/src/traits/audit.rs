//! Audit sink - where audit events are delivered

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::events::AuditEvent;

#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Deliver one audit event
    ///
    /// Callers log a failure and carry on; an undeliverable audit entry never
    /// undoes the action it describes.
    async fn record(&self, event: AuditEvent) -> Result<(), PlatformError>;
}
