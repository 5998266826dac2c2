//! Audit sink that keeps events in memory

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use warden_core::traits::AuditSink;
use warden_core::{AuditEvent, AuditKind, PlatformError};

/// Collects every audit event it receives
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
    reject: AtomicBool,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    pub fn kinds(&self) -> Vec<AuditKind> {
        self.events.lock().iter().map(|e| e.kind).collect()
    }

    pub fn count(&self, kind: AuditKind) -> usize {
        self.events.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn last(&self) -> Option<AuditEvent> {
        self.events.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Refuse deliveries from now on (events are not kept)
    pub fn reject_all(&self, reject: bool) {
        self.reject.store(reject, Ordering::Relaxed);
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, event: AuditEvent) -> Result<(), PlatformError> {
        if self.reject.load(Ordering::Relaxed) {
            return Err(PlatformError::Other("audit sink rejected the event".into()));
        }
        self.events.lock().push(event);
        Ok(())
    }
}
