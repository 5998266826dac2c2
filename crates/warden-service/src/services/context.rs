//! Engine context - dependency container for services
//!
//! Holds the platform capability, clock, audit sink, participation store and
//! the static role/policy configuration every service reads.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use warden_common::{AppConfig, PolicyConfig};
use warden_core::traits::{AuditSink, Clock, GuildPlatform, ParticipationStore};
use warden_core::{AuditEvent, RoleCatalog};

use super::error::{ServiceError, ServiceResult};

/// Default prefix for text commands
pub const DEFAULT_COMMAND_PREFIX: &str = "+";

/// Engine context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct EngineContext {
    // Capabilities
    platform: Arc<dyn GuildPlatform>,
    clock: Arc<dyn Clock>,
    audit_sink: Arc<dyn AuditSink>,
    participation: Arc<dyn ParticipationStore>,

    // Static configuration
    catalog: Arc<RoleCatalog>,
    policy: PolicyConfig,
    command_prefix: Arc<str>,
}

impl EngineContext {
    /// Start building a context
    pub fn builder() -> EngineContextBuilder {
        EngineContextBuilder::new()
    }

    // === Capabilities ===

    /// Get the guild platform
    pub fn platform(&self) -> &dyn GuildPlatform {
        self.platform.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current instant from the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get the participation store
    pub fn participation(&self) -> &dyn ParticipationStore {
        self.participation.as_ref()
    }

    /// Deliver an audit event
    ///
    /// Delivery failures are logged and swallowed; the action being audited
    /// has already happened.
    pub async fn audit(&self, event: AuditEvent) {
        let kind = event.kind;
        let subject = event.subject.id;
        if let Err(e) = self.audit_sink.record(event).await {
            warn!(
                kind = kind.title(),
                subject = %subject,
                error = %e,
                "Failed to deliver audit event"
            );
        }
    }

    // === Configuration ===

    /// Get the role catalog
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Get the promotion thresholds
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Get the text command prefix
    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("platform", &"dyn GuildPlatform")
            .field("clock", &"dyn Clock")
            .field("audit_sink", &"dyn AuditSink")
            .field("participation", &"dyn ParticipationStore")
            .field("catalog", &self.catalog)
            .field("policy", &self.policy)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// Builder for creating EngineContext
#[derive(Default)]
pub struct EngineContextBuilder {
    platform: Option<Arc<dyn GuildPlatform>>,
    clock: Option<Arc<dyn Clock>>,
    audit_sink: Option<Arc<dyn AuditSink>>,
    participation: Option<Arc<dyn ParticipationStore>>,
    catalog: Option<RoleCatalog>,
    policy: PolicyConfig,
    command_prefix: Option<String>,
}

impl EngineContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take catalog, policy and prefix from loaded configuration
    pub fn config(self, config: &AppConfig) -> Self {
        self.catalog(config.roles.clone())
            .policy(config.policy)
            .command_prefix(config.guild.command_prefix.clone())
    }

    pub fn platform(mut self, platform: Arc<dyn GuildPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    pub fn participation(mut self, store: Arc<dyn ParticipationStore>) -> Self {
        self.participation = Some(store);
        self
    }

    pub fn catalog(mut self, catalog: RoleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub fn command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = Some(prefix.into());
        self
    }

    /// Build the EngineContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if any capability or the
    /// catalog is missing
    pub fn build(self) -> ServiceResult<EngineContext> {
        Ok(EngineContext {
            platform: self
                .platform
                .ok_or(ServiceError::MissingDependency("platform"))?,
            clock: self.clock.ok_or(ServiceError::MissingDependency("clock"))?,
            audit_sink: self
                .audit_sink
                .ok_or(ServiceError::MissingDependency("audit_sink"))?,
            participation: self
                .participation
                .ok_or(ServiceError::MissingDependency("participation"))?,
            catalog: Arc::new(
                self.catalog
                    .ok_or(ServiceError::MissingDependency("catalog"))?,
            ),
            policy: self.policy,
            command_prefix: self
                .command_prefix
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string())
                .into(),
        })
    }
}
