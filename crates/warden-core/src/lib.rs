//! # warden-core
//!
//! Domain layer containing members, the role catalog, staff tiers, league tags,
//! inbound guild events, audit events, and the capability traits the engine
//! consumes. This crate has zero dependencies on infrastructure (chat gateway,
//! storage, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{LeagueTag, Member, RoleCatalog, RoleTag, StaffTier};
pub use error::{DomainError, PlatformError};
pub use events::{
    AuditEvent, AuditKind, AuditSubject, Command, CommandInvocation, EmbedInput, GuildEvent,
    MemberJoinedEvent, MessageReceivedEvent, RoleSetChangedEvent, Severity,
};
pub use traits::{
    AuditSink, Clock, Embed, FixedClock, GuildPlatform, OutgoingMessage, ParticipationStore,
    PlatformResult, StoreResult, SystemClock,
};
pub use value_objects::{
    CommandName, DurationUnit, Permissions, Snowflake, SnowflakeParseError, TimeoutDuration,
};
