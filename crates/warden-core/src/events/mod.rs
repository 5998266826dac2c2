//! Domain events - inbound guild events and outbound audit records

mod audit_event;
mod guild_event;

pub use audit_event::{AuditEvent, AuditKind, AuditSubject, Severity};
pub use guild_event::{
    Command, CommandInvocation, EmbedInput, GuildEvent, MemberJoinedEvent, MessageReceivedEvent,
    RoleSetChangedEvent,
};
