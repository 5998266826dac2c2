//! Capability traits (ports) - implemented by the platform shell and the store

mod audit;
mod clock;
mod participation;
mod platform;

pub use audit::AuditSink;
pub use clock::{Clock, FixedClock, SystemClock};
pub use participation::{ParticipationStore, StoreResult};
pub use platform::{Embed, GuildPlatform, OutgoingMessage, PlatformResult};
