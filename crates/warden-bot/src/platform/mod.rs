//! Guild platform adapters

mod memory;

pub use memory::{ChannelRecord, MemberRecord, MemoryGuild};
