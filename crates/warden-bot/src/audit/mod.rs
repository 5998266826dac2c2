//! Audit sinks

mod channel_logger;
mod recording;

pub use channel_logger::ChannelAuditLogger;
pub use recording::RecordingAuditSink;
