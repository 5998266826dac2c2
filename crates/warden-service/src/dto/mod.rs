//! Data transfer objects for command input and output
//!
//! This module provides:
//! - Request DTOs with validation for message-emitting commands
//! - The reply returned to whoever invoked a command
//! - The prefix command parser for plain chat messages

pub mod prefix;
pub mod replies;
pub mod requests;

pub use prefix::parse_prefix_command;
pub use replies::CommandReply;
pub use requests::{validation_message, EmbedRequest, SayRequest};
