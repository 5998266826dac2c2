//! Value objects - immutable types that represent domain concepts

mod command;
mod duration;
mod permissions;
mod snowflake;

pub use command::CommandName;
pub use duration::{DurationUnit, TimeoutDuration};
pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeParseError};
