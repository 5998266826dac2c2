//! Integration test utilities for the guild engine
//!
//! This crate provides a fully wired engine over the in-memory guild, a
//! recording audit sink and a fixed clock, plus fixtures shaped like the
//! production role layout.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
