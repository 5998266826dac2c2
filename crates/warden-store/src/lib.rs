//! # warden-store
//!
//! Storage layer implementing the [`ParticipationStore`] trait defined in
//! `warden-core`.
//!
//! - [`JsonParticipationStore`]: one JSON object on disk, `{"<member id>": count}`,
//!   rewritten atomically after every increment
//! - [`InMemoryParticipationStore`]: process-local counts for tests and dry runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_store::JsonParticipationStore;
//! use warden_core::ParticipationStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonParticipationStore::open("message_counts.json").await?;
//!     let count = store.increment(member_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! [`ParticipationStore`]: warden_core::ParticipationStore

pub mod error;
pub mod json_file;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use json_file::JsonParticipationStore;
pub use memory::InMemoryParticipationStore;
