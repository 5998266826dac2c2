//! Participation store (port) - durable member message counts

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait ParticipationStore: Send + Sync {
    /// Current count for a member (0 when never seen)
    async fn count(&self, member_id: Snowflake) -> StoreResult<u64>;

    /// Add one message and durably persist before returning the new count
    ///
    /// Increments for the same store are serialized; none are lost.
    async fn increment(&self, member_id: Snowflake) -> StoreResult<u64>;

    /// Number of members with at least one counted message
    async fn member_count(&self) -> StoreResult<usize>;
}
