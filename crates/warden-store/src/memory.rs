//! Process-local participation counts

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use warden_core::traits::{ParticipationStore, StoreResult};
use warden_core::Snowflake;

/// Counts held in memory only; lost on restart
#[derive(Debug, Default)]
pub struct InMemoryParticipationStore {
    counts: Mutex<HashMap<Snowflake, u64>>,
}

impl InMemoryParticipationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing counts
    pub fn with_counts(counts: impl IntoIterator<Item = (Snowflake, u64)>) -> Self {
        Self {
            counts: Mutex::new(counts.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ParticipationStore for InMemoryParticipationStore {
    async fn count(&self, member_id: Snowflake) -> StoreResult<u64> {
        Ok(self.counts.lock().await.get(&member_id).copied().unwrap_or(0))
    }

    async fn increment(&self, member_id: Snowflake) -> StoreResult<u64> {
        let mut counts = self.counts.lock().await;
        let count = counts.entry(member_id).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }

    async fn member_count(&self) -> StoreResult<usize> {
        Ok(self.counts.lock().await.len())
    }
}
