//! JSON file implementation of ParticipationStore

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use warden_core::traits::{ParticipationStore, StoreResult as CountResult};
use warden_core::Snowflake;

use crate::error::{StoreError, StoreResult};

/// Durable counts in a single JSON object keyed by member id
///
/// Every increment rewrites the whole file through a sibling `*.tmp` file and
/// a rename, with the lock held across the write. Readers of the file see
/// either the previous or the new snapshot, never a torn one.
#[derive(Debug)]
pub struct JsonParticipationStore {
    path: PathBuf,
    counts: Mutex<BTreeMap<Snowflake, u64>>,
}

impl JsonParticipationStore {
    /// Load counts from `path`; a missing or blank file starts empty
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let counts = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| StoreError::io(parent, e))?;
                }
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        info!(members = counts.len(), "Loaded participation counts");

        Ok(Self {
            path,
            counts: Mutex::new(counts),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn persist(&self, counts: &BTreeMap<Snowflake, u64>) -> StoreResult<()> {
        let bytes = serde_json::to_vec(counts)?;
        let tmp = self.temp_path();

        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }
}

#[async_trait]
impl ParticipationStore for JsonParticipationStore {
    async fn count(&self, member_id: Snowflake) -> CountResult<u64> {
        Ok(self.counts.lock().await.get(&member_id).copied().unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn increment(&self, member_id: Snowflake) -> CountResult<u64> {
        let mut counts = self.counts.lock().await;
        let previous = counts.get(&member_id).copied().unwrap_or(0);
        let next = previous.saturating_add(1);
        counts.insert(member_id, next);

        if let Err(e) = self.persist(&counts).await {
            // Keep memory in step with the last durable snapshot
            if previous == 0 {
                counts.remove(&member_id);
            } else {
                counts.insert(member_id, previous);
            }
            return Err(e.into());
        }

        debug!(count = next, "Persisted participation count");
        Ok(next)
    }

    async fn member_count(&self) -> CountResult<usize> {
        Ok(self.counts.lock().await.len())
    }
}
