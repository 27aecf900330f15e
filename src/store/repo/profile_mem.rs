use crate::models::profile::ProfileRecord;
use crate::models::types::UserName;
use crate::store::StoreResult;
use crate::store::error::StoreError;
use crate::store::repo::ProfileRepo;
use dashmap::DashMap;

/// Ephemeral storage. Records are kept as serialized JSON so that the same
/// decode path (and its failure modes) applies as for files.
#[derive(Default)]
pub struct MemoryProfileRepository {
    records: DashMap<UserName, String>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw record in place, bypassing serialization.
    pub fn insert_raw(&self, user: &UserName, raw: impl Into<String>) {
        self.records.insert(user.clone(), raw.into());
    }

    pub fn raw(&self, user: &UserName) -> Option<String> {
        self.records.get(user).map(|r| r.value().clone())
    }
}

fn location(user: &UserName) -> String {
    format!("memory:{user}")
}

#[async_trait::async_trait]
impl ProfileRepo for MemoryProfileRepository {
    async fn init(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn fetch(&self, user: &UserName) -> StoreResult<Option<ProfileRecord>> {
        let Some(raw) = self.raw(user) else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                location: location(user),
                source,
            })
    }

    async fn store(&self, user: &UserName, record: &ProfileRecord) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(record).map_err(|source| StoreError::Parse {
            location: location(user),
            source,
        })?;
        self.records.insert(user.clone(), raw);
        Ok(())
    }

    async fn remove(&self, user: &UserName) -> StoreResult<bool> {
        Ok(self.records.remove(user).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.len())
    }
}
