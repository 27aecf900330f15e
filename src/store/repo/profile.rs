use crate::models::profile::ProfileRecord;
use crate::models::types::UserName;
use crate::store::StoreResult;

/// Raw record storage: one record per user name, whole-record reads and writes.
#[async_trait::async_trait]
pub trait ProfileRepo: Send + Sync {
    /// Prepare the backing storage (create directories etc).
    async fn init(&self) -> StoreResult<()>;

    /// `Ok(None)` when no record exists for `user`.
    async fn fetch(&self, user: &UserName) -> StoreResult<Option<ProfileRecord>>;

    /// Replaces any previous record for `user`.
    async fn store(&self, user: &UserName, record: &ProfileRecord) -> StoreResult<()>;

    /// Returns whether a record existed.
    async fn remove(&self, user: &UserName) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<usize>;
}
