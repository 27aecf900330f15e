use crate::models::profile::{Links, MAX_LINKS, Profile};
use crate::models::types::UserName;
use crate::services::{LinkError, ServiceResult};
use crate::store::ProfileStore;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Record-level rules on top of [`ProfileStore`].
///
/// Every mutation is a read-modify-write of the whole record. Mutations on the same user
/// are serialized through a per-user lock, so two concurrent changes never overwrite each
/// other. Different users never contend.
pub struct ProfileService {
    store: Arc<ProfileStore>,
    locks: DashMap<UserName, Arc<Mutex<()>>>,
}

impl ProfileService {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    /// Sets (or replaces) the bio. An empty string is a valid bio.
    pub async fn set_bio(&self, user: &UserName, text: &str) -> ServiceResult<()> {
        tracing::info!(%user, "updating bio");
        self.mutate(user, |p| {
            p.bio = Some(text.to_string());
            Ok(true)
        })
        .await
    }

    /// Removes the bio. Nothing is written when there is no bio.
    pub async fn clear_bio(&self, user: &UserName) -> ServiceResult<()> {
        self.mutate(user, |p| Ok(p.bio.take().is_some())).await
    }

    pub async fn add_link(&self, user: &UserName, name: &str, url: &str) -> ServiceResult<()> {
        tracing::info!(%user, link = name, url, "adding link");
        self.mutate(user, |p| {
            let links = p.links.get_or_insert_with(Links::new);
            if links.len() >= MAX_LINKS {
                return Err(LinkError::CapacityExceeded { max: MAX_LINKS });
            }
            if links.contains_key(name) {
                return Err(LinkError::DuplicateName(name.to_string()));
            }
            links.insert(name.to_string(), url.to_string());
            Ok(true)
        })
        .await
    }

    pub async fn remove_link(&self, user: &UserName, name: &str) -> ServiceResult<()> {
        tracing::info!(%user, link = name, "removing link");
        self.mutate(user, |p| {
            let links = p.links.as_mut().ok_or(LinkError::NoLinks)?;
            links
                .remove(name)
                .map(|_| true)
                .ok_or_else(|| LinkError::NotFound(name.to_string()))
        })
        .await
    }

    /// Deletes the whole record; returns whether there was one.
    pub async fn delete_profile(&self, user: &UserName) -> ServiceResult<bool> {
        let lock = self.lock_for(user);
        let deleted = {
            let _guard = lock.lock().await;
            self.store.delete(user).await
        };
        drop(lock);
        self.release(user);

        Ok(deleted?)
    }

    pub async fn get_profile(&self, user: &UserName) -> ServiceResult<Profile> {
        Ok(self.store.load(user).await?)
    }

    pub async fn profile_count(&self) -> ServiceResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Load, apply `f`, and save when `f` reports a change. A rule violation from `f`
    /// leaves the stored record untouched.
    async fn mutate<F>(&self, user: &UserName, f: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Profile) -> Result<bool, LinkError> + Send,
    {
        let lock = self.lock_for(user);
        let result = {
            let _guard = lock.lock().await;
            self.apply(user, f).await
        };
        drop(lock);
        self.release(user);

        result
    }

    async fn apply<F>(&self, user: &UserName, f: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Profile) -> Result<bool, LinkError> + Send,
    {
        let mut profile = self.store.load(user).await?;
        if f(&mut profile)? {
            self.store.save(&profile).await?;
        }
        Ok(())
    }

    fn lock_for(&self, user: &UserName) -> Arc<Mutex<()>> {
        self.locks.entry(user.clone()).or_default().value().clone()
    }

    // Drop the lock entry once nobody else holds or waits on it
    fn release(&self, user: &UserName) {
        self.locks.remove_if(user, |_, lock| Arc::strong_count(lock) == 1);
    }
}
