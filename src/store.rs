use crate::models::profile::{Profile, ProfileRecord};
use crate::models::types::UserName;
use crate::store::error::StoreError;
use crate::store::repo::{ProfileRepo, ProfileRepository};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// What `ProfileStore::load` does with a record it cannot read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptRecordPolicy {
    /// Log and hand out an empty profile instead.
    #[default]
    Degrade,
    /// Return the error to the caller.
    Surface,
}

impl core::str::FromStr for CorruptRecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "surface" => Ok(Self::Surface),
            other => Err(format!("expected 'degrade' or 'surface', got '{other}'")),
        }
    }
}

/// Durable mapping from user name to profile. Holds no profile state of its own;
/// every call goes to the repository.
pub struct ProfileStore {
    repo: Arc<dyn ProfileRepo>,
    policy: CorruptRecordPolicy,
}

impl ProfileStore {
    pub fn new(repo: Arc<dyn ProfileRepo>, policy: CorruptRecordPolicy) -> Self {
        Self { repo, policy }
    }

    /// File-backed store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>, policy: CorruptRecordPolicy) -> Self {
        Self::new(Arc::new(ProfileRepository::new(root)), policy)
    }

    pub fn policy(&self) -> CorruptRecordPolicy {
        self.policy
    }

    pub async fn init(&self) -> StoreResult<()> {
        self.repo.init().await
    }

    /// Loads the profile of `user`, or an empty one if there is none.
    ///
    /// With [`CorruptRecordPolicy::Degrade`] this never fails: unreadable and malformed
    /// records are logged and treated as missing.
    pub async fn load(&self, user: &UserName) -> StoreResult<Profile> {
        match self.repo.fetch(user).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    %user,
                    bio_len = record.bio.as_ref().map(String::len),
                    links = record.links.as_ref().map_or(0, |l| l.len()),
                    "profile loaded"
                );
                Ok(record.into_profile(user.clone()))
            }
            Ok(None) => Ok(Profile::empty(user.clone())),
            Err(e) if self.policy == CorruptRecordPolicy::Degrade => {
                if e.is_parse() {
                    tracing::warn!(%user, error = %e, "malformed profile record, treating as empty");
                } else {
                    tracing::error!(%user, error = %e, "failed to load profile, treating as empty");
                }
                Ok(Profile::empty(user.clone()))
            }
            Err(e) => {
                tracing::error!(%user, error = %e, "failed to load profile");
                Err(e)
            }
        }
    }

    /// Fully replaces the stored record of `profile.owner`.
    pub async fn save(&self, profile: &Profile) -> StoreResult<()> {
        let user = &profile.owner;
        match self.repo.store(user, &ProfileRecord::from(profile)).await {
            Ok(()) => {
                tracing::info!(%user, "profile saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!(%user, error = %e, "failed to save profile");
                Err(e)
            }
        }
    }

    /// Removes the record of `user`; returns whether there was one.
    pub async fn delete(&self, user: &UserName) -> StoreResult<bool> {
        match self.repo.remove(user).await {
            Ok(true) => {
                tracing::info!(%user, "profile deleted");
                Ok(true)
            }
            Ok(false) => {
                tracing::warn!(%user, "no profile found to delete");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(%user, error = %e, "failed to delete profile");
                Err(e)
            }
        }
    }

    /// Number of stored records.
    pub async fn count(&self) -> StoreResult<usize> {
        self.repo.count().await
    }
}
