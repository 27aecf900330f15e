use crate::models::profile::ProfileRecord;
use crate::models::types::UserName;
use crate::store::StoreResult;
use crate::store::error::StoreError;
use crate::store::repo::ProfileRepo;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const RECORD_EXT: &str = "json";

/// Stores each profile as `<root>/<user>.json`.
pub struct ProfileRepository {
    root: PathBuf,
}

impl ProfileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn record_path(&self, user: &UserName) -> PathBuf {
        self.root.join(format!("{user}.{RECORD_EXT}"))
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        location: path.display().to_string(),
        source,
    }
}

#[async_trait::async_trait]
impl ProfileRepo for ProfileRepository {
    async fn init(&self) -> StoreResult<()> {
        if tokio::fs::try_exists(&self.root).await.unwrap_or(false) {
            return Ok(());
        }

        tracing::info!(path = %self.root.display(), "creating profiles directory");
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_err(&self.root, e))
    }

    async fn fetch(&self, user: &UserName) -> StoreResult<Option<ProfileRecord>> {
        let path = self.record_path(user);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path, e)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                location: path.display().to_string(),
                source,
            })
    }

    async fn store(&self, user: &UserName, record: &ProfileRecord) -> StoreResult<()> {
        let path = self.record_path(user);
        let payload = serde_json::to_string_pretty(record).map_err(|source| StoreError::Parse {
            location: path.display().to_string(),
            source,
        })?;

        // Write next to the target and rename so readers never see a partial record
        let tmp = path.with_extension(format!("{RECORD_EXT}.tmp"));
        tokio::fs::write(&tmp, payload.as_bytes())
            .await
            .map_err(|e| io_err(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(&path, e));
        }

        tracing::debug!(%user, path = %path.display(), %payload, "profile record written");
        Ok(())
    }

    async fn remove(&self, user: &UserName) -> StoreResult<bool> {
        let path = self.record_path(user);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    async fn count(&self) -> StoreResult<usize> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| io_err(&self.root, e))?;

        let mut n = 0;
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(&self.root, e))? {
            if entry.path().extension().is_some_and(|ext| ext == RECORD_EXT) {
                n += 1;
            }
        }
        Ok(n)
    }
}
