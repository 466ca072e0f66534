use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clurious_core::model::UserProfile;
use tokio::fs;

use crate::repository::{ProfileRepository, StorageError};

/// Profile store backed by a single pretty-printed JSON file.
///
/// Matches the `user.json` layout of the original prototype so an existing
/// profile file keeps working.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileStore {
    async fn load(&self) -> Result<UserProfile, StorageError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}
