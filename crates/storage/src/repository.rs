use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clurious_core::model::UserProfile;
use thiserror::Error;

/// Errors surfaced by profile storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("profile not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single persisted learner profile.
///
/// One profile per installation; `save` overwrites the previous record.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the stored profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no profile has been saved yet,
    /// or other storage errors.
    async fn load(&self) -> Result<UserProfile, StorageError>;

    /// Persist the profile, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn save(&self, profile: &UserProfile) -> Result<(), StorageError>;
}

/// In-memory profile store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    inner: Arc<Mutex<Option<UserProfile>>>,
}

impl InMemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial profile.
    #[must_use]
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(profile))),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileStore {
    async fn load(&self) -> Result<UserProfile, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_reports_not_found() {
        let store = InMemoryProfileStore::new();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryProfileStore::new();
        let mut profile = UserProfile::new("Dipanshu", "GATE CSE").unwrap();
        profile
            .mastery_scores
            .insert("Algorithms".into(), 72.5);

        store.save(&profile).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, profile);
        assert_eq!(loaded.mastery("Algorithms"), Some(72.5));
    }
}
