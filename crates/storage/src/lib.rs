#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonProfileStore;
pub use repository::{InMemoryProfileStore, ProfileRepository, StorageError};
