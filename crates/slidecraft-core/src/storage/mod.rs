//! Storage abstraction for deck persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, LAST_DECK_KEY};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::DeckDocument;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Deck not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for deck storage backends.
///
/// Implementations can store exported deck documents in memory or on the
/// filesystem; remote backends fit the same surface.
pub trait Storage: Send + Sync {
    /// Save a deck document under a key.
    fn save(&self, id: &str, document: &DeckDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a deck document.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<DeckDocument>>;

    /// Delete a deck document.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored deck keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a deck exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
