//! Auto-save functionality for deck persistence.
//!
//! Provides automatic periodic saving of the working deck to prevent data
//! loss.

use crate::document::DeckDocument;
use crate::storage::{Storage, StorageResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Key for the "last opened" deck, used for auto-restore on startup.
pub const LAST_DECK_KEY: &str = "__last_deck__";

/// Manages automatic deck persistence.
pub struct AutoSaveManager<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Auto-save interval.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the deck has unsaved changes.
    dirty: bool,
    /// Key the working deck is saved under.
    current_deck_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
            current_deck_id: None,
        }
    }

    /// Set the auto-save interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Get the auto-save interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the deck as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the deck has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the key the working deck is saved under.
    pub fn set_deck_id(&mut self, id: Option<String>) {
        self.current_deck_id = id;
    }

    /// Get the current deck key.
    pub fn deck_id(&self) -> Option<&str> {
        self.current_deck_id.as_deref()
    }

    /// Check if enough time has passed for an auto-save.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true, // Never saved, should save
        }
    }

    /// Save the deck if needed (dirty + interval elapsed).
    /// Returns true if a save was performed.
    pub async fn maybe_save(&mut self, document: &DeckDocument) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(document).await?;
        Ok(true)
    }

    /// Force save the deck immediately.
    pub async fn save(&mut self, document: &DeckDocument) -> StorageResult<()> {
        let deck_id = self
            .current_deck_id
            .clone()
            .unwrap_or_else(|| LAST_DECK_KEY.to_string());

        self.storage.save(&deck_id, document).await?;

        // Also save as the "last deck" for auto-restore
        if deck_id != LAST_DECK_KEY {
            self.storage.save(LAST_DECK_KEY, document).await?;
        }

        self.last_save = Some(Instant::now());
        self.dirty = false;
        log::debug!("auto-saved deck under key {deck_id}");
        Ok(())
    }

    /// Restore the last opened deck, if one was saved.
    pub async fn restore_last(&self) -> StorageResult<DeckDocument> {
        self.storage.load(LAST_DECK_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::storage::test_util::block_on;
    use crate::storage::MemoryStorage;

    fn sample_document() -> DeckDocument {
        DeckDocument::export(&Deck::new(), "2026-08-06T00:00:00.000Z")
    }

    #[test]
    fn test_clean_deck_does_not_save() {
        let manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()));
        assert!(!manager.should_save());
    }

    #[test]
    fn test_dirty_deck_saves_immediately_first_time() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());

        manager.mark_dirty();
        assert!(manager.should_save());

        let saved = block_on(manager.maybe_save(&sample_document())).unwrap();
        assert!(saved);
        assert!(!manager.is_dirty());
        assert!(block_on(storage.exists(LAST_DECK_KEY)).unwrap());
    }

    #[test]
    fn test_save_under_named_key_also_updates_last() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone());
        manager.set_deck_id(Some("my-talk".to_string()));

        block_on(manager.save(&sample_document())).unwrap();
        assert!(block_on(storage.exists("my-talk")).unwrap());
        assert!(block_on(storage.exists(LAST_DECK_KEY)).unwrap());
    }

    #[test]
    fn test_interval_gates_repeat_saves() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage);
        manager.set_interval(Duration::from_secs(3600));

        manager.mark_dirty();
        block_on(manager.save(&sample_document())).unwrap();

        // Dirty again, but the interval has not elapsed.
        manager.mark_dirty();
        assert!(!manager.should_save());
    }

    #[test]
    fn test_restore_last() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage);
        let doc = sample_document();

        block_on(manager.save(&doc)).unwrap();
        let restored = block_on(manager.restore_last()).unwrap();
        assert_eq!(restored, doc);
    }
}
