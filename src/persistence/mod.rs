//! Best score persistence
//!
//! The only thing saved between sessions is one integer. Storage access is
//! best-effort: unreadable or missing data reads as 0 and failed writes are
//! logged and dropped, so a broken storage backend never stops a round.

use thiserror::Error;

use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::MemoryStorage;

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "gravity_flip_best";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("read failed: {0}")]
    Read(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("stored value is not a score: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw string key/value backend (LocalStorage on web)
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// What the game needs from persistence
pub trait BestScoreStore {
    /// Stored best, 0 if absent or unreadable
    fn best_score(&self) -> u64;
    /// Store a new best; failures are swallowed
    fn set_best_score(&mut self, score: u64);
}

/// Best score kept as a JSON number under [`BEST_SCORE_KEY`]
#[derive(Debug, Clone, Default)]
pub struct BestScore<S> {
    storage: S,
}

impl<S: KeyValueStorage> BestScore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn try_load(&self) -> Result<u64, StorageError> {
        match self.storage.get_item(BEST_SCORE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(0),
        }
    }

    pub fn try_save(&mut self, score: u64) -> Result<(), StorageError> {
        let json = serde_json::to_string(&score)?;
        self.storage.set_item(BEST_SCORE_KEY, &json)
    }
}

impl<S: KeyValueStorage> BestScoreStore for BestScore<S> {
    fn best_score(&self) -> u64 {
        match self.try_load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read best score, starting at 0: {}", e);
                0
            }
        }
    }

    fn set_best_score(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::info!("Best score saved ({})", score),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

/// Forward any new best from a tick's events to the store
pub fn record_best(store: &mut dyn BestScoreStore, events: &[GameEvent]) {
    for event in events {
        if let GameEvent::BestScoreBeaten { score, .. } = event {
            store.set_best_score(*score);
        }
    }
}
