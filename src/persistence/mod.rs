//! Save/load of the grid and inventory
//!
//! Features:
//! - Two JSON blobs under fixed keys (grid rows, inventory map)
//! - Any key-value backend (LocalStorage on web, memory for tests/native)
//! - Missing or malformed blobs load as "no saved state"

pub mod snapshot;

use std::collections::HashMap;

pub use snapshot::{Snapshot, load, load_into, save};

/// Errors from writing saved state
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("storage unavailable")]
    Unavailable,
}

/// Blob storage addressed by name
pub trait KeyValueStore {
    /// Stored value, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
