//! History Store: append-only log of completed optimizations under one durable key.
//!
//! Persistence is best effort. A missing, empty or unparsable blob reads as an empty
//! history, and failed writes are logged and dropped. Growth is unbounded and there
//! is no locking, so two sessions sharing a key overwrite each other (last write wins).

pub mod error;
pub mod storage;

pub use error::*;
pub use storage::*;

use crate::model::HistoryEntry;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct HistoryStore {
    storage: Arc<dyn HistoryStorage>,
    key: String,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn HistoryStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Appends `entry` and rewrites the whole list. Storage errors are swallowed.
    ///
    /// A failed read skips the write, so an unreadable store is left as it was.
    /// Missing or unparsable data starts a fresh list.
    pub fn append(&self, entry: HistoryEntry) {
        let raw = match self.storage.read(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "History unavailable, entry not recorded");
                return;
            }
        };
        let mut entries = self.decode(raw);
        entries.push(entry);
        if let Err(e) = self.persist(&entries) {
            warn!(key = %self.key, error = %e, "Failed to persist history");
            return;
        }
        debug!(key = %self.key, len = entries.len(), "History appended");
    }

    /// Every stored entry in append order; empty when nothing usable is stored.
    pub fn load_all(&self) -> Vec<HistoryEntry> {
        match self.storage.read(&self.key) {
            Ok(raw) => self.decode(raw),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read history");
                Vec::new()
            }
        }
    }

    fn decode(&self, raw: Option<String>) -> Vec<HistoryEntry> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Discarding unreadable history");
            Vec::new()
        })
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        self.storage.write(&self.key, &raw)
    }
}
