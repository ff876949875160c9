//! Error types for durable history storage.
//!
//! These never reach the user: the [`HistoryStore`](super::HistoryStore) logs them
//! and carries on as if the operation had been a no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
