//! Error types for inkdex-store

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("Storage is disabled")]
    Disabled,

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Saved search not found: {0}")]
    SavedSearchNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
