//! Storage abstraction trait
//!
//! This module defines the Storage trait the upload pipeline talks to.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Slot allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A freshly allocated directory that namespaces one upload (or one batch)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Random directory name
    pub name: String,
    /// `<root>/<name>`
    pub path: PathBuf,
}

impl Slot {
    /// Slot name with a trailing separator, as used in public paths
    pub fn key(&self) -> String {
        format!("{}/", self.name)
    }

    /// Location of `filename` inside this slot
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

/// Storage abstraction trait
///
/// Files live at `<root>/<slot>/<filename>`. The filesystem tree is the only state:
/// there is no index of stored files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a new, never used slot directory
    async fn allocate_slot(&self) -> StorageResult<Slot>;

    /// Write `data` verbatim to `<slot>/<filename>` and return the file path.
    /// An existing file is never overwritten: the write fails with `AlreadyExists`.
    async fn write(&self, slot: &Slot, filename: &str, data: Bytes) -> StorageResult<PathBuf>;

    /// Delete `<slot>/<filename>`, then the slot directory if nothing else is left in it.
    /// Deleting a file that does not exist succeeds.
    async fn remove(&self, slot: &Slot, filename: &str) -> StorageResult<()>;

    /// Verify the storage root is usable
    async fn health_check(&self) -> StorageResult<()>;
}
