use crate::names::random_name;
use crate::traits::{Slot, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Attempts at drawing an unused slot name before giving up
const MAX_SLOT_ATTEMPTS: usize = 8;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    name_length: usize,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "download/")
    /// * `name_length` - Length of generated slot names
    pub async fn new(base_path: impl Into<PathBuf>, name_length: usize) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            name_length,
        })
    }

    /// Validate that a client-supplied filename stays inside its slot.
    fn validate_filename(filename: &str) -> StorageResult<()> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains('\0')
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a plain file name",
                filename
            )));
        }
        Ok(())
    }

    fn slot_path(&self, slot: &Slot, filename: &str) -> StorageResult<PathBuf> {
        Self::validate_filename(filename)?;
        if slot.path.parent() != Some(self.base_path.as_path()) {
            return Err(StorageError::InvalidKey(format!(
                "slot {} does not belong to {}",
                slot.name,
                self.base_path.display()
            )));
        }
        Ok(slot.file_path(filename))
    }

    async fn fill(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
        file.write_all(data).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn allocate_slot(&self) -> StorageResult<Slot> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::AllocationFailed(format!(
                "Failed to create storage root {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        for attempt in 1..=MAX_SLOT_ATTEMPTS {
            let name = random_name(self.name_length);
            let path = self.base_path.join(&name);

            match fs::create_dir(&path).await {
                Ok(()) => {
                    tracing::debug!(slot = %name, path = %path.display(), "Allocated storage slot");
                    return Ok(Slot { name, path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::warn!(
                        slot = %name,
                        attempt,
                        "Slot name collision, drawing a new name"
                    );
                }
                Err(e) => {
                    return Err(StorageError::AllocationFailed(format!(
                        "Failed to create slot {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        Err(StorageError::AllocationFailed(format!(
            "No free slot name found after {} attempts",
            MAX_SLOT_ATTEMPTS
        )))
    }

    async fn write(&self, slot: &Slot, filename: &str, data: Bytes) -> StorageResult<PathBuf> {
        let path = self.slot_path(slot, filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        // Never truncate: a name already taken in the slot belongs to another upload.
        let opened = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(format!(
                    "{} is already taken in slot {}",
                    filename, slot.name
                )));
            }
            Err(e) => {
                return Err(StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if let Err(e) = Self::fill(&mut file, &data).await {
            drop(file);
            if let Err(cleanup_err) = fs::remove_file(&path).await {
                if cleanup_err.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %path.display(),
                        "Failed to remove partially written file"
                    );
                }
            }
            return Err(StorageError::WriteFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            slot = %slot.name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(path)
    }

    async fn remove(&self, slot: &Slot, filename: &str) -> StorageResult<()> {
        let path = self.slot_path(slot, filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        // Only succeeds when the slot is empty; a shared slot keeps its other files.
        if let Err(e) = fs::remove_dir(&slot.path).await {
            tracing::debug!(
                error = %e,
                slot = %slot.name,
                "Slot directory kept after delete"
            );
        }

        tracing::info!(
            path = %path.display(),
            slot = %slot.name,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        let meta = fs::metadata(&self.base_path).await?;
        if !meta.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        if meta.permissions().readonly() {
            return Err(StorageError::ConfigError(format!(
                "{} is read-only",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
