//! Upload pipeline: allocate, write, sniff, gate, publish.
//!
//! Each file is written before it is classified. A file that fails classification or the
//! accepted-type gate is deleted again before the error is returned.

use crate::error::storage_app_error;
use crate::state::AppState;
use crate::utils::upload::DecodedFile;
use mediadrop_core::{AppError, SlotStrategy};
use mediadrop_processing::sniff_file;
use mediadrop_storage::{Slot, StorageError};

/// Store every decoded file and return their public URLs in request order.
///
/// Processing stops at the first failure; files accepted before it stay stored.
pub async fn store_files(
    state: &AppState,
    files: Vec<DecodedFile>,
) -> Result<Vec<String>, AppError> {
    let mut urls = Vec::with_capacity(files.len());
    let mut shared_slot: Option<Slot> = None;

    for file in files {
        let slot = match state.config.slot_strategy() {
            SlotStrategy::PerFile => allocate_slot(state).await?,
            SlotStrategy::PerRequest => match &shared_slot {
                Some(slot) => slot.clone(),
                None => {
                    let slot = allocate_slot(state).await?;
                    shared_slot = Some(slot.clone());
                    slot
                }
            },
        };

        urls.push(store_file(state, &slot, file).await?);
    }

    Ok(urls)
}

async fn allocate_slot(state: &AppState) -> Result<Slot, AppError> {
    state.storage.allocate_slot().await.map_err(storage_app_error)
}

/// Run one file through write, sniff and gate inside `slot`.
///
/// When `slot` already holds a file of the same name (a shared per-request slot), the file
/// goes to a fresh slot of its own instead.
pub async fn store_file(
    state: &AppState,
    slot: &Slot,
    file: DecodedFile,
) -> Result<String, AppError> {
    let DecodedFile {
        filename,
        declared_content_type,
        data,
    } = file;
    let size_bytes = data.len();

    let (slot, path) = match state.storage.write(slot, &filename, data.clone()).await {
        Ok(path) => (slot.clone(), path),
        Err(StorageError::AlreadyExists(reason)) => {
            let fresh = allocate_slot(state).await?;
            tracing::debug!(
                slot = %fresh.name,
                filename = %filename,
                reason = %reason,
                "Name taken in shared slot, storing in a fresh slot"
            );
            let path = state
                .storage
                .write(&fresh, &filename, data)
                .await
                .map_err(storage_app_error)?;
            (fresh, path)
        }
        Err(e) => return Err(storage_app_error(e)),
    };

    let verdict = match sniff_file(&path).await {
        Ok(content_type) => state
            .gate
            .check(content_type)
            .map(|()| content_type)
            .map_err(AppError::from),
        Err(e) => Err(AppError::from(e)),
    };

    let content_type = match verdict {
        Ok(content_type) => content_type,
        Err(err) => {
            tracing::warn!(
                slot = %slot.name,
                filename = %filename,
                declared_content_type = ?declared_content_type,
                error = %err,
                "Rejected upload"
            );
            discard(state, &slot, &filename).await;
            return Err(err);
        }
    };

    let url = state.urls.build(&slot.key(), &filename);

    tracing::info!(
        slot = %slot.name,
        filename = %filename,
        content_type = content_type,
        size_bytes,
        url = %url,
        "Upload accepted"
    );

    Ok(url)
}

async fn discard(state: &AppState, slot: &Slot, filename: &str) {
    if let Err(e) = state.storage.remove(slot, filename).await {
        tracing::error!(
            error = %e,
            slot = %slot.name,
            filename = %filename,
            "Failed to delete rejected upload"
        );
    }
}
