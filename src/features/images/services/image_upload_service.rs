use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::features::images::models::{CreateImageMetadata, ImageMetadata};
use crate::features::images::store::ImageMetadataStore;
use crate::modules::storage::{generate_filename, LocalDiskStorage, StorageError};

/// A decoded upload request
#[derive(Debug)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub is_recyclable: bool,
    /// Client-side filename, for logging only
    pub original_filename: Option<String>,
}

/// Receives uploaded images: stores the binary and records its metadata
pub struct ImageUploadService {
    config: UploadConfig,
    storage: LocalDiskStorage,
    store: Arc<dyn ImageMetadataStore>,
}

fn map_storage_error(e: StorageError) -> AppError {
    match e {
        StorageError::AlreadyExists(name) => {
            AppError::Conflict(format!("An image named '{}' already exists", name))
        }
        e => AppError::Storage(e),
    }
}

impl ImageUploadService {
    pub fn new(config: UploadConfig, store: Arc<dyn ImageMetadataStore>) -> Self {
        let storage = LocalDiskStorage::new(config.upload_dir.clone());
        Self {
            config,
            storage,
            store,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Check the configured upload directory at startup
    pub async fn check_upload_dir(&self) -> Result<()> {
        self.storage
            .ensure_directory()
            .await
            .map_err(map_storage_error)
    }

    /// Store an uploaded image and create its metadata record
    ///
    /// The file is staged first, the record is created, and only then is the
    /// file moved to its final name. When record creation fails the staged
    /// file is removed; when the final move fails the record is removed. A
    /// failed upload leaves neither a file nor a record behind.
    pub async fn receive(&self, upload: ImageUpload) -> Result<ImageMetadata> {
        if upload.data.is_empty() {
            return Err(AppError::Validation(format!(
                "{} must not be empty",
                self.config.field_name
            )));
        }

        if upload.data.len() > self.config.max_file_size {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.config.max_file_size,
                self.config.max_file_size / 1024 / 1024
            )));
        }

        let filename = generate_filename(&self.config.field_name);
        let staged = self
            .storage
            .stage(&filename, &upload.data)
            .await
            .map_err(map_storage_error)?;

        debug!(
            "Upload staged: original={:?}, stored={}, size={}",
            upload.original_filename,
            staged.filename(),
            staged.size()
        );

        let record = CreateImageMetadata {
            filename: staged.filename().to_string(),
            image_path: staged.final_path().display().to_string(),
            is_recyclable: Some(upload.is_recyclable),
        };

        let metadata = match self.store.create(record).await {
            Ok(metadata) => metadata,
            Err(e) => {
                self.storage.discard(staged).await;
                return Err(e);
            }
        };

        if let Err(e) = self.storage.commit(staged).await {
            error!(
                "Committing file {} failed, removing metadata {}: {}",
                metadata.filename, metadata.id, e
            );
            if let Err(rollback) = self.store.delete(metadata.id).await {
                error!(
                    "Failed to remove metadata {} for uncommitted file: {}",
                    metadata.id, rollback
                );
            }
            return Err(map_storage_error(e));
        }

        info!(
            "Image stored: id={}, filename={}, recyclable={}",
            metadata.id, metadata.filename, metadata.is_recyclable
        );

        Ok(metadata)
    }
}
