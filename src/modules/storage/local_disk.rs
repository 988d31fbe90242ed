//! Local-disk storage for uploaded images
//!
//! Files are written to a hidden staging name inside the upload directory
//! (`.{filename}.part`) and renamed to their final name on commit. Both live
//! in the same directory, so the rename is atomic and readers never observe
//! a partially written image.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload directory does not exist: {0}")]
    DirectoryMissing(String),

    #[error("Upload path is not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate a stored filename in the form `<field>-<unix millis>-<random 0..=1e9>`
///
/// Uniqueness is best-effort; collisions are caught later by the metadata
/// store's unique filename check.
pub fn generate_filename(field_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u64 = rand::rng().random_range(0..=1_000_000_000);
    format!("{}-{}-{}", field_name, millis, suffix)
}

/// An upload that has been written to its staging location but not yet committed
#[derive(Debug)]
pub struct StagedFile {
    filename: String,
    staging_path: PathBuf,
    final_path: PathBuf,
    size: u64,
}

impl StagedFile {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path the file will have once committed
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Upload directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    upload_dir: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Check that the upload directory exists. It is never created here.
    pub async fn ensure_directory(&self) -> Result<(), StorageError> {
        match fs::metadata(&self.upload_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::NotADirectory(self.display_dir())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::DirectoryMissing(self.display_dir()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write `data` to the staging location for `filename`
    pub async fn stage(&self, filename: &str, data: &[u8]) -> Result<StagedFile, StorageError> {
        self.ensure_directory().await?;

        let staging_path = self.upload_dir.join(format!(".{}.part", filename));
        let final_path = self.upload_dir.join(filename);

        if fs::try_exists(&final_path).await? {
            return Err(StorageError::AlreadyExists(filename.to_string()));
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&staging_path).await;
            return Err(e.into());
        }

        debug!(
            "Staged upload: {} ({} bytes)",
            staging_path.display(),
            data.len()
        );

        Ok(StagedFile {
            filename: filename.to_string(),
            staging_path,
            final_path,
            size: data.len() as u64,
        })
    }

    /// Move a staged file to its final name. Never overwrites an existing file.
    ///
    /// The final name is created as a hard link, which fails when the name is
    /// taken, and the staging name is removed afterwards.
    pub async fn commit(&self, staged: StagedFile) -> Result<PathBuf, StorageError> {
        if let Err(e) = fs::hard_link(&staged.staging_path, &staged.final_path).await {
            let filename = staged.filename.clone();
            self.discard(staged).await;
            return Err(match e.kind() {
                std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(filename),
                _ => e.into(),
            });
        }

        if let Err(e) = fs::remove_file(&staged.staging_path).await {
            warn!(
                "Committed {} but failed to remove staging file: {}",
                staged.final_path.display(),
                e
            );
        }

        debug!("Committed upload: {}", staged.final_path.display());
        Ok(staged.final_path)
    }

    /// Remove a staged file that will not be committed
    pub async fn discard(&self, staged: StagedFile) {
        if let Err(e) = fs::remove_file(&staged.staging_path).await {
            warn!(
                "Failed to remove staged upload {}: {}",
                staged.staging_path.display(),
                e
            );
        }
    }

    fn display_dir(&self) -> String {
        self.upload_dir.display().to_string()
    }
}
