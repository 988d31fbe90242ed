//! Storage module for uploaded image files
//!
//! Provides a local-disk store that stages uploads next to their final
//! location and only moves them into place once their metadata is recorded.

mod local_disk;

pub use local_disk::{generate_filename, LocalDiskStorage, StagedFile, StorageError};
