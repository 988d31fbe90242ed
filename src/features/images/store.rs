use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::images::models::{CreateImageMetadata, ImageMetadata};

/// Persistence for upload records
///
/// Records are created once and never updated; `filename` is unique.
#[async_trait]
pub trait ImageMetadataStore: Send + Sync {
    /// Persist a new record, assigning its id and upload date
    async fn create(&self, record: CreateImageMetadata) -> Result<ImageMetadata>;

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ImageMetadata>>;

    /// Remove a record whose file could not be committed
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Validate a new record and return its recyclable flag
fn validate_record(record: &CreateImageMetadata) -> Result<bool> {
    record
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    record
        .is_recyclable
        .ok_or_else(|| AppError::Validation("isRecyclable is required".to_string()))
}

fn duplicate_filename(filename: &str) -> AppError {
    AppError::Conflict(format!("An image named '{}' already exists", filename))
}

/// PostgreSQL-backed image metadata store
pub struct PgImageMetadataStore {
    pool: PgPool,
}

impl PgImageMetadataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageMetadataStore for PgImageMetadataStore {
    async fn create(&self, record: CreateImageMetadata) -> Result<ImageMetadata> {
        let is_recyclable = validate_record(&record)?;

        let metadata = sqlx::query_as::<_, ImageMetadata>(
            r#"
            INSERT INTO image_metadata (id, filename, image_path, is_recyclable)
            VALUES ($1, $2, $3, $4)
            RETURNING id, filename, image_path, is_recyclable, upload_date
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&record.filename)
        .bind(&record.image_path)
        .bind(is_recyclable)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                duplicate_filename(&record.filename)
            }
            e => {
                tracing::error!("Failed to create image metadata: {:?}", e);
                AppError::Database(e)
            }
        })?;

        info!(
            "Image metadata saved: id={}, filename={}, recyclable={}",
            metadata.id, metadata.filename, metadata.is_recyclable
        );

        Ok(metadata)
    }

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ImageMetadata>> {
        let metadata = sqlx::query_as::<_, ImageMetadata>(
            r#"
            SELECT id, filename, image_path, is_recyclable, upload_date
            FROM image_metadata
            WHERE filename = $1
            "#,
        )
        .bind(filename)
        .fetch_optional(&self.pool)
        .await?;

        Ok(metadata)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM image_metadata WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Image metadata removed: id={}", id);
        Ok(())
    }
}

/// Process-local image metadata store
#[derive(Default)]
pub struct InMemoryImageMetadataStore {
    records: RwLock<Vec<ImageMetadata>>,
}

impl InMemoryImageMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ImageMetadataStore for InMemoryImageMetadataStore {
    async fn create(&self, record: CreateImageMetadata) -> Result<ImageMetadata> {
        let is_recyclable = validate_record(&record)?;

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.filename == record.filename) {
            return Err(duplicate_filename(&record.filename));
        }

        let metadata = ImageMetadata {
            id: Uuid::now_v7(),
            filename: record.filename,
            image_path: record.image_path,
            is_recyclable,
            upload_date: Utc::now(),
        };
        records.push(metadata.clone());

        Ok(metadata)
    }

    async fn find_by_filename(&self, filename: &str) -> Result<Option<ImageMetadata>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.filename == filename).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.records.write().await.retain(|r| r.id != id);
        Ok(())
    }
}
