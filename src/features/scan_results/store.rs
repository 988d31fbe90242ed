use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::scan_results::models::{CreateScanResult, ScanResult};

/// Append-only log of analysis outcomes
#[async_trait]
pub trait ScanResultStore: Send + Sync {
    /// Persist a new scan result, assigning id and timestamps
    async fn create(&self, record: CreateScanResult) -> Result<ScanResult>;

    /// Every scan result in insertion order
    async fn list_all(&self) -> Result<Vec<ScanResult>>;
}

fn validate_record(record: &CreateScanResult) -> Result<()> {
    record
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// PostgreSQL-backed scan result store
pub struct PgScanResultStore {
    pool: PgPool,
}

impl PgScanResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanResultStore for PgScanResultStore {
    async fn create(&self, record: CreateScanResult) -> Result<ScanResult> {
        validate_record(&record)?;

        let result = sqlx::query_as::<_, ScanResult>(
            r#"
            INSERT INTO scan_results (id, timestamp, item_description, ai_response, image_reference, metadata)
            VALUES ($1, COALESCE($2, NOW()), $3, $4, $5, $6)
            RETURNING id, timestamp, item_description, ai_response, image_reference, metadata, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(record.timestamp)
        .bind(&record.item_description)
        .bind(&record.ai_response)
        .bind(&record.image_reference)
        .bind(record.metadata.unwrap_or_else(|| json!({})))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create scan result: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created scan result: {} ({})",
            result.id,
            result.item_description
        );

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<ScanResult>> {
        let results = sqlx::query_as::<_, ScanResult>(
            r#"
            SELECT id, timestamp, item_description, ai_response, image_reference, metadata, created_at, updated_at
            FROM scan_results
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}

/// Process-local scan result store
#[derive(Default)]
pub struct InMemoryScanResultStore {
    records: RwLock<Vec<ScanResult>>,
}

impl InMemoryScanResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScanResultStore for InMemoryScanResultStore {
    async fn create(&self, record: CreateScanResult) -> Result<ScanResult> {
        validate_record(&record)?;

        let now = Utc::now();
        let result = ScanResult {
            id: Uuid::now_v7(),
            timestamp: record.timestamp.unwrap_or(now),
            item_description: record.item_description,
            ai_response: record.ai_response,
            image_reference: record.image_reference,
            metadata: record.metadata.unwrap_or_else(|| json!({})),
            created_at: now,
            updated_at: now,
        };

        self.records.write().await.push(result.clone());
        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<ScanResult>> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Words;
    use fake::Fake;

    fn record(description: &str, ai_response: serde_json::Value) -> CreateScanResult {
        CreateScanResult {
            timestamp: None,
            item_description: description.to_string(),
            ai_response,
            image_reference: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_defaults() {
        let store = InMemoryScanResultStore::new();
        let before = Utc::now();

        let saved = store
            .create(record("plastic bottle", json!({"label": "plastic", "confidence": 0.9})))
            .await
            .unwrap();

        assert_eq!(saved.item_description, "plastic bottle");
        assert_eq!(saved.metadata, json!({}));
        assert!(saved.timestamp >= before);
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(saved.image_reference, None);
    }

    #[tokio::test]
    async fn test_client_timestamp_is_kept() {
        let store = InMemoryScanResultStore::new();
        let when = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let mut input = record("glass jar", json!({"label": "glass"}));
        input.timestamp = Some(when);
        let saved = store.create(input).await.unwrap();

        assert_eq!(saved.timestamp, when);
    }

    #[tokio::test]
    async fn test_blank_description_is_rejected() {
        let store = InMemoryScanResultStore::new();
        let result = store.create(record("  ", json!({"label": "x"}))).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_ai_response_is_rejected() {
        let store = InMemoryScanResultStore::new();

        for payload in [json!(null), json!("plastic"), json!([0.9])] {
            let result = store.create(record("bottle", payload)).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_non_object_metadata_is_rejected() {
        let store = InMemoryScanResultStore::new();
        let mut input = record("bottle", json!({"label": "plastic"}));
        input.metadata = Some(json!(42));

        let result = store.create(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_all_is_insertion_ordered_and_repeatable() {
        let store = InMemoryScanResultStore::new();
        let mut descriptions = Vec::new();
        for _ in 0..5 {
            let words: Vec<String> = Words(1..4).fake();
            let description = format!("item {}", words.join(" "));
            store
                .create(record(&description, json!({"label": "any"})))
                .await
                .unwrap();
            descriptions.push(description);
        }

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();

        assert_eq!(first, second);
        let listed: Vec<String> = first.into_iter().map(|r| r.item_description).collect();
        assert_eq!(listed, descriptions);
    }
}
