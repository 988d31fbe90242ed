use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::scan_results::models::{CreateScanResult, ScanResult};

/// Request DTO for recording a scan result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanResultDto {
    /// When the scan happened; defaults to the time the record is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Human-readable label for what was scanned
    #[schema(example = "plastic bottle")]
    pub item_description: String,
    /// Raw analysis payload, stored as-is
    #[schema(value_type = Object, example = json!({"label": "plastic", "confidence": 0.9}))]
    pub ai_response: serde_json::Value,
    /// Filename or path of the uploaded image, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
    /// Free-form key-value data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

/// Persisted scan result as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultDto {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub item_description: String,
    #[schema(value_type = Object)]
    pub ai_response: serde_json::Value,
    pub image_reference: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CreateScanResultDto> for CreateScanResult {
    fn from(dto: CreateScanResultDto) -> Self {
        Self {
            timestamp: dto.timestamp,
            item_description: dto.item_description,
            ai_response: dto.ai_response,
            image_reference: dto.image_reference,
            metadata: dto.metadata,
        }
    }
}

impl From<ScanResult> for ScanResultDto {
    fn from(r: ScanResult) -> Self {
        Self {
            id: r.id,
            timestamp: r.timestamp,
            item_description: r.item_description,
            ai_response: r.ai_response,
            image_reference: r.image_reference,
            metadata: r.metadata,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
