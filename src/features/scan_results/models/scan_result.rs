use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::{validate_json_object, validate_not_blank};

/// Database model for one completed analysis
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScanResult {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub item_description: String,
    /// Opaque analysis payload, always a JSON object
    pub ai_response: serde_json::Value,
    /// Weak link to an image filename or path; never checked
    pub image_reference: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new scan result
#[derive(Debug, Clone, Validate)]
pub struct CreateScanResult {
    /// Defaults to the creation time when absent
    pub timestamp: Option<DateTime<Utc>>,
    #[validate(custom(function = validate_not_blank, message = "itemDescription is required"))]
    pub item_description: String,
    #[validate(custom(function = validate_json_object, message = "aiResponse must be a JSON object"))]
    pub ai_response: serde_json::Value,
    pub image_reference: Option<String>,
    #[validate(custom(function = validate_json_object, message = "metadata must be a JSON object"))]
    pub metadata: Option<serde_json::Value>,
}
