use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::images::models::ImageMetadata;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to store
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image_file: String,
    /// Whether the pictured item is recyclable: "true" or "false"
    #[schema(example = "false")]
    pub is_recyclable: String,
}

/// Persisted image metadata as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadataDto {
    /// Unique identifier of the record
    pub id: Uuid,
    /// Generated name of the stored file
    #[schema(example = "imageFile-1718000000000-123456789")]
    pub filename: String,
    /// Path of the stored file
    #[schema(example = "uploads/imageFile-1718000000000-123456789")]
    pub image_path: String,
    /// Recyclable classification supplied with the upload
    pub is_recyclable: bool,
    /// Timestamp when the image was stored
    pub upload_date: DateTime<Utc>,
}

impl From<ImageMetadata> for ImageMetadataDto {
    fn from(m: ImageMetadata) -> Self {
        Self {
            id: m.id,
            filename: m.filename,
            image_path: m.image_path,
            is_recyclable: m.is_recyclable,
            upload_date: m.upload_date,
        }
    }
}
