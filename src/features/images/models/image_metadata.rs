use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::{validate_not_blank, STORED_FILENAME_REGEX};

/// Database model for a stored upload
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ImageMetadata {
    pub id: Uuid,
    pub filename: String,
    pub image_path: String,
    pub is_recyclable: bool,
    pub upload_date: DateTime<Utc>,
}

/// Data for creating a new image metadata record
#[derive(Debug, Clone, Validate)]
pub struct CreateImageMetadata {
    #[validate(
        length(min = 1, message = "filename is required"),
        regex(path = *STORED_FILENAME_REGEX, message = "filename must be a bare file name")
    )]
    pub filename: String,
    #[validate(custom(function = validate_not_blank, message = "imagePath is required"))]
    pub image_path: String,
    #[validate(required(message = "isRecyclable is required"))]
    pub is_recyclable: Option<bool>,
}
