use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::images::dtos::{ImageMetadataDto, UploadImageDto};
use crate::features::images::services::{ImageUpload, ImageUploadService};
use crate::shared::constants::{
    is_image_mime_type_allowed, ALLOWED_IMAGE_MIME_TYPES, RECYCLABLE_FIELD,
};
use crate::shared::types::ApiResponse;
use crate::shared::validation::parse_form_bool;

/// Upload an image
///
/// Accepts multipart/form-data with:
/// - `imageFile`: the image binary (required)
/// - `isRecyclable`: "true" or "false" (required)
#[utoipa::path(
    post,
    path = "/upload",
    tag = "images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image upload form with the recyclable flag",
    ),
    responses(
        (status = 201, description = "Image stored", body = ApiResponse<ImageMetadataDto>),
        (status = 400, description = "Missing or empty image, image over the upload size limit, missing or invalid isRecyclable"),
        (status = 409, description = "Generated filename already taken"),
        (status = 413, description = "Request body exceeds the body limit"),
        (status = 500, description = "File could not be written")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<ImageUploadService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageMetadataDto>>), AppError> {
    let field_name = service.config().field_name.clone();

    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut recyclable_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == field_name {
            if file_data.is_some() {
                return Err(AppError::Validation(format!(
                    "Only one '{}' file is accepted per request",
                    field_name
                )));
            }

            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            if !is_image_mime_type_allowed(&content_type) {
                return Err(AppError::Validation(format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    content_type,
                    ALLOWED_IMAGE_MIME_TYPES.join(", ")
                )));
            }

            file_name = field.file_name().map(|s| s.to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;
            file_data = Some(data.to_vec());
        } else if name == RECYCLABLE_FIELD {
            let text = field.text().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read {} field: {}", RECYCLABLE_FIELD, e))
            })?;
            recyclable_raw = Some(text);
        } else {
            debug!("Ignoring unknown field: {}", name);
        }
    }

    // Validate everything before anything touches the disk
    let file_data = file_data
        .ok_or_else(|| AppError::Validation(format!("{} is required", field_name)))?;
    let recyclable_raw = recyclable_raw
        .ok_or_else(|| AppError::Validation(format!("{} is required", RECYCLABLE_FIELD)))?;
    let is_recyclable = parse_form_bool(&recyclable_raw).ok_or_else(|| {
        AppError::Validation(format!(
            "{} must be 'true' or 'false', got '{}'",
            RECYCLABLE_FIELD, recyclable_raw
        ))
    })?;

    let metadata = service
        .receive(ImageUpload {
            data: file_data,
            is_recyclable,
            original_filename: file_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(metadata.into()), None, None)),
    ))
}
