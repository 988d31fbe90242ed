use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::analysis::dtos::{AnalyzeImageDto, AnalyzeResponseDto};
use crate::features::analysis::providers::AnalysisImage;
use crate::features::analysis::services::AnalysisService;
use crate::shared::constants::{
    is_image_mime_type_allowed, ALLOWED_IMAGE_MIME_TYPES, ANALYSIS_IMAGE_FIELD,
};
use crate::shared::types::ApiResponse;

/// Analyze an image
///
/// Accepts multipart/form-data with a single `image` field. Nothing is stored.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body(
        content = AnalyzeImageDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Analysis report", body = ApiResponse<AnalyzeResponseDto>),
        (status = 400, description = "Missing or invalid image"),
        (status = 502, description = "Inference service failed")
    )
)]
pub async fn analyze_image(
    State(service): State<Arc<AnalysisService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AnalyzeResponseDto>>, AppError> {
    let mut image: Option<AnalysisImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some(ANALYSIS_IMAGE_FIELD) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        if image.is_some() {
            return Err(AppError::Validation(format!(
                "Only one '{}' file is accepted per request",
                ANALYSIS_IMAGE_FIELD
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

        let file_name = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read image data: {}", e))
        })?;

        image = Some(AnalysisImage {
            data: data.to_vec(),
            content_type,
            file_name,
        });
    }

    let image = image
        .ok_or_else(|| AppError::Validation(format!("{} is required", ANALYSIS_IMAGE_FIELD)))?;

    let response = service.analyze(image).await?;

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
