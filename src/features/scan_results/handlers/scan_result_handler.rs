use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::scan_results::dtos::{CreateScanResultDto, ScanResultDto};
use crate::features::scan_results::services::ScanResultService;
use crate::shared::types::{ApiResponse, Meta};

/// Record a scan result
#[utoipa::path(
    post,
    path = "/api/scan-results",
    tag = "scan-results",
    request_body = CreateScanResultDto,
    responses(
        (status = 201, description = "Scan result recorded", body = ApiResponse<ScanResultDto>),
        (status = 400, description = "Missing itemDescription or aiResponse, or malformed body")
    )
)]
pub async fn create_scan_result(
    State(service): State<Arc<ScanResultService>>,
    AppJson(dto): AppJson<CreateScanResultDto>,
) -> Result<(StatusCode, Json<ApiResponse<ScanResultDto>>), AppError> {
    let result = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(result), None, None)),
    ))
}

/// List every scan result, oldest first
#[utoipa::path(
    get,
    path = "/api/scan-results",
    tag = "scan-results",
    responses(
        (status = 200, description = "Full scan history", body = ApiResponse<Vec<ScanResultDto>>)
    )
)]
pub async fn list_scan_results(
    State(service): State<Arc<ScanResultService>>,
) -> Result<Json<ApiResponse<Vec<ScanResultDto>>>, AppError> {
    let results = service.list().await?;
    let total = results.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(results),
        None,
        Some(Meta { total }),
    )))
}
