use utoipa::{Modify, OpenApi};

use crate::features::analysis::{dtos as analysis_dtos, handlers as analysis_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::scan_results::{dtos as scan_results_dtos, handlers as scan_results_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Images
        images_handlers::upload_image,
        // Scan results
        scan_results_handlers::create_scan_result,
        scan_results_handlers::list_scan_results,
        // Analysis
        analysis_handlers::analyze_image,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Images
            images_dtos::UploadImageDto,
            images_dtos::ImageMetadataDto,
            ApiResponse<images_dtos::ImageMetadataDto>,
            // Scan results
            scan_results_dtos::CreateScanResultDto,
            scan_results_dtos::ScanResultDto,
            ApiResponse<scan_results_dtos::ScanResultDto>,
            ApiResponse<Vec<scan_results_dtos::ScanResultDto>>,
            // Analysis
            analysis_dtos::AnalyzeImageDto,
            analysis_dtos::LabelConfidence,
            analysis_dtos::AnalysisReport,
            analysis_dtos::AnalyzeResponseDto,
            ApiResponse<analysis_dtos::AnalyzeResponseDto>,
        )
    ),
    tags(
        (name = "images", description = "Image upload with recyclable classification"),
        (name = "scan-results", description = "Scan history"),
        (name = "analysis", description = "Image analysis"),
    ),
    info(
        title = "Recycle Scan API",
        version = "0.1.0",
        description = "API documentation for Recycle Scan",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
