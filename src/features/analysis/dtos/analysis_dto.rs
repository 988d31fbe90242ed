use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One candidate label with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabelConfidence {
    #[schema(example = "Item A")]
    pub label: String,
    /// Confidence between 0 and 1
    #[schema(example = 0.92)]
    pub confidence: f64,
}

/// Categorized analysis of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[schema(example = "Object")]
    pub main_category: String,
    /// Confidence between 0 and 1
    #[schema(example = 0.92)]
    pub confidence: f64,
    pub details: Vec<LabelConfidence>,
}

/// Analyze image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeImageDto {
    /// The image to analyze
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Response DTO for the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponseDto {
    /// The report serialized as JSON text; clients treat it as opaque
    pub analysis: String,
    /// The same report in structured form
    pub report: AnalysisReport,
}
