use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::analysis::handlers::analyze_image;
use crate::features::analysis::services::AnalysisService;

/// Create routes for the analysis feature
pub fn routes(service: Arc<AnalysisService>) -> Router {
    let body_limit = service.max_image_size() + 1024 * 1024;

    Router::new()
        .route(
            "/analyze",
            post(analyze_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analysis::dtos::{AnalysisReport, AnalyzeResponseDto};
    use crate::features::analysis::providers::MockAnalysisProvider;
    use crate::shared::test_helpers::test_server;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use std::time::Duration;

    fn server() -> TestServer {
        let provider = Arc::new(MockAnalysisProvider::new(Duration::ZERO));
        let service = Arc::new(AnalysisService::new(provider, 1024));
        test_server(routes(service))
    }

    fn jpeg(bytes: &[u8]) -> MultipartForm {
        let part = Part::bytes(bytes.to_vec())
            .file_name("upload.jpg")
            .mime_type("image/jpeg");
        MultipartForm::new().add_part("image", part)
    }

    #[tokio::test]
    async fn test_analyze_returns_mock_report() {
        let server = server();

        let response = server.post("/analyze").multipart(jpeg(b"pixels")).await;

        response.assert_status_ok();
        let body: ApiResponse<AnalyzeResponseDto> = response.json();
        let data = body.data.unwrap();
        assert_eq!(data.report, MockAnalysisProvider::fixed_report());
        let parsed: AnalysisReport = serde_json::from_str(&data.analysis).unwrap();
        assert_eq!(parsed, data.report);
    }

    #[tokio::test]
    async fn test_analyze_without_image_is_rejected() {
        let server = server();

        let form = MultipartForm::new().add_text("note", "no image here");
        let response = server.post("/analyze").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_image() {
        let server = server();

        let response = server.post("/analyze").multipart(jpeg(&[7u8; 2048])).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_rejects_second_image() {
        let server = server();

        let second = Part::bytes(b"other".to_vec())
            .file_name("second.jpg")
            .mime_type("image/jpeg");
        let form = jpeg(b"pixels").add_part("image", second);
        let response = server.post("/analyze").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("Only one"));
    }
}
