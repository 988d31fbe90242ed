use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::scan_results::handlers::{create_scan_result, list_scan_results};
use crate::features::scan_results::services::ScanResultService;

/// Create routes for the scan results feature
pub fn routes(service: Arc<ScanResultService>) -> Router {
    Router::new()
        .route(
            "/api/scan-results",
            get(list_scan_results).post(create_scan_result),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scan_results::dtos::ScanResultDto;
    use crate::features::scan_results::store::InMemoryScanResultStore;
    use crate::shared::test_helpers::test_server;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let service = Arc::new(ScanResultService::new(Arc::new(
            InMemoryScanResultStore::new(),
        )));
        test_server(routes(service))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let server = server();

        let response = server
            .post("/api/scan-results")
            .json(&json!({
                "itemDescription": "plastic bottle",
                "aiResponse": {"label": "plastic", "confidence": 0.9}
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: ApiResponse<ScanResultDto> = response.json();
        let created = created.data.unwrap();
        assert_eq!(created.item_description, "plastic bottle");
        assert_eq!(created.ai_response, json!({"label": "plastic", "confidence": 0.9}));
        assert_eq!(created.metadata, json!({}));

        let response = server.get("/api/scan-results").await;
        response.assert_status_ok();
        let listed: ApiResponse<Vec<ScanResultDto>> = response.json();
        assert_eq!(listed.meta.unwrap().total, 1);
        assert_eq!(listed.data.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_list_empty_history() {
        let server = server();

        let response = server.get("/api/scan-results").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_missing_ai_response_is_rejected() {
        let server = server();

        let response = server
            .post("/api/scan-results")
            .json(&json!({"itemDescription": "plastic bottle"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_blank_description_is_rejected() {
        let server = server();

        let response = server
            .post("/api/scan-results")
            .json(&json!({"itemDescription": "", "aiResponse": {"label": "x"}}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/scan-results")
            .await
            .assert_json(&json!({
                "success": true,
                "data": [],
                "message": null,
                "meta": {"total": 0},
                "errors": null
            }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let server = server();

        let response = server
            .post("/api/scan-results")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
