use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::core::config::{AppConfig, SwaggerConfig, UploadConfig};
use crate::core::router::{build_router, AppServices};
use crate::features::analysis::{AnalysisService, MockAnalysisProvider};
use crate::features::images::{ImageUploadService, InMemoryImageMetadataStore};
use crate::features::scan_results::{InMemoryScanResultStore, ScanResultService};
use crate::shared::constants::RECYCLABLE_FIELD;

pub fn test_server(router: Router) -> TestServer {
    TestServer::new(router).expect("failed to build test server")
}

/// Multipart body for `/upload`, optionally carrying the recyclable flag
pub fn image_form(filename: &str, bytes: Vec<u8>, is_recyclable: Option<&str>) -> MultipartForm {
    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_type("image/jpeg");
    let form = MultipartForm::new().add_part(UploadConfig::DEFAULT_FIELD_NAME, part);

    match is_recyclable {
        Some(flag) => form.add_text(RECYCLABLE_FIELD, flag.to_string()),
        None => form,
    }
}

/// Serve a router on an ephemeral local port and return its base URL
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);

    format!("http://{}", addr)
}

/// In-memory state behind a test application
pub struct TestApp {
    pub images: Arc<InMemoryImageMetadataStore>,
    pub scan_results: Arc<InMemoryScanResultStore>,
    pub upload_dir: TempDir,
}

/// Full application router over in-memory stores and a zero-delay mock analyzer
pub fn test_app_router() -> (Router, TestApp) {
    let upload_dir = tempfile::tempdir().expect("failed to create upload dir");
    let images = Arc::new(InMemoryImageMetadataStore::new());
    let scan_results = Arc::new(InMemoryScanResultStore::new());

    let upload_config = UploadConfig::for_dir(upload_dir.path());
    let max_image_size = upload_config.max_file_size;
    let services = AppServices {
        images: Arc::new(ImageUploadService::new(upload_config, images.clone())),
        scan_results: Arc::new(ScanResultService::new(scan_results.clone())),
        analysis: Arc::new(AnalysisService::new(
            Arc::new(MockAnalysisProvider::new(Duration::ZERO)),
            max_image_size,
        )),
    };

    let app = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origins: vec!["*".to_string()],
        max_request_body_size: 2 * 1024 * 1024,
    };
    let swagger = SwaggerConfig {
        username: None,
        password: None,
        title: "Recycle Scan API".to_string(),
        version: "test".to_string(),
        description: "test".to_string(),
    };

    let router = build_router(services, &app, &swagger);
    (
        router,
        TestApp {
            images,
            scan_results,
            upload_dir,
        },
    )
}

/// Run the full application on a local port for HTTP client tests
pub async fn spawn_app() -> (String, TestApp) {
    let (router, app) = test_app_router();
    (spawn_router(router).await, app)
}
