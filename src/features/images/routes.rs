use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::images::handlers::upload_image;
use crate::features::images::services::ImageUploadService;

/// Create routes for the images feature
pub fn routes(service: Arc<ImageUploadService>) -> Router {
    // Allow body size up to the file limit + buffer for multipart overhead
    let body_limit = service.config().max_file_size + 1024 * 1024;

    Router::new()
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(service)
}
