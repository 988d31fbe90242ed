//! HTTP client for the scan service: analysis, uploads and scan history.

mod analysis_client;
mod config;
mod envelope;
mod error;
mod scan_history_client;
mod upload_client;

pub use analysis_client::AnalysisClient;
pub use config::ClientConfig;
pub use error::{ClientError, ANALYSIS_FAILED_MESSAGE};
pub use scan_history_client::ScanHistoryClient;
pub use upload_client::UploadClient;

use std::path::PathBuf;

/// Resolve a local image reference, either a plain path or a `file://` URI
pub(crate) fn local_image_path(reference: &str) -> PathBuf {
    PathBuf::from(reference.strip_prefix("file://").unwrap_or(reference))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_image_path_accepts_file_uri() {
        assert_eq!(
            local_image_path("file:///tmp/photo.jpg"),
            PathBuf::from("/tmp/photo.jpg")
        );
        assert_eq!(local_image_path("photo.jpg"), PathBuf::from("photo.jpg"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://localhost:5000/", "/analyze"),
            "http://localhost:5000/analyze"
        );
    }
}
