use reqwest::multipart::{Form, Part};
use std::path::Path;

use super::envelope::decode_envelope;
use super::{endpoint, local_image_path, ClientError};
use crate::core::config::UploadConfig;
use crate::features::images::dtos::ImageMetadataDto;
use crate::shared::constants::RECYCLABLE_FIELD;

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Uploads labelled images to the image store
pub struct UploadClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint(base_url, "/upload"),
        }
    }

    pub async fn upload(
        &self,
        image_reference: &str,
        is_recyclable: bool,
    ) -> Result<ImageMetadataDto, ClientError> {
        let result = self.send(image_reference, is_recyclable).await;

        match &result {
            Ok(metadata) => tracing::info!("Uploaded image stored as {}", metadata.filename),
            Err(e) => tracing::error!("Error uploading image '{}': {}", image_reference, e),
        }
        result
    }

    async fn send(
        &self,
        image_reference: &str,
        is_recyclable: bool,
    ) -> Result<ImageMetadataDto, ClientError> {
        let path = local_image_path(image_reference);
        let data = tokio::fs::read(&path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type_for(&path))?;
        let form = Form::new()
            .part(UploadConfig::DEFAULT_FIELD_NAME, part)
            .text(RECYCLABLE_FIELD, is_recyclable.to_string());

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        decode_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::images::ImageMetadataStore;
    use crate::shared::test_helpers::{spawn_app, unreachable_base_url};

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_upload_stores_file_and_record() {
        let (base_url, app) = spawn_app().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bottle.png");
        std::fs::write(&path, b"png bytes").unwrap();

        let client = UploadClient::new(&base_url);
        let metadata = client.upload(path.to_str().unwrap(), true).await.unwrap();

        assert!(metadata.is_recyclable);
        assert!(metadata.filename.starts_with("imageFile-"));
        let stored = std::fs::read(app.upload_dir.path().join(&metadata.filename)).unwrap();
        assert_eq!(stored, b"png bytes");
        let record = app.images.find_by_filename(&metadata.filename).await.unwrap();
        assert_eq!(record.map(|r| r.is_recyclable), Some(true));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let (base_url, app) = spawn_app().await;

        let client = UploadClient::new(&base_url);
        let err = client.upload("/nope/missing.jpg", false).await.unwrap_err();

        assert!(matches!(err, ClientError::Io { .. }));
        assert!(app.images.is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_unreachable_is_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rock.jpg");
        std::fs::write(&path, b"rock").unwrap();

        let client = UploadClient::new(&unreachable_base_url().await);
        let err = client.upload(path.to_str().unwrap(), false).await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
    }
}
