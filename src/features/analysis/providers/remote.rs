use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{AnalysisImage, AnalysisProvider};
use crate::core::error::{AppError, Result};
use crate::features::analysis::dtos::AnalysisReport;
use crate::shared::constants::ANALYSIS_IMAGE_FIELD;

/// Provider forwarding images to an external inference service
///
/// The service receives the image as multipart field `image` and answers
/// with an `AnalysisReport` JSON body.
pub struct RemoteAnalysisProvider {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RemoteAnalysisProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for RemoteAnalysisProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn analyze(&self, image: AnalysisImage) -> Result<AnalysisReport> {
        let part = Part::bytes(image.data)
            .file_name(image.file_name.unwrap_or_else(|| "image".to_string()))
            .mime_str(&image.content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part(ANALYSIS_IMAGE_FIELD, part);

        tracing::debug!("Forwarding image to inference service: {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Inference service request failed: {}", e);
                AppError::ExternalServiceError(format!("Inference service unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Inference service error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Inference service error: HTTP {}",
                status
            )));
        }

        response.json::<AnalysisReport>().await.map_err(|e| {
            tracing::error!("Failed to parse inference response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse inference response: {}", e))
        })
    }
}
