use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::envelope::decode_envelope;
use super::{endpoint, local_image_path, ClientError};
use crate::shared::constants::{
    ANALYSIS_IMAGE_FIELD, ANALYSIS_UPLOAD_CONTENT_TYPE, ANALYSIS_UPLOAD_FILENAME,
};

#[derive(Debug, Deserialize)]
struct AnalysisData {
    analysis: String,
}

/// Submits captured images to the analysis endpoint
pub struct AnalysisClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint(base_url, "/analyze"),
        }
    }

    /// Analyze a local image and return the analysis text untouched
    ///
    /// Every failure is logged and reported as `ClientError::AnalysisFailed`.
    pub async fn analyze(&self, image_reference: &str) -> Result<String, ClientError> {
        self.send(image_reference).await.map_err(|e| {
            tracing::error!("Error analyzing image '{}': {}", image_reference, e);
            ClientError::AnalysisFailed
        })
    }

    async fn send(&self, image_reference: &str) -> Result<String, ClientError> {
        let path = local_image_path(image_reference);
        let data = tokio::fs::read(&path).await.map_err(|source| ClientError::Io {
            path: path.display().to_string(),
            source,
        })?;

        // The endpoint expects a JPEG part whatever the source format
        let part = Part::bytes(data)
            .file_name(ANALYSIS_UPLOAD_FILENAME)
            .mime_str(ANALYSIS_UPLOAD_CONTENT_TYPE)?;
        let form = Form::new().part(ANALYSIS_IMAGE_FIELD, part);

        tracing::debug!("Submitting image for analysis: {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let data: AnalysisData = decode_envelope(response).await?;
        Ok(data.analysis)
    }
}
