use super::envelope::decode_envelope;
use super::{endpoint, ClientError};
use crate::features::scan_results::dtos::{CreateScanResultDto, ScanResultDto};

/// Records finished scans and reads the scan history
pub struct ScanHistoryClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ScanHistoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: endpoint(base_url, "/api/scan-results"),
        }
    }

    /// Persist one scan result and return the stored record
    pub async fn submit(&self, scan: &CreateScanResultDto) -> Result<ScanResultDto, ClientError> {
        let result = self.post_scan(scan).await;

        match &result {
            Ok(saved) => tracing::info!("Saved scan result {}", saved.id),
            Err(e) => tracing::error!("Error saving scan result: {}", e),
        }
        result
    }

    /// Every recorded scan result in store order
    pub async fn fetch_history(&self) -> Result<Vec<ScanResultDto>, ClientError> {
        let result = self.get_history().await;

        if let Err(e) = &result {
            tracing::error!("Error fetching scan history: {}", e);
        }
        result
    }

    async fn post_scan(&self, scan: &CreateScanResultDto) -> Result<ScanResultDto, ClientError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(scan)
            .send()
            .await?;
        decode_envelope(response).await
    }

    async fn get_history(&self) -> Result<Vec<ScanResultDto>, ClientError> {
        let response = self.http_client.get(&self.endpoint).send().await?;
        decode_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scan_results::ScanResultStore;
    use crate::shared::test_helpers::{spawn_app, unreachable_base_url};
    use serde_json::json;

    fn scan(description: &str) -> CreateScanResultDto {
        CreateScanResultDto {
            timestamp: None,
            item_description: description.to_string(),
            ai_response: json!({"label": "plastic", "confidence": 0.9}),
            image_reference: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_submit_then_fetch_history() {
        let (base_url, app) = spawn_app().await;
        let client = ScanHistoryClient::new(&base_url);

        let saved = client.submit(&scan("plastic bottle")).await.unwrap();

        assert_eq!(saved.item_description, "plastic bottle");
        assert_eq!(saved.ai_response, json!({"label": "plastic", "confidence": 0.9}));
        assert_eq!(saved.metadata, json!({}));

        let history = client.fetch_history().await.unwrap();
        assert_eq!(history, vec![saved]);
        assert_eq!(app.scan_results.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_history_is_repeatable() {
        let (base_url, _app) = spawn_app().await;
        let client = ScanHistoryClient::new(&base_url);
        for description in ["glass jar", "tin can"] {
            client.submit(&scan(description)).await.unwrap();
        }

        let first = client.fetch_history().await.unwrap();
        let second = client.fetch_history().await.unwrap();

        assert_eq!(first, second);
        let descriptions: Vec<&str> = first.iter().map(|r| r.item_description.as_str()).collect();
        assert_eq!(descriptions, vec!["glass jar", "tin can"]);
    }

    #[tokio::test]
    async fn test_fetch_history_when_empty() {
        let (base_url, _app) = spawn_app().await;
        let client = ScanHistoryClient::new(&base_url);

        assert!(client.fetch_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_validation_error_propagates() {
        let (base_url, app) = spawn_app().await;
        let client = ScanHistoryClient::new(&base_url);

        let mut invalid = scan("bottle");
        invalid.ai_response = json!("not an object");
        let err = client.submit(&invalid).await.unwrap_err();

        assert!(matches!(err, ClientError::Server { status: 400, .. }));
        assert!(app.scan_results.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_propagates_transport_error() {
        let client = ScanHistoryClient::new(&unreachable_base_url().await);

        let err = client.submit(&scan("bottle")).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));

        let err = client.fetch_history().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
