/// Base URLs the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Serves `/upload` and `/api/scan-results`
    pub scan_api_base_url: String,
    /// Serves `/analyze`
    pub analysis_api_base_url: String,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";

    /// One base URL for every endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            scan_api_base_url: base_url.clone(),
            analysis_api_base_url: base_url,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }
}
