use thiserror::Error;

/// Message shown to the user whenever analysis fails, whatever the cause
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze image. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to read image '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    AnalysisFailed,
}
