//! Analysis providers
//!
//! Analysis is always treated as a potentially remote, fallible call; the
//! mock provider only differs in where its answer comes from.

mod mock;
mod remote;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::analysis::dtos::AnalysisReport;

pub use mock::MockAnalysisProvider;
pub use remote::RemoteAnalysisProvider;

/// An image submitted for analysis
#[derive(Debug, Clone)]
pub struct AnalysisImage {
    pub data: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

/// Capability that turns an image into a categorized report
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn analyze(&self, image: AnalysisImage) -> Result<AnalysisReport>;
}
