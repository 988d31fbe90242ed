use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::analysis::dtos::AnalyzeResponseDto;
use crate::features::analysis::providers::{AnalysisImage, AnalysisProvider};

/// Service running images through the configured analysis provider
pub struct AnalysisService {
    provider: Arc<dyn AnalysisProvider>,
    max_image_size: usize,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn AnalysisProvider>, max_image_size: usize) -> Self {
        Self {
            provider,
            max_image_size,
        }
    }

    pub fn max_image_size(&self) -> usize {
        self.max_image_size
    }

    /// Analyze one image; nothing is persisted
    pub async fn analyze(&self, image: AnalysisImage) -> Result<AnalyzeResponseDto> {
        if image.data.is_empty() {
            return Err(AppError::Validation("image must not be empty".to_string()));
        }
        if image.data.len() > self.max_image_size {
            return Err(AppError::Validation(format!(
                "Image too large. Maximum size is {} bytes",
                self.max_image_size
            )));
        }

        let size = image.data.len();
        let report = self.provider.analyze(image).await?;

        tracing::info!(
            "Analysis complete: provider={}, size={}, category={}, confidence={:.2}",
            self.provider.name(),
            size,
            report.main_category,
            report.confidence
        );

        let analysis = serde_json::to_string(&report)
            .map_err(|e| AppError::Internal(format!("Failed to serialize analysis: {}", e)))?;

        Ok(AnalyzeResponseDto { analysis, report })
    }
}
