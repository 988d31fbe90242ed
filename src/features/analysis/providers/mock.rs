use async_trait::async_trait;
use std::time::Duration;

use super::{AnalysisImage, AnalysisProvider};
use crate::core::error::Result;
use crate::features::analysis::dtos::{AnalysisReport, LabelConfidence};

/// Provider answering every image with the same report after a fixed delay
pub struct MockAnalysisProvider {
    delay: Duration,
}

impl MockAnalysisProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The report returned for every image
    pub fn fixed_report() -> AnalysisReport {
        let detail = |label: &str, confidence: f64| LabelConfidence {
            label: label.to_string(),
            confidence,
        };

        AnalysisReport {
            main_category: "Object".to_string(),
            confidence: 0.92,
            details: vec![
                detail("Item A", 0.92),
                detail("Item B", 0.85),
                detail("Item C", 0.76),
            ],
        }
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, image: AnalysisImage) -> Result<AnalysisReport> {
        tracing::debug!(
            "Mock analysis of {} bytes ({}), delay={:?}",
            image.data.len(),
            image.content_type,
            self.delay
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(Self::fixed_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_mock_returns_fixed_labels() {
        let provider = MockAnalysisProvider::new(Duration::ZERO);
        let image = AnalysisImage {
            data: vec![0xFF, 0xD8],
            content_type: "image/jpeg".to_string(),
            file_name: None,
        };

        let report = assert_ok!(provider.analyze(image).await);

        assert_eq!(report.main_category, "Object");
        assert_eq!(report.confidence, 0.92);
        let labels: Vec<&str> = report.details.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Item A", "Item B", "Item C"]);
        assert!(report
            .details
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
    }

    #[tokio::test]
    async fn test_mock_waits_for_delay() {
        let provider = MockAnalysisProvider::new(Duration::from_millis(30));
        let image = AnalysisImage {
            data: vec![1],
            content_type: "image/png".to_string(),
            file_name: None,
        };

        let started = std::time::Instant::now();
        assert_ok!(provider.analyze(image).await);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
