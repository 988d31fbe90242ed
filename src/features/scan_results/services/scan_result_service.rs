use std::sync::Arc;

use crate::core::error::Result;
use crate::features::scan_results::dtos::{CreateScanResultDto, ScanResultDto};
use crate::features::scan_results::store::ScanResultStore;

/// Service for recording and listing scan results
pub struct ScanResultService {
    store: Arc<dyn ScanResultStore>,
}

impl ScanResultService {
    pub fn new(store: Arc<dyn ScanResultStore>) -> Self {
        Self { store }
    }

    /// Record one completed analysis
    pub async fn create(&self, dto: CreateScanResultDto) -> Result<ScanResultDto> {
        let result = self.store.create(dto.into()).await?;
        Ok(result.into())
    }

    /// Full scan history, oldest first
    pub async fn list(&self) -> Result<Vec<ScanResultDto>> {
        let results = self.store.list_all().await?;
        Ok(results.into_iter().map(ScanResultDto::from).collect())
    }
}
