mod scan_result;

pub use scan_result::{CreateScanResult, ScanResult};
