mod scan_result_service;

pub use scan_result_service::ScanResultService;
