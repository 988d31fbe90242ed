pub mod analysis;
pub mod images;
pub mod scan_results;
