mod scan_result_handler;

pub use scan_result_handler::*;
