mod scan_result_dto;

pub use scan_result_dto::*;
