pub mod dtos;
pub mod handlers;
pub mod providers;
pub mod routes;
pub mod services;

pub use providers::{AnalysisImage, AnalysisProvider, MockAnalysisProvider, RemoteAnalysisProvider};
pub use routes::routes;
pub use services::AnalysisService;
