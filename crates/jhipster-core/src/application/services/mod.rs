//! Application services: orchestrate use cases.

pub mod model_service;
pub mod preparation_service;

pub use model_service::{ModelService, ModelSummary};
pub use preparation_service::PreparationService;
