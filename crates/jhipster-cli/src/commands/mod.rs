//! Command handlers. Each one wires adapters into a core service and
//! renders the result; no JDL logic lives here.

pub mod completions;
pub mod config;
pub mod entities;
pub mod merge;
pub mod prepare;

use jhipster_adapters::FileDocumentSource;
use jhipster_core::application::ModelService;

use crate::config::AppConfig;

/// Document loader over the local filesystem, honouring the configured
/// relationship direction unless the flag forces unidirectional.
fn model_service(config: &AppConfig, unidirectional: bool) -> ModelService {
    ModelService::new(Box::new(FileDocumentSource::new()))
        .with_unidirectional_relationships(unidirectional || config.generation.unidirectional_relationships)
}

/// `1 entity`, `2 entities`.
fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}
