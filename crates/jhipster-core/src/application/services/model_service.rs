//! Model service: documents in, one merged `JdlObject` out.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::DocumentSource},
    domain::{JdlObject, merge_all},
    error::JhipsterResult,
};

/// What a merged object declares, for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub applications: Vec<String>,
    pub deployments: Vec<String>,
    pub entities: Vec<String>,
    pub enums: Vec<String>,
    pub relationships: usize,
    pub options: usize,
}

impl ModelSummary {
    pub fn of(object: &JdlObject) -> Self {
        Self {
            applications: object
                .applications()
                .filter_map(|app| app.base_name().map(str::to_string))
                .collect(),
            deployments: object
                .deployments()
                .map(|d| d.deployment_type().to_string())
                .collect(),
            entities: object.entity_names().into_iter().map(str::to_string).collect(),
            enums: object.enums().map(|e| e.name().to_string()).collect(),
            relationships: object.relationship_quantity(),
            options: object.option_quantity(),
        }
    }
}

/// Loads JDL documents and merges them.
pub struct ModelService {
    source: Box<dyn DocumentSource>,
    unidirectional_relationships: bool,
}

impl ModelService {
    pub fn new(source: Box<dyn DocumentSource>) -> Self {
        Self {
            source,
            unidirectional_relationships: false,
        }
    }

    /// Treat every relationship as unidirectional, whatever the documents say.
    pub fn with_unidirectional_relationships(mut self, unidirectional: bool) -> Self {
        self.unidirectional_relationships = unidirectional;
        self
    }

    /// Build the object one document declares.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_object(&self, path: &Path) -> JhipsterResult<JdlObject> {
        let document = self.source.load(path)?;
        let object = document.to_object(self.unidirectional_relationships)?;
        debug!(
            entities = object.entity_quantity(),
            relationships = object.relationship_quantity(),
            "Document loaded"
        );
        Ok(object)
    }

    /// Load every document and merge them left to right.
    #[instrument(skip_all, fields(documents = paths.len()))]
    pub fn merge(&self, paths: &[PathBuf]) -> JhipsterResult<JdlObject> {
        if paths.is_empty() {
            return Err(ApplicationError::NoDocuments.into());
        }
        let objects = paths
            .iter()
            .map(|path| self.load_object(path))
            .collect::<JhipsterResult<Vec<_>>>()?;
        let merged = merge_all(&objects)?;
        info!(
            entities = merged.entity_quantity(),
            enums = merged.enum_quantity(),
            relationships = merged.relationship_quantity(),
            "Documents merged"
        );
        Ok(merged)
    }

    /// Canonical JDL of the merged documents.
    pub fn render(&self, paths: &[PathBuf]) -> JhipsterResult<String> {
        Ok(self.merge(paths)?.to_string())
    }

    pub fn summarize(&self, paths: &[PathBuf]) -> JhipsterResult<ModelSummary> {
        Ok(ModelSummary::of(&self.merge(paths)?))
    }
}
