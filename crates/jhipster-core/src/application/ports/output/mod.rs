//! Driven (output) ports, implemented by infrastructure.

use std::path::Path;

use crate::domain::{EntityDescriptor, JdlDocument};
use crate::error::JhipsterResult;

/// Port for reading JDL documents.
///
/// Implemented by `jhipster_adapters::FileDocumentSource`.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSource: Send + Sync {
    /// Read and deserialize the document at `path`.
    fn load(&self, path: &Path) -> JhipsterResult<JdlDocument>;
}

/// Port for entity descriptor persistence.
///
/// Implemented by:
/// - `jhipster_adapters::LocalDescriptorStore` (a `.jhipster/` directory)
/// - `jhipster_adapters::MemoryDescriptorStore` (tests, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait DescriptorStore: Send + Sync {
    /// Names of the stored entities, sorted.
    fn list(&self) -> JhipsterResult<Vec<String>>;

    fn load(&self, name: &str) -> JhipsterResult<EntityDescriptor>;

    /// Insert or replace the descriptor of `descriptor.name`.
    fn save(&self, descriptor: &EntityDescriptor) -> JhipsterResult<()>;

    fn load_all(&self) -> JhipsterResult<Vec<EntityDescriptor>> {
        self.list()?.iter().map(|name| self.load(name)).collect()
    }
}
