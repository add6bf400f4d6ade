//! In-memory descriptor store.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use jhipster_core::{
    application::{ApplicationError, ports::DescriptorStore},
    domain::EntityDescriptor,
    error::JhipsterResult,
};

/// Thread-safe in-memory store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryDescriptorStore {
    inner: Arc<RwLock<BTreeMap<String, EntityDescriptor>>>,
}

impl MemoryDescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptors(descriptors: impl IntoIterator<Item = EntityDescriptor>) -> Self {
        let map = descriptors
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    pub fn len(&self) -> JhipsterResult<usize> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?
            .len())
    }

    pub fn is_empty(&self) -> JhipsterResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl DescriptorStore for MemoryDescriptorStore {
    fn list(&self) -> JhipsterResult<Vec<String>> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }

    fn load(&self, name: &str) -> JhipsterResult<EntityDescriptor> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLockError)?;
        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::DescriptorNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn save(&self, descriptor: &EntityDescriptor) -> JhipsterResult<()> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(descriptor.name.clone(), descriptor.clone());
        Ok(())
    }
}
