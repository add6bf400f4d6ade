//! `.jhipster/` directory store using std::fs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use jhipster_core::{
    application::{ApplicationError, ports::DescriptorStore},
    domain::EntityDescriptor,
    error::{JhipsterError, JhipsterResult},
};

/// One `<Entity>.json` file per entity in a single directory.
#[derive(Debug, Clone)]
pub struct LocalDescriptorStore {
    root: PathBuf,
}

impl LocalDescriptorStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl DescriptorStore for LocalDescriptorStore {
    /// A missing directory holds no entities.
    fn list(&self) -> JhipsterResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::DescriptorStore {
                path: self.root.clone(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, name: &str) -> JhipsterResult<EntityDescriptor> {
        let path = self.path_of(name);
        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::DescriptorNotFound {
                name: name.to_string(),
            },
            _ => store_error(&path, e),
        })?;
        let mut descriptor: EntityDescriptor =
            serde_json::from_str(&text).map_err(|e| ApplicationError::DescriptorMalformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        // Descriptor files written by older generators omit the name.
        if descriptor.name.is_empty() {
            descriptor.name = name.to_string();
        }
        descriptor.source_path = Some(path.display().to_string());
        debug!(entity = name, "Descriptor loaded");
        Ok(descriptor)
    }

    #[instrument(skip_all, fields(entity = %descriptor.name))]
    fn save(&self, descriptor: &EntityDescriptor) -> JhipsterResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| store_error(&self.root, e))?;
        let path = self.path_of(&descriptor.name);
        let json = serde_json::to_string_pretty(descriptor).map_err(|e| JhipsterError::Internal {
            message: format!("Failed to serialize {}: {e}", descriptor.name),
        })?;
        fs::write(&path, format!("{json}\n")).map_err(|e| store_error(&path, e))?;
        debug!(path = %path.display(), "Descriptor written");
        Ok(())
    }
}

fn store_error(path: &Path, e: io::Error) -> ApplicationError {
    ApplicationError::DescriptorStore {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = LocalDescriptorStore::new(temp.path().join(".jhipster"));
        assert!(store.list().unwrap().is_empty());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn saves_and_loads_descriptors() {
        let temp = TempDir::new().unwrap();
        let store = LocalDescriptorStore::new(temp.path().join(".jhipster"));

        let mut foo = EntityDescriptor::new("Foo");
        foo.dto = Some("mapstruct".into());
        store.save(&foo).unwrap();
        store.save(&EntityDescriptor::new("Bar")).unwrap();
        fs::write(temp.path().join(".jhipster/notes.txt"), "ignored").unwrap();

        assert_eq!(store.list().unwrap(), vec!["Bar", "Foo"]);
        let loaded = store.load("Foo").unwrap();
        assert_eq!(loaded.file_name(), store.path_of("Foo").display().to_string());
        assert_eq!(
            EntityDescriptor {
                source_path: None,
                ..loaded
            },
            foo
        );
        assert!(fs::read_to_string(store.path_of("Foo")).unwrap().contains("\"dto\": \"mapstruct\""));
    }

    #[test]
    fn nameless_descriptor_takes_the_file_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Legacy.json"), r#"{ "fields": [] }"#).unwrap();
        let store = LocalDescriptorStore::new(temp.path());
        assert_eq!(store.load("Legacy").unwrap().name, "Legacy");
    }

    #[test]
    fn load_errors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Broken.json"), "{").unwrap();
        let store = LocalDescriptorStore::new(temp.path());

        assert!(matches!(
            store.load("Ghost").unwrap_err(),
            JhipsterError::Application(ApplicationError::DescriptorNotFound { .. })
        ));
        assert!(matches!(
            store.load("Broken").unwrap_err(),
            JhipsterError::Application(ApplicationError::DescriptorMalformed { .. })
        ));
    }
}
