//! Preparation service: descriptors in, template-ready entities out.

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::DescriptorStore},
    domain::{
        ApplicationContext, ConversionOptions, EntityDescriptor, JdlObject, Preparation,
        convert_to_descriptors, prepare_entities,
    },
    error::JhipsterResult,
};

/// Converts merged objects to descriptors and prepares stored descriptors.
pub struct PreparationService {
    store: Box<dyn DescriptorStore>,
}

impl PreparationService {
    pub fn new(store: Box<dyn DescriptorStore>) -> Self {
        Self { store }
    }

    /// Convert `object` to descriptors and save each one in the store.
    #[instrument(skip_all, fields(entities = object.entity_quantity()))]
    pub fn export_descriptors(
        &self,
        object: &JdlObject,
        options: &ConversionOptions,
    ) -> JhipsterResult<Vec<EntityDescriptor>> {
        let descriptors = convert_to_descriptors(object, options);
        for descriptor in &descriptors {
            self.store.save(descriptor)?;
        }
        info!(count = descriptors.len(), "Entity descriptors saved");
        Ok(descriptors)
    }

    /// Prepare every descriptor in the store.
    #[instrument(skip_all, fields(database = %context.database_type))]
    pub fn prepare_stored(&self, context: &ApplicationContext) -> JhipsterResult<Preparation> {
        let descriptors = self.store.load_all()?;
        Self::prepare(&descriptors, context)
    }

    /// Prepare `descriptors` and log the diagnostics collected on the way.
    pub fn prepare(descriptors: &[EntityDescriptor], context: &ApplicationContext) -> JhipsterResult<Preparation> {
        let preparation = prepare_entities(descriptors, context)?;
        for diagnostic in preparation.diagnostics.warnings() {
            warn!("{}", diagnostic.message);
        }
        info!(entities = preparation.entities.len(), "Entities prepared");
        Ok(preparation)
    }

    /// The context of the application named `base_name`, or of the single
    /// declared application, or `fallback` when the object has none.
    pub fn context_for(
        object: &JdlObject,
        base_name: Option<&str>,
        fallback: ApplicationContext,
    ) -> JhipsterResult<ApplicationContext> {
        let application = match base_name {
            Some(name) => Some(object.get_application(name).ok_or_else(|| {
                ApplicationError::ApplicationNotFound {
                    name: name.to_string(),
                }
            })?),
            None => object.applications().next(),
        };
        match application {
            Some(application) => Ok(ApplicationContext::from_application(application)?),
            None => Ok(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockDescriptorStore;
    use crate::domain::{DatabaseType, DomainError, JdlDocument};
    use crate::error::JhipsterError;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JdlObject {
        serde_json::from_value::<JdlDocument>(value)
            .unwrap()
            .to_object(false)
            .unwrap()
    }

    #[test]
    fn exports_one_descriptor_per_entity() {
        let mut store = MockDescriptorStore::new();
        store.expect_save().times(2).returning(|_| Ok(()));
        let service = PreparationService::new(Box::new(store));

        let object = object(json!({ "entities": [{ "name": "A" }, { "name": "B" }] }));
        let descriptors = service
            .export_descriptors(&object, &ConversionOptions::default())
            .unwrap();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn prepares_stored_descriptors() {
        let mut store = MockDescriptorStore::new();
        store
            .expect_load_all()
            .returning(|| Ok(vec![EntityDescriptor::new("Foo")]));
        let service = PreparationService::new(Box::new(store));

        let preparation = service.prepare_stored(&ApplicationContext::default()).unwrap();
        assert_eq!(preparation.entities.len(), 1);
        assert_eq!(preparation.entities[0].entity_table_name, "Foo");
        assert!(preparation.diagnostics.is_empty());
    }

    #[test]
    fn propagates_store_failures() {
        let mut store = MockDescriptorStore::new();
        store
            .expect_load_all()
            .returning(|| Err(ApplicationError::StoreLockError.into()));
        let service = PreparationService::new(Box::new(store));

        let err = service.prepare_stored(&ApplicationContext::default()).unwrap_err();
        assert!(matches!(err, JhipsterError::Application(ApplicationError::StoreLockError)));
    }

    #[test]
    fn context_comes_from_the_named_application() {
        let object = object(json!({ "applications": [
            { "config": { "baseName": "gateway", "databaseType": "sql" } },
            { "config": { "baseName": "store", "databaseType": "mongodb" } }
        ] }));

        let store = PreparationService::context_for(&object, Some("store"), ApplicationContext::default()).unwrap();
        assert_eq!(store.database_type, DatabaseType::Mongodb);

        let first = PreparationService::context_for(&object, None, ApplicationContext::default()).unwrap();
        assert_eq!(first.base_name, "gateway");

        let err = PreparationService::context_for(&object, Some("nope"), ApplicationContext::default()).unwrap_err();
        assert!(matches!(err, JhipsterError::Application(ApplicationError::ApplicationNotFound { .. })));
    }

    #[test]
    fn context_falls_back_without_applications() {
        let fallback = ApplicationContext::new("cli", DatabaseType::Cassandra);
        let context = PreparationService::context_for(&JdlObject::new(), None, fallback.clone()).unwrap();
        assert_eq!(context, fallback);
    }

    #[test]
    fn invalid_database_type_is_a_domain_error() {
        let object = object(json!({ "applications": [{ "config": { "baseName": "x", "databaseType": "oracle" } }] }));
        let err = PreparationService::context_for(&object, None, ApplicationContext::default()).unwrap_err();
        assert!(matches!(err, JhipsterError::Domain(DomainError::UnknownDatabaseType(_))));
    }
}
