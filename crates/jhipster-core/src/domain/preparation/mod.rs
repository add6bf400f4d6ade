//! Entity preparation.
//!
//! Turns raw `.jhipster/<Entity>.json` descriptors into template-ready
//! entities. Each descriptor goes through a fixed sequence of passes:
//!
//! 1. load: structural validation, then lenient defaults (a missing
//!    `relationshipName` falls back to `otherEntityName` with a warning)
//! 2. primary key derivation
//! 3. field classification
//! 4. relationship classification
//!
//! Later passes read what earlier ones wrote, so the order is fixed.

mod context;
mod diagnostics;
mod fields;
mod model;
mod primary_key;
mod relationships;

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    common::lower_first,
    descriptor::EntityDescriptor,
    error::DomainResult,
    validation::DescriptorValidator,
};

pub use context::{ApplicationContext, DatabaseType};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use model::{
    FieldFlags, PreparedEntity, PreparedField, PreparedRelationship, PrimaryKey, PrimaryKeyField,
    RelationshipFlags,
};
pub use relationships::BUILT_IN_ENTITIES;

/// Every descriptor of a run, looked up by entity name regardless of the
/// case of its first letter.
pub(crate) struct Catalog<'a> {
    context: &'a ApplicationContext,
    entities: HashMap<String, &'a EntityDescriptor>,
}

impl<'a> Catalog<'a> {
    fn new(context: &'a ApplicationContext, descriptors: &'a [EntityDescriptor]) -> Self {
        let entities = descriptors
            .iter()
            .map(|d| (lower_first(&d.name), d))
            .collect();
        Self { context, entities }
    }

    fn get(&self, name: &str) -> Option<&'a EntityDescriptor> {
        self.entities.get(&lower_first(name)).copied()
    }
}

/// Result of a preparation run.
#[derive(Debug, Clone, Default)]
pub struct Preparation {
    pub entities: Vec<PreparedEntity>,
    pub diagnostics: Diagnostics,
}

/// Validate a descriptor and fill its lenient defaults.
pub fn load_descriptor(descriptor: &EntityDescriptor, diagnostics: &mut Diagnostics) -> DomainResult<EntityDescriptor> {
    DescriptorValidator::validate(descriptor)?;

    let file = descriptor.file_name();
    let mut loaded = descriptor.clone();
    for relationship in &mut loaded.relationships {
        if relationship.relationship_name.as_deref().is_some_and(|n| !n.is_empty()) {
            continue;
        }
        let fallback = relationship.other_entity_name.clone().unwrap_or_default();
        let json = serde_json::to_string(&*relationship).unwrap_or_default();
        diagnostics.warn(format!(
            "relationshipName is missing in {file} for relationship {json}, using {fallback} as fallback"
        ));
        relationship.relationship_name = Some(fallback);
    }
    Ok(loaded)
}

/// Prepare every descriptor against the same application context.
///
/// Fails on the first descriptor with a structural violation or a
/// relationship to an unknown entity.
pub fn prepare_entities(descriptors: &[EntityDescriptor], context: &ApplicationContext) -> DomainResult<Preparation> {
    let mut diagnostics = Diagnostics::new();
    let loaded = descriptors
        .iter()
        .map(|d| load_descriptor(d, &mut diagnostics))
        .collect::<DomainResult<Vec<_>>>()?;

    let catalog = Catalog::new(context, &loaded);
    let mut entities = Vec::with_capacity(loaded.len());
    for descriptor in &loaded {
        let mut entity = PreparedEntity::from_descriptor(descriptor);
        primary_key::derive_primary_key(&mut entity, descriptor, &catalog);
        fields::prepare_fields(&mut entity, descriptor);
        relationships::prepare_relationships(&mut entity, descriptor, &catalog)?;
        debug!(
            entity = %entity.name,
            fields = entity.fields.len(),
            relationships = entity.relationships.len(),
            "Entity prepared"
        );
        entities.push(entity);
    }

    Ok(Preparation { entities, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn descriptors(values: Vec<Value>) -> Vec<EntityDescriptor> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    fn prepare(values: Vec<Value>) -> Preparation {
        prepare_entities(&descriptors(values), &ApplicationContext::default()).unwrap()
    }

    #[test]
    fn missing_relationship_name_falls_back_with_a_warning() {
        let prepared = prepare(vec![
            json!({ "name": "Foo", "relationships": [{ "relationshipType": "many-to-one", "otherEntityName": "bar" }] }),
            json!({ "name": "Bar" }),
        ]);
        let foo = &prepared.entities[0];
        assert_eq!(foo.relationships[0].relationship_name, "bar");
        assert_eq!(prepared.diagnostics.warnings().count(), 1);
        let message = &prepared.diagnostics.iter().next().unwrap().message;
        assert!(message.starts_with("relationshipName is missing in .jhipster/Foo.json for relationship {"));
        assert!(message.ends_with(", using bar as fallback"));
    }

    #[test]
    fn structural_violations_abort() {
        let err = prepare_entities(
            &descriptors(vec![json!({
                "name": "Foo",
                "fields": [{ "fieldName": "bar", "fieldType": "String", "fieldValidateRules": ["maxlength"] }]
            })]),
            &ApplicationContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDescriptor { .. }));
        assert!(err.to_string().contains("fieldValidateRulesMaxlength is missing in .jhipster/Foo.json"));
    }

    #[test]
    fn synthesized_primary_key_follows_database() {
        let prepared = prepare(vec![json!({ "name": "Foo" })]);
        let key = prepared.entities[0].primary_key.as_ref().unwrap();
        assert_eq!(key.name, "id");
        assert_eq!(key.key_type, "Long");
        assert!(key.type_long && key.type_numeric && key.auto_generate);
        assert!(!key.composite && !key.derived);

        let context = ApplicationContext::new("app", DatabaseType::Cassandra);
        let prepared = prepare_entities(&descriptors(vec![json!({ "name": "Foo" })]), &context).unwrap();
        let key = prepared.entities[0].primary_key.as_ref().unwrap();
        assert_eq!(key.key_type, "UUID");
        assert!(key.type_uuid && !key.type_numeric);
    }

    #[test]
    fn declared_id_fields_form_the_key() {
        let prepared = prepare(vec![
            json!({ "name": "Single", "fields": [{ "fieldName": "code", "fieldType": "String", "id": true }] }),
            json!({ "name": "Pair", "fields": [
                { "fieldName": "a", "fieldType": "Long", "id": true },
                { "fieldName": "b", "fieldType": "Long", "id": true }
            ] }),
        ]);
        let single = prepared.entities[0].primary_key.as_ref().unwrap();
        assert_eq!((single.name.as_str(), single.key_type.as_str()), ("code", "String"));
        assert!(single.type_string && !single.auto_generate);

        let pair = prepared.entities[1].primary_key.as_ref().unwrap();
        assert!(pair.composite && !pair.auto_generate);
        assert_eq!(pair.key_type, "composite");
        assert_eq!(pair.fields.len(), 2);
    }

    #[test]
    fn id_relationship_derives_the_key() {
        let prepared = prepare(vec![
            json!({ "name": "Profile", "relationships": [{
                "relationshipType": "one-to-one", "otherEntityName": "account",
                "relationshipName": "account", "ownerSide": true, "id": true
            }] }),
            json!({ "name": "Account", "fields": [{ "fieldName": "uuid", "fieldType": "UUID", "id": true }] }),
        ]);
        let key = prepared.entities[0].primary_key.as_ref().unwrap();
        assert!(key.derived && !key.auto_generate);
        assert_eq!(key.derived_from.as_deref(), Some("account"));
        assert_eq!(key.key_type, "UUID");
    }

    #[test]
    fn embedded_entities_have_no_key() {
        let prepared = prepare(vec![json!({ "name": "Address", "embedded": true })]);
        assert_eq!(prepared.entities[0].primary_key, None);
    }

    #[test]
    fn field_classification() {
        let prepared = prepare(vec![json!({
            "name": "Foo",
            "fields": [
                { "fieldName": "firstName", "fieldType": "String", "fieldValidateRules": ["required", "maxlength"], "fieldValidateRulesMaxlength": 42 },
                { "fieldName": "born", "fieldType": "LocalDate" },
                { "fieldName": "lasts", "fieldType": "Duration" },
                { "fieldName": "price", "fieldType": "BigDecimal" },
                { "fieldName": "picture", "fieldType": "byte[]", "fieldTypeBlobContent": "image" },
                { "fieldName": "notes", "fieldType": "byte[]", "fieldTypeBlobContent": "text" },
                { "fieldName": "color", "fieldType": "Color", "fieldValues": "RED,BLUE" },
                { "fieldName": "lastName", "fieldType": "String" }
            ]
        })]);
        let foo = &prepared.entities[0];

        let first_name = foo.field("firstName").unwrap();
        assert_eq!(first_name.field_name_capitalized, "FirstName");
        assert_eq!(first_name.field_name_humanized, "First Name");
        assert_eq!(first_name.field_name_underscored, "first_name");
        assert!(first_name.field_validate && first_name.field_validation_required);
        assert!(!first_name.field_validation_unique);
        assert_eq!(first_name.field_validate_values.get("fieldValidateRulesMaxlength"), Some(&json!(42)));

        let color = foo.field("color").unwrap();
        assert!(color.field_is_enum);
        assert_eq!(color.field_values, vec!["RED", "BLUE"]);

        assert!(foo.field("picture").unwrap().field_type_image_blob);
        assert!(foo.field("notes").unwrap().field_type_text_blob);
        assert!(foo.field("born").unwrap().field_type_temporal);

        assert_eq!(foo.different_types, vec!["String", "LocalDate", "Duration", "BigDecimal", "byte[]"]);
        let flags = &foo.field_flags;
        assert!(flags.fields_contain_date && flags.fields_contain_local_date);
        assert!(!flags.fields_contain_instant);
        assert!(flags.fields_contain_duration && flags.fields_contain_big_decimal);
        assert!(flags.fields_contain_blob && flags.fields_contain_image_blob && flags.fields_contain_text_blob);
        assert!(flags.fields_contain_blob_or_image);
        assert!(flags.validation);
        assert!(!flags.fields_contain_uuid);
    }

    #[test]
    fn relationship_classification() {
        let prepared = prepare(vec![
            json!({ "name": "Order", "relationships": [
                { "relationshipType": "many-to-one", "otherEntityName": "customer", "relationshipName": "customer" },
                { "relationshipType": "one-to-many", "otherEntityName": "line", "relationshipName": "lines" },
                { "relationshipType": "many-to-many", "otherEntityName": "tag", "relationshipName": "tags", "ownerSide": true },
                { "relationshipType": "one-to-one", "otherEntityName": "invoice", "relationshipName": "invoice", "ownerSide": false },
                { "relationshipType": "many-to-one", "otherEntityName": "customer", "relationshipName": "payer" },
                { "relationshipType": "one-to-one", "otherEntityName": "address", "relationshipName": "shipping", "ownerSide": true },
                { "relationshipType": "many-to-one", "otherEntityName": "user", "relationshipName": "owner" }
            ] }),
            json!({ "name": "Customer" }),
            json!({ "name": "Line" }),
            json!({ "name": "Tag" }),
            json!({ "name": "Invoice" }),
            json!({ "name": "Address", "embedded": true }),
        ]);
        let order = &prepared.entities[0];

        let flags = &order.relationship_flags;
        assert!(flags.fields_contain_many_to_one);
        assert!(flags.fields_contain_one_to_many);
        assert!(flags.fields_contain_owner_many_to_many);
        assert!(flags.fields_contain_no_owner_one_to_one);
        assert!(flags.fields_contain_owner_one_to_one);
        assert!(flags.fields_contain_embedded);

        let lines = order.relationship("lines").unwrap();
        assert!(lines.collection && !lines.owner_side);
        assert_eq!(lines.relationship_type, "one-to-many");
        assert_eq!(lines.other_entity_field, "id");
        assert!(order.relationship("customer").unwrap().owner_side);
        assert!(order.relationship("owner").unwrap().other_entity_is_built_in);
        assert!(order.relationship("shipping").unwrap().other_entity_is_embedded);

        let groups: Vec<(&String, &Vec<String>)> = order.different_relationships.iter().collect();
        assert_eq!(groups.len(), 5);
        assert_eq!(order.different_relationships.get("Customer"), Some(&vec!["customer".to_string(), "payer".to_string()]));
        assert_eq!(order.different_relationships.get("Address"), None);
    }

    #[test]
    fn unknown_related_entity_is_rejected() {
        let err = prepare_entities(
            &descriptors(vec![json!({ "name": "Foo", "relationships": [
                { "relationshipType": "many-to-one", "otherEntityName": "ghost", "relationshipName": "ghost" }
            ] })]),
            &ApplicationContext::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::UnknownRelatedEntity {
            entity: "Foo".into(),
            relationship: "ghost".into(),
        });
    }

    #[test]
    fn prepared_entity_serializes_camel_case() {
        let prepared = prepare(vec![json!({
            "name": "Foo",
            "fields": [{ "fieldName": "externalRef", "fieldType": "UUID" }]
        })]);
        let value = serde_json::to_value(&prepared.entities[0]).unwrap();
        assert_eq!(value["entityClass"], json!("Foo"));
        assert_eq!(value["entityInstance"], json!("foo"));
        assert_eq!(value["fieldsContainUUID"], json!(true));
        assert_eq!(value["primaryKey"]["type"], json!("Long"));
        assert_eq!(value["primaryKey"]["typeUUID"], json!(false));
        assert_eq!(value["differentRelationships"], json!({}));
        assert_eq!(value["fields"][0]["fieldNameHumanized"], json!("External Ref"));
    }
}
