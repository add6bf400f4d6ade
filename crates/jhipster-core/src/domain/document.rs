//! Serialized JDL documents.
//!
//! A [`JdlDocument`] is the abstract syntax of one JDL file as exported by a
//! JDL parser, in JSON or TOML. It mirrors the model closely and is turned
//! into a [`JdlObject`] by [`JdlDocument::to_object`], which surfaces every
//! construction error of the model.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{
    common::OrderedMap,
    error::{DomainError, DomainResult},
    jdl::{
        ConfigurationOption, JdlApplication, JdlApplicationConfiguration, JdlBinaryOption,
        JdlDeployment, JdlEntity, JdlEnum, JdlEnumValue, JdlField, JdlObject, JdlOption,
        JdlRelationship, JdlUnaryOption, JdlValidation, OptionArgs, OptionKind, OptionValue,
        RelationshipOptions, binary, known_option_kind,
    },
    value_objects::{DeploymentType, RelationshipType, ValidationRule},
};

/// Map entries in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedEntries(pub Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlDocument {
    pub unidirectional_relationships: bool,
    pub applications: Vec<ApplicationDocument>,
    pub deployments: Vec<DeploymentDocument>,
    pub entities: Vec<EntityDocument>,
    pub enums: Vec<EnumDocument>,
    pub relationships: Vec<RelationshipDocument>,
    pub options: Vec<OptionDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDocument {
    pub config: OrderedEntries,
    pub entities: Vec<String>,
    pub options: Vec<OptionDocument>,
}

/// `deploymentType` plus free-form options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DeploymentDocument(pub OrderedEntries);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDocument {
    pub name: String,
    pub table_name: Option<String>,
    pub comment: Option<String>,
    pub fields: Vec<FieldDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub comment: Option<String>,
    pub validations: Vec<ValidationDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationDocument {
    pub name: String,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumDocument {
    pub name: String,
    pub comment: Option<String>,
    pub values: Vec<EnumValueDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumValueDocument {
    pub key: String,
    pub value: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipDocument {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub relationship_type: Option<String>,
    pub injected_field_in_from: Option<String>,
    pub injected_field_in_to: Option<String>,
    pub is_injected_field_in_from_required: bool,
    pub is_injected_field_in_to_required: bool,
    pub comment_in_from: Option<String>,
    pub comment_in_to: Option<String>,
    pub options: RelationshipOptionsDocument,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelationshipOptionsDocument {
    pub global: OrderedEntries,
    pub source: OrderedEntries,
    pub destination: OrderedEntries,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionDocument {
    pub name: String,
    pub value: Option<String>,
    pub entity_names: Vec<String>,
    pub excluded_names: Vec<String>,
}

/// Scalars as JDL writes them; `null` is absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Convert a document value to a typed configuration value.
///
/// Known option names fix the kind; unknown names take the kind of the
/// serialized value.
pub fn option_value(name: &str, value: &Value) -> OptionValue {
    match (known_option_kind(name), value) {
        (Some(OptionKind::Integer), Value::String(s)) => match s.parse() {
            Ok(i) => OptionValue::Integer(i),
            Err(_) => OptionValue::String(s.clone()),
        },
        (Some(OptionKind::Boolean), Value::String(s)) => match s.as_str() {
            "true" => OptionValue::Boolean(true),
            "false" => OptionValue::Boolean(false),
            _ => OptionValue::String(s.clone()),
        },
        (Some(OptionKind::List), Value::String(s)) => {
            OptionValue::list(s.split(',').map(str::trim).filter(|v| !v.is_empty()))
        }
        (Some(OptionKind::String), Value::Array(_)) | (_, Value::Object(_)) => {
            OptionValue::String(value.to_string())
        }
        (_, Value::Bool(b)) => OptionValue::Boolean(*b),
        (_, Value::Number(n)) => match n.as_i64() {
            Some(i) => OptionValue::Integer(i),
            None => OptionValue::String(n.to_string()),
        },
        (_, Value::Array(items)) => OptionValue::list(items.iter().filter_map(scalar_to_string)),
        (_, Value::String(s)) => OptionValue::String(s.clone()),
        (_, Value::Null) => OptionValue::String(String::new()),
    }
}

impl OptionDocument {
    pub fn to_option(&self) -> DomainResult<JdlOption> {
        // `*` anywhere in the list means every entity: no restriction.
        let entity_names = if self.entity_names.iter().any(|name| name == "*") {
            Vec::new()
        } else {
            self.entity_names.clone()
        };
        let args = OptionArgs {
            name: self.name.clone(),
            value: self.value.clone(),
            entity_names,
            excluded_names: self.excluded_names.clone(),
        };
        if self.value.is_some() || binary::ALL.contains(&self.name.as_str()) {
            Ok(JdlBinaryOption::new(args)?.into())
        } else {
            Ok(JdlUnaryOption::new(args)?.into())
        }
    }
}

impl ApplicationDocument {
    pub fn to_application(&self) -> DomainResult<JdlApplication> {
        let mut config = JdlApplicationConfiguration::new();
        for (name, value) in &self.config.0 {
            config.set_option(ConfigurationOption::new(name.clone(), option_value(name, value))?);
        }
        let mut application = JdlApplication::new(config);
        application.add_entity_names(self.entities.iter().cloned());
        for option in &self.options {
            application.add_option(option.to_option()?);
        }
        Ok(application)
    }
}

impl DeploymentDocument {
    pub fn to_deployment(&self) -> DomainResult<JdlDeployment> {
        let deployment_type = self
            .0
            .0
            .iter()
            .find(|(name, _)| name == "deploymentType")
            .and_then(|(_, value)| scalar_to_string(value))
            .unwrap_or_default();
        let mut deployment = JdlDeployment::new(DeploymentType::from_str(&deployment_type)?);
        for (name, value) in self.0.0.iter().filter(|(name, _)| name != "deploymentType") {
            deployment.set_option(name.clone(), option_value(name, value));
        }
        Ok(deployment)
    }
}

impl FieldDocument {
    pub fn to_field(&self) -> DomainResult<JdlField> {
        let mut field = JdlField::new(self.name.clone(), self.field_type.clone())?;
        if let Some(comment) = &self.comment {
            field = field.with_comment(comment.clone());
        }
        for validation in &self.validations {
            let rule = ValidationRule::from_str(&validation.name)?;
            let validation = match validation.value.as_ref().and_then(scalar_to_string) {
                Some(value) => JdlValidation::with_value(rule, value),
                None => JdlValidation::new(rule),
            };
            field.add_validation(validation);
        }
        Ok(field)
    }
}

impl EntityDocument {
    pub fn to_entity(&self) -> DomainResult<JdlEntity> {
        let mut entity = JdlEntity::new(self.name.clone())?;
        if let Some(table_name) = &self.table_name {
            entity = entity.with_table_name(table_name.clone());
        }
        if let Some(comment) = &self.comment {
            entity = entity.with_comment(comment.clone());
        }
        for field in &self.fields {
            entity.add_field(field.to_field()?);
        }
        Ok(entity)
    }
}

impl EnumDocument {
    pub fn to_enum(&self) -> DomainResult<JdlEnum> {
        let mut en = JdlEnum::new(self.name.clone())?;
        if let Some(comment) = &self.comment {
            en = en.with_comment(comment.clone());
        }
        for value in &self.values {
            en.add_value(JdlEnumValue {
                key: value.key.clone(),
                value: value.value.clone(),
                comment: value.comment.clone(),
            });
        }
        Ok(en)
    }
}

fn annotation_map(entries: &OrderedEntries) -> OrderedMap<String, Option<String>> {
    entries
        .0
        .iter()
        .map(|(name, value)| (name.clone(), scalar_to_string(value)))
        .collect()
}

impl RelationshipDocument {
    pub fn to_relationship(&self, unidirectional: bool) -> DomainResult<JdlRelationship> {
        let mut builder = JdlRelationship::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .injected_field_in_from_required(self.is_injected_field_in_from_required)
            .injected_field_in_to_required(self.is_injected_field_in_to_required)
            .unidirectional(unidirectional)
            .options(RelationshipOptions {
                global: annotation_map(&self.options.global),
                source: annotation_map(&self.options.source),
                destination: annotation_map(&self.options.destination),
            });
        if let Some(relationship_type) = &self.relationship_type {
            let relationship_type = RelationshipType::from_str(relationship_type)
                .map_err(|_| DomainError::InvalidRelationshipShape)?;
            builder = builder.relationship_type(relationship_type);
        }
        if let Some(field) = &self.injected_field_in_from {
            builder = builder.injected_field_in_from(field.clone());
        }
        if let Some(field) = &self.injected_field_in_to {
            builder = builder.injected_field_in_to(field.clone());
        }
        if let Some(comment) = &self.comment_in_from {
            builder = builder.comment_in_from(comment.clone());
        }
        if let Some(comment) = &self.comment_in_to {
            builder = builder.comment_in_to(comment.clone());
        }
        builder.build()
    }
}

impl JdlDocument {
    /// Build the object this document declares.
    ///
    /// `force_unidirectional` adds to the document's own
    /// `unidirectionalRelationships` flag.
    #[instrument(skip(self), fields(entities = self.entities.len()))]
    pub fn to_object(&self, force_unidirectional: bool) -> DomainResult<JdlObject> {
        let unidirectional = self.unidirectional_relationships || force_unidirectional;
        let mut object = JdlObject::new();

        for application in &self.applications {
            object.add_application(application.to_application()?)?;
        }
        for deployment in &self.deployments {
            object.add_deployment(deployment.to_deployment()?);
        }
        for entity in &self.entities {
            object.add_entity(entity.to_entity()?);
        }
        for en in &self.enums {
            object.add_enum(en.to_enum()?);
        }
        for relationship in &self.relationships {
            if !object.add_relationship(relationship.to_relationship(unidirectional)?) {
                debug!(from = %relationship.from, to = %relationship.to, "Skipping duplicate relationship");
            }
        }
        for option in &self.options {
            object.add_option(option.to_option()?);
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document(value: Value) -> JdlDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn builds_a_complete_object() {
        let doc = document(json!({
            "applications": [{
                "config": { "baseName": "shop", "serverPort": "8081", "languages": ["en", "fr"] },
                "entities": ["Order"]
            }],
            "deployments": [{ "deploymentType": "docker-compose", "appsFolders": ["shop"] }],
            "entities": [{
                "name": "Order",
                "fields": [
                    { "name": "code", "type": "String",
                      "validations": [{ "name": "required" }, { "name": "maxlength", "value": 20 }] },
                    { "name": "status", "type": "Status" }
                ]
            }],
            "enums": [{ "name": "Status", "values": [{ "key": "OPEN" }, { "key": "CLOSED", "value": "closed" }] }],
            "relationships": [{
                "from": "Order", "to": "Customer", "type": "ManyToOne",
                "injectedFieldInFrom": "customer(name)"
            }],
            "options": [{ "name": "dto", "value": "mapstruct" }, { "name": "skipClient", "entityNames": ["Order"] }]
        }));

        let object = doc.to_object(false).unwrap();

        assert_eq!(object.application_quantity(), 1);
        assert_eq!(
            object
                .get_application("shop")
                .and_then(|app| app.configuration_option_value("serverPort")),
            Some(&OptionValue::Integer(8081))
        );
        assert_eq!(object.deployment_quantity(), 1);
        assert_eq!(object.entity_names(), vec!["Order"]);
        assert_eq!(
            object.get_entity("Order").unwrap().map(ToString::to_string).as_deref(),
            Some("entity Order {\n  code String required maxlength(20)\n  status Status\n}")
        );
        assert!(object.has_enum("Status"));
        assert_eq!(object.relationship_quantity(), 1);
        assert_eq!(object.option_quantity(), 2);
    }

    #[test]
    fn config_keeps_document_order() {
        let doc: JdlDocument = serde_json::from_str(
            r#"{"applications":[{"config":{"baseName":"b","applicationType":"gateway","authenticationType":"jwt"}}]}"#,
        )
        .unwrap();
        let object = doc.to_object(false).unwrap();
        let rendered = object.to_string();
        let base = rendered.find("baseName").unwrap();
        let kind = rendered.find("applicationType").unwrap();
        assert!(base < kind);
    }

    #[test]
    fn construction_errors_surface() {
        let doc = document(json!({ "entities": [{ "name": "" }] }));
        assert_eq!(doc.to_object(false).unwrap_err(), DomainError::MissingEntityName);

        let doc = document(json!({ "relationships": [{ "from": "A", "to": "B", "type": "ManyToMany" }] }));
        assert_eq!(doc.to_object(false).unwrap_err(), DomainError::InvalidRelationshipShape);

        let doc = document(json!({
            "relationships": [{ "from": "A", "to": "B", "type": "ManyToFew", "injectedFieldInFrom": "b" }]
        }));
        assert_eq!(
            doc.to_object(false).unwrap_err().to_string(),
            "A valid type and at least one injected field must be passed to create a relationship."
        );

        let doc = document(json!({ "options": [{ "name": "dto" }] }));
        assert_eq!(doc.to_object(false).unwrap_err(), DomainError::MissingOptionValue);

        let doc = document(json!({ "applications": [{ "config": { "serverPort": 8080 } }] }));
        assert!(matches!(
            doc.to_object(false).unwrap_err(),
            DomainError::InvalidApplication { .. }
        ));
    }

    #[test]
    fn unidirectional_flag_suppresses_synthesis() {
        let relationships = json!([{
            "from": "A", "to": "B", "type": "OneToMany", "injectedFieldInFrom": "bs"
        }]);

        let bidirectional = document(json!({ "relationships": relationships }));
        let object = bidirectional.to_object(false).unwrap();
        assert_eq!(object.relationships().to_vec()[0].injected_field_in_to(), Some("a"));

        let object = bidirectional.to_object(true).unwrap();
        assert_eq!(object.relationships().to_vec()[0].injected_field_in_to(), None);

        let flagged = document(json!({ "unidirectionalRelationships": true, "relationships": relationships }));
        let object = flagged.to_object(false).unwrap();
        assert_eq!(object.relationships().to_vec()[0].injected_field_in_to(), None);
    }

    #[test]
    fn wildcard_among_names_covers_every_entity() {
        let doc = document(json!({
            "entities": [{ "name": "A" }, { "name": "B" }],
            "options": [{ "name": "microservice", "value": "ms", "entityNames": ["*", "A"], "excludedNames": ["C"] }]
        }));
        let object = doc.to_object(false).unwrap();

        assert_eq!(object.options().to_string(), "microservice * with ms except C");
        assert!(object.is_entity_in_microservice("A"));
        assert!(object.is_entity_in_microservice("B"));
    }

    #[test]
    fn option_values_follow_catalogue() {
        assert_eq!(option_value("skipClient", &json!("true")), OptionValue::Boolean(true));
        assert_eq!(option_value("languages", &json!("en, fr")), OptionValue::list(["en", "fr"]));
        assert_eq!(option_value("custom", &json!(3)), OptionValue::Integer(3));
        assert_eq!(option_value("custom", &json!(["a"])), OptionValue::list(["a"]));
    }
}
