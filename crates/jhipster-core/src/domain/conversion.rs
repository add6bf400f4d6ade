//! JDL objects to entity descriptors.
//!
//! Produces one [`EntityDescriptor`] per entity: fields with enum values and
//! blob content, both sides of every relationship, and the option values
//! that apply to the entity.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use convert_case::{Case, Casing};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::{
    common::lower_first,
    descriptor::{EntityDescriptor, FieldDescriptor, RelationshipDescriptor},
    jdl::{JdlEntity, JdlField, JdlObject, JdlOption, JdlRelationship, binary, unary},
    value_objects::{BlobContent, FieldType, RelationshipType, ValidationRule},
};

/// Format of `changelogDate`.
pub const CHANGELOG_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Changelog date of the first entity; each following entity gets one
    /// more second.
    pub creation_timestamp: DateTime<Utc>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            creation_timestamp: Utc::now(),
        }
    }
}

/// `name(display)` injected fields name the relationship and the field
/// shown for the other side.
fn split_injected_field(injected: &str) -> (String, Option<String>) {
    match injected.split_once('(') {
        Some((name, rest)) => {
            let display = rest.trim_end_matches(')').trim();
            (
                name.trim().to_string(),
                (!display.is_empty()).then(|| display.to_string()),
            )
        }
        None => (injected.trim().to_string(), None),
    }
}

/// Validation values are numbers when they look like numbers.
fn companion_value(rule: ValidationRule, value: &str) -> Value {
    if rule == ValidationRule::Pattern {
        return Value::String(value.to_string());
    }
    match value.parse::<i64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::String(value.to_string()),
    }
}

fn convert_field(field: &JdlField, object: &JdlObject) -> FieldDescriptor {
    let kind = field.kind();
    let mut descriptor = FieldDescriptor::new(field.name(), field.field_type());
    descriptor.javadoc = field.comment().map(str::to_string);

    if let Some(content) = kind.blob_content() {
        descriptor.field_type = Some(FieldType::Bytes.as_str().to_string());
        descriptor.field_type_blob_content = Some(content);
    } else if kind == FieldType::Bytes {
        descriptor.field_type_blob_content = Some(BlobContent::Any);
    }

    if let Some(en) = object.get_enum(field.field_type()) {
        descriptor.field_values = Some(en.keys().collect::<Vec<_>>().join(","));
    }

    for validation in field.validations() {
        descriptor
            .field_validate_rules
            .push(validation.name().to_string());
        if let Some(value) = validation.value() {
            descriptor.set_companion(validation.rule(), companion_value(validation.rule(), value));
        }
    }
    descriptor
}

fn convert_entity(entity: &JdlEntity, object: &JdlObject, changelog_date: String) -> EntityDescriptor {
    let mut descriptor = EntityDescriptor::new(entity.name());
    descriptor.entity_table_name = Some(if entity.table_name() == entity.name() {
        entity.name().to_case(Case::Snake)
    } else {
        entity.table_name().to_string()
    });
    descriptor.javadoc = entity.comment().map(str::to_string);
    descriptor.fields = entity.fields().map(|f| convert_field(f, object)).collect();
    descriptor.changelog_date = Some(changelog_date);
    descriptor
}

fn required_rules(required: bool) -> Vec<String> {
    if required {
        vec![ValidationRule::Required.as_str().to_string()]
    } else {
        Vec::new()
    }
}

fn source_side(relationship: &JdlRelationship) -> RelationshipDescriptor {
    let relationship_type = relationship.relationship_type();
    let (name, display) = match relationship.injected_field_in_from() {
        Some(injected) => split_injected_field(injected),
        None => (lower_first(relationship.to()), None),
    };
    RelationshipDescriptor {
        relationship_type: Some(relationship_type.as_kebab().to_string()),
        other_entity_name: Some(lower_first(relationship.to())),
        relationship_name: Some(name),
        other_entity_field: display,
        other_entity_relationship_name: relationship
            .injected_field_in_to()
            .map(|injected| split_injected_field(injected).0),
        owner_side: matches!(
            relationship_type,
            RelationshipType::OneToOne | RelationshipType::ManyToMany
        )
        .then_some(true),
        relationship_validate_rules: required_rules(relationship.is_injected_field_in_from_required()),
        id: relationship.options().source.contains_key("id"),
        javadoc: relationship.comment_in_from().map(str::to_string),
    }
}

fn destination_side(relationship: &JdlRelationship, injected: &str) -> RelationshipDescriptor {
    let relationship_type = relationship.relationship_type();
    let (name, display) = split_injected_field(injected);
    RelationshipDescriptor {
        relationship_type: Some(relationship_type.reversed().as_kebab().to_string()),
        other_entity_name: Some(lower_first(relationship.from())),
        relationship_name: Some(name),
        other_entity_field: display,
        other_entity_relationship_name: Some(match relationship.injected_field_in_from() {
            Some(injected) => split_injected_field(injected).0,
            None => lower_first(relationship.to()),
        }),
        owner_side: matches!(
            relationship_type,
            RelationshipType::OneToOne | RelationshipType::ManyToMany
        )
        .then_some(false),
        relationship_validate_rules: required_rules(relationship.is_injected_field_in_to_required()),
        id: relationship.options().destination.contains_key("id"),
        javadoc: relationship.comment_in_to().map(str::to_string),
    }
}

fn apply_option(descriptor: &mut EntityDescriptor, option: &JdlOption) {
    let value = option.value().map(str::to_string);
    match option.name() {
        binary::DTO => descriptor.dto = value,
        binary::SERVICE => descriptor.service = value,
        binary::PAGINATION => descriptor.pagination = value,
        binary::SEARCH => descriptor.search_engine = value,
        binary::MICROSERVICE => descriptor.microservice_name = value,
        binary::ANGULAR_SUFFIX => descriptor.angular_js_suffix = value,
        binary::CLIENT_ROOT_FOLDER => descriptor.client_root_folder = value,
        unary::SKIP_CLIENT => descriptor.skip_client = true,
        unary::SKIP_SERVER => descriptor.skip_server = true,
        unary::NO_FLUENT_METHOD => descriptor.fluent_methods = false,
        unary::FILTER => descriptor.jpa_metamodel_filtering = true,
        unary::READ_ONLY => descriptor.read_only = true,
        unary::EMBEDDED => descriptor.embedded = true,
        other => debug!(option = other, "Ignoring option without a descriptor attribute"),
    }
}

/// Convert every entity of `object` to its descriptor, in declaration order.
#[instrument(skip_all, fields(entities = object.entity_quantity()))]
pub fn convert_to_descriptors(object: &JdlObject, options: &ConversionOptions) -> Vec<EntityDescriptor> {
    let mut descriptors: Vec<EntityDescriptor> = object
        .entities()
        .into_iter()
        .enumerate()
        .map(|(index, entity)| {
            let date = i64::try_from(index)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|offset| options.creation_timestamp.checked_add_signed(offset))
                .unwrap_or(options.creation_timestamp);
            convert_entity(entity, object, date.format(CHANGELOG_DATE_FORMAT).to_string())
        })
        .collect();

    let positions: HashMap<String, usize> = descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| (descriptor.name.clone(), index))
        .collect();

    for relationship in object.relationships().iter() {
        match positions.get(relationship.from()) {
            Some(&index) => descriptors[index].relationships.push(source_side(relationship)),
            None => debug!(entity = relationship.from(), "Relationship source is not a declared entity"),
        }
        if let Some(injected) = relationship.injected_field_in_to() {
            match positions.get(relationship.to()) {
                Some(&index) => descriptors[index]
                    .relationships
                    .push(destination_side(relationship, injected)),
                None => debug!(entity = relationship.to(), "Relationship destination is not a declared entity"),
            }
        }
    }

    for option in object.get_options() {
        for name in object.resolve_option_entity_names(option).iter() {
            if let Some(&index) = positions.get(name.as_str()) {
                apply_option(&mut descriptors[index], option);
            }
        }
    }

    for application in object.applications() {
        for option in application.options().get_options() {
            for name in application.entity_names().iter() {
                if !option.scope().covers(name) {
                    continue;
                }
                if let Some(&index) = positions.get(name) {
                    apply_option(&mut descriptors[index], option);
                }
            }
        }
    }

    for descriptor in &mut descriptors {
        let mapstruct = descriptor.dto.as_deref() == Some(binary::values::MAPSTRUCT);
        let no_service = descriptor
            .service
            .as_deref()
            .is_none_or(|service| service == binary::values::NO);
        if mapstruct && no_service {
            descriptor.service = Some(binary::values::SERVICE_CLASS.to_string());
        }
    }

    descriptors
}
