//! Template-ready entities.
//!
//! Every type here serializes in camelCase: the templating layer reads the
//! prepared entity as a plain property bag.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    common::{OrderedMap, lower_first, upper_first},
    descriptor::EntityDescriptor,
    value_objects::BlobContent,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedEntity {
    pub name: String,
    pub entity_class: String,
    pub entity_instance: String,
    pub entity_table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_date: Option<String>,

    pub dto: String,
    pub service: String,
    pub pagination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_root_folder: Option<String>,
    pub skip_client: bool,
    pub skip_server: bool,
    pub fluent_methods: bool,
    pub jpa_metamodel_filtering: bool,
    pub read_only: bool,
    pub embedded: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    pub fields: Vec<PreparedField>,
    pub relationships: Vec<PreparedRelationship>,

    pub different_types: Vec<String>,
    #[serde(flatten)]
    pub field_flags: FieldFlags,
    #[serde(flatten)]
    pub relationship_flags: RelationshipFlags,
    /// Relationship names grouped by the other entity's class name.
    pub different_relationships: OrderedMap<String, Vec<String>>,
}

impl PreparedEntity {
    /// Copy the declared attributes; derived ones are filled by the passes.
    pub fn from_descriptor(descriptor: &EntityDescriptor) -> Self {
        let no = || "no".to_string();
        Self {
            name: descriptor.name.clone(),
            entity_class: upper_first(&descriptor.name),
            entity_instance: lower_first(&descriptor.name),
            entity_table_name: descriptor
                .entity_table_name
                .clone()
                .unwrap_or_else(|| descriptor.name.clone()),
            javadoc: descriptor.javadoc.clone(),
            changelog_date: descriptor.changelog_date.clone(),
            dto: descriptor.dto.clone().unwrap_or_else(no),
            service: descriptor.service.clone().unwrap_or_else(no),
            pagination: descriptor.pagination.clone().unwrap_or_else(no),
            search_engine: descriptor.search_engine.clone(),
            microservice_name: descriptor.microservice_name.clone(),
            client_root_folder: descriptor.client_root_folder.clone(),
            skip_client: descriptor.skip_client,
            skip_server: descriptor.skip_server,
            fluent_methods: descriptor.fluent_methods,
            jpa_metamodel_filtering: descriptor.jpa_metamodel_filtering,
            read_only: descriptor.read_only,
            embedded: descriptor.embedded,
            ..Self::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&PreparedField> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&PreparedRelationship> {
        self.relationships.iter().find(|r| r.relationship_name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedField {
    pub field_name: String,
    pub field_type: String,
    pub field_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type_blob_content: Option<BlobContent>,
    pub field_validate_rules: Vec<String>,
    /// Companion values keyed by descriptor attribute, e.g.
    /// `fieldValidateRulesMaxlength`.
    #[serde(flatten)]
    pub field_validate_values: OrderedMap<String, Value>,
    pub id: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,

    pub field_name_capitalized: String,
    pub field_name_humanized: String,
    pub field_name_underscored: String,
    pub field_is_enum: bool,
    pub field_validate: bool,
    pub field_validation_required: bool,
    pub field_validation_unique: bool,
    pub field_type_temporal: bool,
    pub field_type_binary: bool,
    pub field_type_blob: bool,
    pub field_type_image_blob: bool,
    pub field_type_text_blob: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedRelationship {
    pub relationship_name: String,
    pub relationship_name_capitalized: String,
    pub relationship_type: String,
    pub other_entity_name: String,
    pub other_entity_name_capitalized: String,
    pub other_entity_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_relationship_name: Option<String>,
    pub owner_side: bool,
    pub collection: bool,
    pub relationship_required: bool,
    pub other_entity_is_embedded: bool,
    pub other_entity_is_built_in: bool,
    pub id: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyField {
    pub field_name: String,
    pub field_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub name: String,
    /// Type of a single-field key, `composite` otherwise.
    #[serde(rename = "type")]
    pub key_type: String,
    pub fields: Vec<PrimaryKeyField>,
    pub composite: bool,
    pub derived: bool,
    /// Relationship the key is derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(rename = "typeUUID")]
    pub type_uuid: bool,
    pub type_string: bool,
    pub type_long: bool,
    pub type_integer: bool,
    pub type_numeric: bool,
    pub auto_generate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFlags {
    pub fields_contain_date: bool,
    pub fields_contain_instant: bool,
    pub fields_contain_zoned_date_time: bool,
    pub fields_contain_local_date: bool,
    pub fields_contain_duration: bool,
    pub fields_contain_big_decimal: bool,
    #[serde(rename = "fieldsContainUUID")]
    pub fields_contain_uuid: bool,
    pub fields_contain_blob: bool,
    pub fields_contain_image_blob: bool,
    pub fields_contain_text_blob: bool,
    pub fields_contain_blob_or_image: bool,
    pub validation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipFlags {
    pub fields_contain_owner_many_to_many: bool,
    pub fields_contain_owner_one_to_one: bool,
    pub fields_contain_no_owner_one_to_one: bool,
    pub fields_contain_one_to_many: bool,
    pub fields_contain_many_to_one: bool,
    pub fields_contain_embedded: bool,
}
