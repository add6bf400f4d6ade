//! Entity descriptors: the `.jhipster/<Entity>.json` files.
//!
//! Descriptors are raw declarations. Mandatory attributes are optional here
//! so that a malformed file still deserializes and can be reported by
//! [`validate_descriptor`](crate::domain::validation::validate_descriptor).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{BlobContent, ValidationRule};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(rename = "angularJSSuffix", skip_serializing_if = "Option::is_none")]
    pub angular_js_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_root_folder: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub skip_client: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub skip_server: bool,
    #[serde(default = "default_true")]
    pub fluent_methods: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub jpa_metamodel_filtering: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub embedded: bool,

    /// Where the descriptor was read from, when it came from disk.
    #[serde(skip)]
    pub source_path: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_true() -> bool {
    true
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fluent_methods: true,
            ..Self::default()
        }
    }

    /// Path of the descriptor file, used in diagnostics.
    ///
    /// Falls back to the default `.jhipster/<Entity>.json` location for
    /// descriptors that were never read from disk.
    pub fn file_name(&self) -> String {
        match &self.source_path {
            Some(path) => path.clone(),
            None => format!(".jhipster/{}.json", self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Comma separated enum keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type_blob_content: Option<BlobContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_validate_rules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_minlength: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_maxlength: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_minbytes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_maxbytes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_pattern: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub id: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_name: Some(name.into()),
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        self.field_name.as_deref().unwrap_or_default()
    }

    /// The companion value a rule reads, e.g. `fieldValidateRulesMax`.
    pub fn companion(&self, rule: ValidationRule) -> Option<&Value> {
        match rule {
            ValidationRule::Required | ValidationRule::Unique => None,
            ValidationRule::Min => self.field_validate_rules_min.as_ref(),
            ValidationRule::Max => self.field_validate_rules_max.as_ref(),
            ValidationRule::MinLength => self.field_validate_rules_minlength.as_ref(),
            ValidationRule::MaxLength => self.field_validate_rules_maxlength.as_ref(),
            ValidationRule::MinBytes => self.field_validate_rules_minbytes.as_ref(),
            ValidationRule::MaxBytes => self.field_validate_rules_maxbytes.as_ref(),
            ValidationRule::Pattern => self.field_validate_rules_pattern.as_ref(),
        }
    }

    pub fn set_companion(&mut self, rule: ValidationRule, value: Value) {
        let slot = match rule {
            ValidationRule::Required | ValidationRule::Unique => return,
            ValidationRule::Min => &mut self.field_validate_rules_min,
            ValidationRule::Max => &mut self.field_validate_rules_max,
            ValidationRule::MinLength => &mut self.field_validate_rules_minlength,
            ValidationRule::MaxLength => &mut self.field_validate_rules_maxlength,
            ValidationRule::MinBytes => &mut self.field_validate_rules_minbytes,
            ValidationRule::MaxBytes => &mut self.field_validate_rules_maxbytes,
            ValidationRule::Pattern => &mut self.field_validate_rules_pattern,
        };
        *slot = Some(value);
    }

    pub fn has_rule(&self, rule: ValidationRule) -> bool {
        self.field_validate_rules.iter().any(|r| r == rule.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipDescriptor {
    /// Kebab spelling, e.g. `many-to-one`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_relationship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationship_validate_rules: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub id: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
}

impl RelationshipDescriptor {
    pub fn is_required(&self) -> bool {
        self.relationship_validate_rules
            .iter()
            .any(|r| r == ValidationRule::Required.as_str())
    }
}
