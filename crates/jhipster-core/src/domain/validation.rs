use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    descriptor::{EntityDescriptor, FieldDescriptor, RelationshipDescriptor},
    error::{DomainError, DomainResult},
    value_objects::{RelationshipType, ValidationRule},
};

/// Structural validation of entity descriptors.
///
/// Validation is pure: it reports violations and never touches the
/// descriptor. Preparation refuses descriptors with any violation.
pub struct DescriptorValidator;

impl DescriptorValidator {
    /// Every violation found, in declaration order.
    pub fn violations(descriptor: &EntityDescriptor) -> Vec<String> {
        let file = descriptor.file_name();
        let mut violations = Vec::new();
        for field in &descriptor.fields {
            Self::check_field(&file, field, &mut violations);
        }
        for relationship in &descriptor.relationships {
            Self::check_relationship(&file, relationship, &mut violations);
        }
        violations
    }

    pub fn validate(descriptor: &EntityDescriptor) -> DomainResult<()> {
        let violations = Self::violations(descriptor);
        if violations.is_empty() {
            return Ok(());
        }
        Err(DomainError::InvalidDescriptor {
            entity: descriptor.name.clone(),
            violations,
        })
    }

    fn check_field(file: &str, field: &FieldDescriptor, violations: &mut Vec<String>) {
        let json = to_json(field);
        if field.field_name.as_deref().is_none_or(str::is_empty) {
            violations.push(format!("fieldName is missing in {file} for field {json}"));
        }
        if field.field_type.as_deref().is_none_or(str::is_empty) {
            violations.push(format!("fieldType is missing in {file} for field {json}"));
        }
        for name in &field.field_validate_rules {
            let Ok(rule) = ValidationRule::from_str(name) else {
                let supported: Vec<&str> = ValidationRule::ALL.iter().map(|r| r.as_str()).collect();
                violations.push(format!(
                    "fieldValidateRules contains unknown validation rule {name} in {file} for field {json} [supported validation rules {}]",
                    supported.join(", ")
                ));
                continue;
            };
            if let Some(key) = rule.companion_key() {
                let present = field.companion(rule).is_some_and(|value| !value.is_null());
                if !present {
                    violations.push(format!("{key} is missing in {file} for field {json}"));
                }
            }
        }
    }

    fn check_relationship(file: &str, relationship: &RelationshipDescriptor, violations: &mut Vec<String>) {
        let json = to_json(relationship);
        if relationship.other_entity_name.as_deref().is_none_or(str::is_empty) {
            violations.push(format!("otherEntityName is missing in {file} for relationship {json}"));
        }
        match relationship.relationship_type.as_deref() {
            None | Some("") => {
                violations.push(format!("relationshipType is missing in {file} for relationship {json}"));
            }
            Some(kind) if RelationshipType::from_str(kind).is_err() => {
                violations.push(format!(
                    "relationshipType {kind} is not supported in {file} for relationship {json}"
                ));
            }
            Some(_) => {}
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Violations of one descriptor; empty when it is well formed.
pub fn validate_descriptor(descriptor: &EntityDescriptor) -> Vec<String> {
    DescriptorValidator::violations(descriptor)
}
