use std::fmt;

use crate::domain::{
    common::{OrderedMap, doc_comment},
    error::{DomainError, DomainResult},
    value_objects::{FieldType, ValidationRule},
};

/// A single constraint attached to a field, e.g. `minlength(5)`.
///
/// `JdlValidation::default()` is the bare `required` rule, which is what an
/// unqualified validation means in JDL documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlValidation {
    rule: ValidationRule,
    value: Option<String>,
}

impl JdlValidation {
    pub fn new(rule: ValidationRule) -> Self {
        Self { rule, value: None }
    }

    pub fn with_value(rule: ValidationRule, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            rule,
            value: (!value.is_empty()).then_some(value),
        }
    }

    pub fn rule(&self) -> ValidationRule {
        self.rule
    }

    pub fn name(&self) -> &'static str {
        self.rule.as_str()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Default for JdlValidation {
    fn default() -> Self {
        Self::new(ValidationRule::Required)
    }
}

impl fmt::Display for JdlValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.rule) {
            (None, rule) => f.write_str(rule.as_str()),
            (Some(value), ValidationRule::Pattern) => write!(f, "pattern(/{value}/)"),
            (Some(value), rule) => write!(f, "{rule}({value})"),
        }
    }
}

/// A named, typed entity attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct JdlField {
    name: String,
    field_type: String,
    comment: Option<String>,
    validations: OrderedMap<ValidationRule, JdlValidation>,
}

impl JdlField {
    /// Both the name and the type are mandatory.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let field_type = field_type.into();
        if name.is_empty() || field_type.is_empty() {
            return Err(DomainError::MissingFieldNameOrType);
        }
        Ok(Self {
            name,
            field_type,
            comment: None,
            validations: OrderedMap::new(),
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    pub fn with_validation(mut self, validation: JdlValidation) -> Self {
        self.add_validation(validation);
        self
    }

    /// Validations are keyed by rule; re-adding a rule replaces it.
    pub fn add_validation(&mut self, validation: JdlValidation) {
        self.validations.insert(validation.rule(), validation);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type as written in the document (`AnyBlob`, `Color`, ...).
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn kind(&self) -> FieldType {
        FieldType::parse(&self.field_type)
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn validation(&self, rule: ValidationRule) -> Option<&JdlValidation> {
        self.validations.get(&rule)
    }

    pub fn validations(&self) -> impl Iterator<Item = &JdlValidation> {
        self.validations.values()
    }

    pub fn validation_quantity(&self) -> usize {
        self.validations.len()
    }
}

impl fmt::Display for JdlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            f.write_str(&doc_comment(comment, "  "))?;
        }
        write!(f, "{} {}", self.name, self.field_type)?;
        for validation in self.validations.values() {
            write!(f, " {validation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validation_is_required() {
        let validation = JdlValidation::default();
        assert_eq!(validation.rule(), ValidationRule::Required);
        assert_eq!(validation.value(), None);
        assert_eq!(validation.to_string(), "required");
    }

    #[test]
    fn validation_renders_value() {
        assert_eq!(
            JdlValidation::with_value(ValidationRule::MinLength, "5").to_string(),
            "minlength(5)"
        );
        assert_eq!(
            JdlValidation::with_value(ValidationRule::Pattern, "^[A-Z]+$").to_string(),
            "pattern(/^[A-Z]+$/)"
        );
    }

    #[test]
    fn empty_value_is_absent() {
        assert_eq!(
            JdlValidation::with_value(ValidationRule::Max, "").to_string(),
            "max"
        );
    }

    #[test]
    fn field_requires_name_and_type() {
        assert_eq!(
            JdlField::new("", "String").unwrap_err().to_string(),
            "The field name and type are mandatory to create a field."
        );
        assert!(JdlField::new("name", "").is_err());
    }

    #[test]
    fn field_renders_validations_in_order() {
        let field = JdlField::new("name", "String")
            .unwrap()
            .with_validation(JdlValidation::default())
            .with_validation(JdlValidation::with_value(ValidationRule::MaxLength, "20"));
        assert_eq!(field.to_string(), "name String required maxlength(20)");
        assert_eq!(field.validation_quantity(), 2);
    }

    #[test]
    fn readding_a_rule_replaces_it() {
        let mut field = JdlField::new("age", "Integer").unwrap();
        field.add_validation(JdlValidation::with_value(ValidationRule::Min, "1"));
        field.add_validation(JdlValidation::with_value(ValidationRule::Min, "18"));
        assert_eq!(field.validation_quantity(), 1);
        assert_eq!(field.to_string(), "age Integer min(18)");
    }

    #[test]
    fn field_renders_comment_block() {
        let field = JdlField::new("name", "String")
            .unwrap()
            .with_comment("the name");
        assert_eq!(field.to_string(), "/**\n   * the name\n   */\n  name String");
    }
}
