use std::fmt;

use crate::domain::{
    common::{OrderedMap, doc_comment},
    error::{DomainError, DomainResult},
};

use super::field::JdlField;

/// A named record with an ordered field map.
#[derive(Debug, Clone, PartialEq)]
pub struct JdlEntity {
    name: String,
    table_name: String,
    comment: Option<String>,
    fields: OrderedMap<String, JdlField>,
}

impl JdlEntity {
    /// Create an entity whose table name defaults to its name.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingEntityName);
        }
        Ok(Self {
            table_name: name.clone(),
            name,
            comment: None,
            fields: OrderedMap::new(),
        })
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        let table_name = table_name.into();
        if !table_name.is_empty() {
            self.table_name = table_name;
        }
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = JdlField>) -> Self {
        self.add_fields(fields);
        self
    }

    /// Fields are keyed by name; the last one added under a name wins.
    pub fn add_field(&mut self, field: JdlField) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = JdlField>) {
        for field in fields {
            self.add_field(field);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&JdlField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &JdlField> {
        self.fields.values()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn field_quantity(&self) -> usize {
        self.fields.len()
    }

    pub fn for_each_field<F: FnMut(&JdlField)>(&self, f: F) {
        self.fields.values().for_each(f);
    }
}

impl fmt::Display for JdlEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            f.write_str(&doc_comment(comment, ""))?;
        }
        write!(f, "entity {}", self.name)?;
        if self.table_name != self.name {
            write!(f, " ({})", self.table_name)?;
        }
        if !self.fields.is_empty() {
            let fields: Vec<String> = self.fields.values().map(|fd| format!("  {fd}")).collect();
            write!(f, " {{\n{}\n}}", fields.join("\n"))?;
        }
        Ok(())
    }
}
