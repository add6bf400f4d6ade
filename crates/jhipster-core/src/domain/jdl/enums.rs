use std::fmt;

use crate::domain::{
    common::doc_comment,
    error::{DomainError, DomainResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlEnumValue {
    pub key: String,
    pub value: Option<String>,
    pub comment: Option<String>,
}

impl JdlEnumValue {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            comment: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl fmt::Display for JdlEnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            f.write_str(&doc_comment(comment, "  "))?;
        }
        match &self.value {
            Some(value) => write!(f, "{} ({value})", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// A named enumeration. Values keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlEnum {
    name: String,
    values: Vec<JdlEnumValue>,
    comment: Option<String>,
}

impl JdlEnum {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingEnumName);
        }
        Ok(Self {
            name,
            values: Vec::new(),
            comment: None,
        })
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = JdlEnumValue>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    pub fn add_value(&mut self, value: JdlEnumValue) {
        self.values.push(value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn values(&self) -> &[JdlEnumValue] {
        &self.values
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.key.as_str())
    }
}

impl fmt::Display for JdlEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = &self.comment {
            f.write_str(&doc_comment(comment, ""))?;
        }
        let values: Vec<String> = self.values.iter().map(|v| format!("  {v}")).collect();
        write!(f, "enum {} {{\n{}\n}}", self.name, values.join(",\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_requires_a_name() {
        assert_eq!(
            JdlEnum::new("").unwrap_err().to_string(),
            "The enum's name must be passed to create an enum."
        );
    }

    #[test]
    fn enum_renders_values_in_declaration_order() {
        let en = JdlEnum::new("Country").unwrap().with_values([
            JdlEnumValue::new("FRANCE").with_value("fr"),
            JdlEnumValue::new("ITALY"),
            JdlEnumValue::new("BELGIUM"),
        ]);

        assert_eq!(
            en.to_string(),
            "enum Country {\n  FRANCE (fr),\n  ITALY,\n  BELGIUM\n}"
        );
        assert_eq!(en.keys().collect::<Vec<_>>(), vec!["FRANCE", "ITALY", "BELGIUM"]);
    }

    #[test]
    fn enum_comment_renders_above_declaration() {
        let en = JdlEnum::new("Size")
            .unwrap()
            .with_comment("t-shirt sizes")
            .with_values([JdlEnumValue::new("S")]);
        assert_eq!(
            en.to_string(),
            "/**\n * t-shirt sizes\n */\nenum Size {\n  S\n}"
        );
    }
}
