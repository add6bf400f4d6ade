//! Domain value objects: RelationshipType, ValidationRule, FieldType,
//! BlobContent, DeploymentType.
//!
//! # Design
//!
//! These are pure value types, equality-by-value, no identity. Each one owns
//! its string representations (JDL spelling, descriptor spelling) and its
//! `FromStr` parser. Nothing here knows about entities or options.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RelationshipType ─────────────────────────────────────────────────────────

/// The cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipType {
    /// All types, in the order relationships are serialised.
    pub const ALL: [RelationshipType; 4] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany,
    ];

    /// JDL spelling, e.g. `OneToMany`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// Entity descriptor spelling, e.g. `one-to-many`.
    pub const fn as_kebab(&self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        }
    }

    /// The type seen from the other side of the association.
    pub const fn reversed(self) -> Self {
        match self {
            Self::OneToMany => Self::ManyToOne,
            Self::ManyToOne => Self::OneToMany,
            other => other,
        }
    }

    /// Whether the relationship side holds a collection.
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OneToOne" | "one-to-one" => Ok(Self::OneToOne),
            "OneToMany" | "one-to-many" => Ok(Self::OneToMany),
            "ManyToOne" | "many-to-one" => Ok(Self::ManyToOne),
            "ManyToMany" | "many-to-many" => Ok(Self::ManyToMany),
            other => Err(DomainError::UnknownRelationshipType(other.to_string())),
        }
    }
}

// ── ValidationRule ───────────────────────────────────────────────────────────

/// A field validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationRule {
    Required,
    Unique,
    Min,
    Max,
    MinLength,
    MaxLength,
    MinBytes,
    MaxBytes,
    Pattern,
}

impl ValidationRule {
    pub const ALL: [ValidationRule; 9] = [
        Self::Required,
        Self::Unique,
        Self::Min,
        Self::Max,
        Self::MinLength,
        Self::MaxLength,
        Self::MinBytes,
        Self::MaxBytes,
        Self::Pattern,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Unique => "unique",
            Self::Min => "min",
            Self::Max => "max",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::MinBytes => "minbytes",
            Self::MaxBytes => "maxbytes",
            Self::Pattern => "pattern",
        }
    }

    /// Whether the rule carries a companion value (`maxlength(20)`).
    pub const fn requires_value(self) -> bool {
        !matches!(self, Self::Required | Self::Unique)
    }

    /// Descriptor key holding the rule's value, e.g.
    /// `fieldValidateRulesMaxlength`.
    pub const fn companion_key(self) -> Option<&'static str> {
        match self {
            Self::Required | Self::Unique => None,
            Self::Min => Some("fieldValidateRulesMin"),
            Self::Max => Some("fieldValidateRulesMax"),
            Self::MinLength => Some("fieldValidateRulesMinlength"),
            Self::MaxLength => Some("fieldValidateRulesMaxlength"),
            Self::MinBytes => Some("fieldValidateRulesMinbytes"),
            Self::MaxBytes => Some("fieldValidateRulesMaxbytes"),
            Self::Pattern => Some("fieldValidateRulesPattern"),
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| DomainError::UnknownValidationRule(s.to_string()))
    }
}

// ── BlobContent ──────────────────────────────────────────────────────────────

/// What a binary field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobContent {
    Any,
    Image,
    Text,
}

impl BlobContent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

impl FromStr for BlobContent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "image" => Ok(Self::Image),
            "text" => Ok(Self::Text),
            other => Err(DomainError::UnknownBlobContent(other.to_string())),
        }
    }
}

// ── FieldType ────────────────────────────────────────────────────────────────

/// A field type: one of the JHipster built-ins or the name of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Long,
    BigDecimal,
    Float,
    Double,
    Boolean,
    LocalDate,
    ZonedDateTime,
    Instant,
    Duration,
    Uuid,
    /// JDL `Blob` / `AnyBlob`.
    Blob,
    ImageBlob,
    TextBlob,
    /// Descriptor `byte[]`, refined by `fieldTypeBlobContent`.
    Bytes,
    /// Cassandra binary type.
    ByteBuffer,
    /// Anything else names an enumeration.
    Enum(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::BigDecimal => "BigDecimal",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::LocalDate => "LocalDate",
            Self::ZonedDateTime => "ZonedDateTime",
            Self::Instant => "Instant",
            Self::Duration => "Duration",
            Self::Uuid => "UUID",
            Self::Blob => "Blob",
            Self::ImageBlob => "ImageBlob",
            Self::TextBlob => "TextBlob",
            Self::Bytes => "byte[]",
            Self::ByteBuffer => "ByteBuffer",
            Self::Enum(name) => name,
        }
    }

    /// Parse a type name. Never fails: unknown names are enum references.
    pub fn parse(s: &str) -> Self {
        match s {
            "String" => Self::String,
            "Integer" => Self::Integer,
            "Long" => Self::Long,
            "BigDecimal" => Self::BigDecimal,
            "Float" => Self::Float,
            "Double" => Self::Double,
            "Boolean" => Self::Boolean,
            "LocalDate" => Self::LocalDate,
            "ZonedDateTime" => Self::ZonedDateTime,
            "Instant" => Self::Instant,
            "Duration" => Self::Duration,
            "UUID" => Self::Uuid,
            "Blob" | "AnyBlob" => Self::Blob,
            "ImageBlob" => Self::ImageBlob,
            "TextBlob" => Self::TextBlob,
            "byte[]" => Self::Bytes,
            "ByteBuffer" => Self::ByteBuffer,
            other => Self::Enum(other.to_string()),
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Date and time types that pull temporal imports into templates.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Instant | Self::ZonedDateTime | Self::LocalDate | Self::Duration
        )
    }

    /// Binary types, in JDL or descriptor spelling.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Blob | Self::ImageBlob | Self::TextBlob | Self::Bytes | Self::ByteBuffer
        )
    }

    /// JDL blob flavours map to `byte[]` plus a content kind.
    pub fn blob_content(&self) -> Option<BlobContent> {
        match self {
            Self::Blob => Some(BlobContent::Any),
            Self::ImageBlob => Some(BlobContent::Image),
            Self::TextBlob => Some(BlobContent::Text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DeploymentType ───────────────────────────────────────────────────────────

/// Deployment targets a JDL `deployment` block can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentType {
    DockerCompose,
    Kubernetes,
    Openshift,
}

impl DeploymentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DockerCompose => "docker-compose",
            Self::Kubernetes => "kubernetes",
            Self::Openshift => "openshift",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker-compose" | "dockerCompose" => Ok(Self::DockerCompose),
            "kubernetes" | "k8s" => Ok(Self::Kubernetes),
            "openshift" => Ok(Self::Openshift),
            "" => Err(DomainError::MissingDeploymentType),
            other => Err(DomainError::UnknownDeploymentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_type_parses_both_spellings() {
        assert_eq!(
            "OneToMany".parse::<RelationshipType>().unwrap(),
            RelationshipType::OneToMany
        );
        assert_eq!(
            "many-to-many".parse::<RelationshipType>().unwrap(),
            RelationshipType::ManyToMany
        );
        assert!("OneToFew".parse::<RelationshipType>().is_err());
    }

    #[test]
    fn relationship_type_reversal() {
        assert_eq!(
            RelationshipType::OneToMany.reversed(),
            RelationshipType::ManyToOne
        );
        assert_eq!(
            RelationshipType::ManyToMany.reversed(),
            RelationshipType::ManyToMany
        );
    }

    #[test]
    fn validation_rule_companions() {
        assert_eq!(ValidationRule::Required.companion_key(), None);
        assert_eq!(
            ValidationRule::MaxLength.companion_key(),
            Some("fieldValidateRulesMaxlength")
        );
        assert!(ValidationRule::Pattern.requires_value());
        assert!(!ValidationRule::Unique.requires_value());
    }

    #[test]
    fn validation_rule_from_str_is_exact() {
        assert_eq!(
            "minbytes".parse::<ValidationRule>().unwrap(),
            ValidationRule::MinBytes
        );
        assert!("MinBytes".parse::<ValidationRule>().is_err());
    }

    #[test]
    fn field_type_unknown_names_are_enums() {
        assert_eq!(FieldType::parse("Color"), FieldType::Enum("Color".into()));
        assert!(FieldType::parse("Color").is_enum());
        assert!(!FieldType::parse("String").is_enum());
    }

    #[test]
    fn field_type_classification() {
        assert!(FieldType::parse("Instant").is_temporal());
        assert!(FieldType::parse("byte[]").is_binary());
        assert_eq!(
            FieldType::parse("AnyBlob").blob_content(),
            Some(BlobContent::Any)
        );
        assert_eq!(FieldType::parse("UUID").as_str(), "UUID");
    }

    #[test]
    fn deployment_type_from_str() {
        assert_eq!(
            "docker-compose".parse::<DeploymentType>().unwrap(),
            DeploymentType::DockerCompose
        );
        assert_eq!(
            "".parse::<DeploymentType>().unwrap_err(),
            DomainError::MissingDeploymentType
        );
    }
}
