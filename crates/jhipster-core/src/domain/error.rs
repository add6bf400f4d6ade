// ============================================================================
// domain/error.rs - JDL DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may collect and re-report them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Construction messages are part of the public contract: callers and tests
/// match on the exact rendered strings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    #[error("The entity name is mandatory to create an entity.")]
    MissingEntityName,

    #[error("The field name and type are mandatory to create a field.")]
    MissingFieldNameOrType,

    #[error("The enum's name must be passed to create an enum.")]
    MissingEnumName,

    #[error("Source and destination entities must be passed to create a relationship.")]
    MissingRelationshipEntities,

    #[error("A valid type and at least one injected field must be passed to create a relationship.")]
    InvalidRelationshipShape,

    #[error("The option's name must be passed to create an option.")]
    MissingOptionName,

    #[error("A binary option must have a value.")]
    MissingOptionValue,

    #[error("The deploymentType is mandatory to create a deployment.")]
    MissingDeploymentType,

    #[error("Unknown deployment type '{0}'.")]
    UnknownDeploymentType(String),

    #[error("An entity name has to be passed so as to be {action} the option.")]
    MissingOptionEntityName { action: &'static str },

    #[error("An entity name has to be passed so as to be added to the application.")]
    MissingApplicationEntityName,

    #[error("The configuration option name is mandatory to create an option.")]
    MissingConfigurationOptionName,

    // ========================================================================
    // Aggregate Errors
    // ========================================================================
    #[error("Can't add invalid application. Error: {reason}")]
    InvalidApplication { reason: String },

    #[error("An entity name must be passed so as to be retrieved.")]
    MissingLookupName,

    #[error("Can't merge nil JDL objects.")]
    NilMerge,

    // ========================================================================
    // Parsing Errors
    // ========================================================================
    #[error("Unknown relationship type '{0}'.")]
    UnknownRelationshipType(String),

    #[error("Unknown validation rule '{0}'.")]
    UnknownValidationRule(String),

    #[error("Unknown blob content '{0}'.")]
    UnknownBlobContent(String),

    #[error("Unknown database type '{0}'.")]
    UnknownDatabaseType(String),

    // ========================================================================
    // Entity Preparation Errors
    // ========================================================================
    /// One or more structural violations found while validating an entity
    /// descriptor. Each message names the offending file and attribute.
    #[error("{}", violations.join("\n"))]
    InvalidDescriptor {
        entity: String,
        violations: Vec<String>,
    },

    #[error("Error at entity {entity}: could not find the entity of the relationship {relationship}.")]
    UnknownRelatedEntity {
        entity: String,
        relationship: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRelationshipShape => vec![
                "Declare the relationship as OneToOne, OneToMany, ManyToOne or ManyToMany".into(),
                "Name at least one side, e.g. `A{b} to B`".into(),
            ],
            Self::InvalidApplication { .. } => vec![
                "Every application needs a `baseName` in its config block".into(),
            ],
            Self::InvalidDescriptor { entity, .. } => vec![
                format!("Fix .jhipster/{entity}.json and run the command again"),
                "Supported validation rules: required, unique, min, max, minlength, maxlength, minbytes, maxbytes, pattern".into(),
            ],
            Self::UnknownRelatedEntity { relationship, .. } => vec![
                format!("Declare the entity targeted by '{relationship}'"),
                "Or point the relationship at an existing entity".into(),
            ],
            Self::UnknownDeploymentType(_) => vec![
                "Supported deployment types: docker-compose, kubernetes, openshift".into(),
            ],
            Self::UnknownDatabaseType(_) => vec![
                "Supported database types: sql, mongodb, cassandra, couchbase, neo4j, no".into(),
            ],
            Self::NilMerge => vec!["Pass at least one JDL document to merge".into()],
            _ => vec!["See the JDL documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownRelatedEntity { .. } => ErrorCategory::NotFound,
            Self::NilMerge => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
