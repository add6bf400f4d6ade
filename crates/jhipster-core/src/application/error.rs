//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Cannot read JDL document {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },

    #[error("Malformed JDL document {path}: {reason}")]
    DocumentMalformed { path: PathBuf, reason: String },

    #[error("Unsupported JDL document format: {path}")]
    UnsupportedDocumentFormat { path: PathBuf },

    #[error("No JDL document was given")]
    NoDocuments,

    #[error("Entity descriptor store error at {path}: {reason}")]
    DescriptorStore { path: PathBuf, reason: String },

    #[error("No descriptor found for entity {name}")]
    DescriptorNotFound { name: String },

    #[error("Malformed entity descriptor {path}: {reason}")]
    DescriptorMalformed { path: PathBuf, reason: String },

    #[error("No application named {name} in the merged JDL")]
    ApplicationNotFound { name: String },

    /// Store access failed (lock poisoned).
    #[error("Descriptor store lock error")]
    StoreLockError,
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DocumentUnreadable { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file exists and is readable".into(),
            ],
            Self::DocumentMalformed { .. } => vec![
                "The document must be a JDL syntax export in JSON or TOML".into(),
                "Check the document against the error position above".into(),
            ],
            Self::UnsupportedDocumentFormat { .. } => {
                vec!["Use a .json or .toml JDL document".into()]
            }
            Self::NoDocuments => vec!["Pass at least one JDL document path".into()],
            Self::DescriptorStore { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::DescriptorNotFound { name } => vec![
                format!("Expected .jhipster/{name}.json"),
                "Run `jhipster-jdl entities` to generate descriptors".into(),
            ],
            Self::DescriptorMalformed { path, .. } => {
                vec![format!("Fix or regenerate {}", path.display())]
            }
            Self::ApplicationNotFound { .. } => {
                vec!["Use the baseName of one of the declared applications".into()]
            }
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DocumentUnreadable { .. }
            | Self::DescriptorNotFound { .. }
            | Self::ApplicationNotFound { .. } => ErrorCategory::NotFound,
            Self::DocumentMalformed { .. }
            | Self::UnsupportedDocumentFormat { .. }
            | Self::DescriptorMalformed { .. }
            | Self::NoDocuments => ErrorCategory::Validation,
            Self::DescriptorStore { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
