//! JDL document loading.
//!
//! Documents are syntax exports of a JDL file in JSON or TOML; the format
//! is chosen from the file extension.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use jhipster_core::{
    application::{ApplicationError, ports::DocumentSource},
    domain::JdlDocument,
    error::JhipsterResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Format of `path`, by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Deserialize `text`; the error is the parser's message.
    pub fn parse(self, text: &str) -> Result<JdlDocument, String> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Toml => "toml",
        })
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentSource;

impl FileDocumentSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for FileDocumentSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> JhipsterResult<JdlDocument> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            ApplicationError::UnsupportedDocumentFormat {
                path: path.to_path_buf(),
            }
        })?;
        let text = fs::read_to_string(path).map_err(|e| ApplicationError::DocumentUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let document = format.parse(&text).map_err(|reason| malformed(path, reason))?;
        debug!(%format, entities = document.entities.len(), "Document parsed");
        Ok(document)
    }
}

fn malformed(path: &Path, reason: String) -> ApplicationError {
    ApplicationError::DocumentMalformed {
        path: PathBuf::from(path),
        reason,
    }
}
