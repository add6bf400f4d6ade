//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! core crate never sees it; commands translate it into service options.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by each command)
//! 2. `JHIPSTER_JDL__<SECTION>__<KEY>` environment variables
//! 3. The TOML file given with `--config`, else the platform config file
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use jhipster_core::domain::{ApplicationContext, ConversionOptions, DatabaseType};

const ENV_PREFIX: &str = "JHIPSTER_JDL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Database family used when no application is declared.
    pub database_type: String,
    pub unidirectional_relationships: bool,
    /// Where entity descriptors are read from and written to.
    pub entities_dir: PathBuf,
    /// Changelog date of the first converted entity (RFC 3339); now when unset.
    pub creation_timestamp: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            database_type: DatabaseType::Sql.as_str().to_string(),
            unidirectional_relationships: false,
            entities_dir: PathBuf::from(".jhipster"),
            creation_timestamp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path()).format(FileFormat::Toml).required(false),
        };
        Self::build(file, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn build(file: File<config::FileSourceFile, FileFormat>, env: Environment) -> anyhow::Result<Self> {
        let config: Self = Config::builder()
            .add_source(file)
            .add_source(env.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.database_type()?;
        self.creation_timestamp()?;
        Ok(())
    }

    pub fn database_type(&self) -> anyhow::Result<DatabaseType> {
        self.generation
            .database_type
            .parse()
            .with_context(|| format!("generation.database_type = '{}'", self.generation.database_type))
    }

    pub fn creation_timestamp(&self) -> anyhow::Result<Option<DateTime<Utc>>> {
        self.generation
            .creation_timestamp
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|date| date.with_timezone(&Utc))
                    .with_context(|| format!("generation.creation_timestamp = '{raw}' is not RFC 3339"))
            })
            .transpose()
    }

    pub fn conversion_options(&self) -> ConversionOptions {
        match self.creation_timestamp() {
            Ok(Some(creation_timestamp)) => ConversionOptions { creation_timestamp },
            _ => ConversionOptions::default(),
        }
    }

    /// Context used when the documents declare no application.
    pub fn fallback_context(&self) -> ApplicationContext {
        let defaults = ApplicationContext::default();
        ApplicationContext::new(
            defaults.base_name,
            self.database_type().unwrap_or(defaults.database_type),
        )
    }

    pub fn entities_dir(&self) -> &Path {
        &self.generation.entities_dir
    }

    /// Path of the default configuration file, falling back to
    /// `.jhipster-jdl.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("tech", "jhipster", "jhipster-jdl")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".jhipster-jdl.toml"))
    }
}
