use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    jdl::{JdlApplication, OptionValue},
};

/// Database family of the generated application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[default]
    Sql,
    Mongodb,
    Cassandra,
    Couchbase,
    Neo4j,
    No,
}

impl DatabaseType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Mongodb => "mongodb",
            Self::Cassandra => "cassandra",
            Self::Couchbase => "couchbase",
            Self::Neo4j => "neo4j",
            Self::No => "no",
        }
    }

    /// Type of a synthesized primary key.
    pub const fn default_primary_key_type(&self) -> &'static str {
        match self {
            Self::Sql | Self::No => "Long",
            Self::Mongodb | Self::Couchbase | Self::Neo4j => "String",
            Self::Cassandra => "UUID",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sql" => Ok(Self::Sql),
            "mongodb" => Ok(Self::Mongodb),
            "cassandra" => Ok(Self::Cassandra),
            "couchbase" => Ok(Self::Couchbase),
            "neo4j" => Ok(Self::Neo4j),
            "no" => Ok(Self::No),
            other => Err(DomainError::UnknownDatabaseType(other.to_string())),
        }
    }
}

/// The finalized application settings the preparation passes read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationContext {
    pub base_name: String,
    pub database_type: DatabaseType,
    pub reactive: bool,
}

impl Default for ApplicationContext {
    fn default() -> Self {
        Self {
            base_name: "jhipster".to_string(),
            database_type: DatabaseType::Sql,
            reactive: false,
        }
    }
}

impl ApplicationContext {
    pub fn new(base_name: impl Into<String>, database_type: DatabaseType) -> Self {
        Self {
            base_name: base_name.into(),
            database_type,
            reactive: false,
        }
    }

    /// Read the context from an application's `config` block.
    pub fn from_application(application: &JdlApplication) -> Result<Self, DomainError> {
        let defaults = Self::default();
        let database_type = match application.configuration_option_value("databaseType") {
            Some(OptionValue::String(value)) => value.parse()?,
            _ => defaults.database_type,
        };
        Ok(Self {
            base_name: application
                .base_name()
                .map_or(defaults.base_name, str::to_string),
            database_type,
            reactive: application
                .configuration_option_value("reactive")
                .and_then(OptionValue::as_bool)
                .unwrap_or(false),
        })
    }
}
