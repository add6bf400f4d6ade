//! Application blocks: a typed configuration, the entities the application
//! includes and application-scoped options.

use std::fmt;

use crate::domain::{
    common::{OrderedMap, OrderedSet},
    error::{DomainError, DomainResult},
};

use super::options::{JdlOption, JdlOptions};

/// The kind of a configuration option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    List,
}

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
}

impl OptionValue {
    /// A list value; duplicates are dropped, first occurrence kept.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: OrderedSet<String> = values.into_iter().map(Into::into).collect();
        Self::List(set.iter().cloned().collect())
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            Self::String(_) => OptionKind::String,
            Self::Integer(_) => OptionKind::Integer,
            Self::Boolean(_) => OptionKind::Boolean,
            Self::List(_) => OptionKind::List,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::List(values) => values.is_empty(),
            Self::Integer(_) | Self::Boolean(_) => false,
        }
    }

    /// Render the value the way JDL writes it.
    pub fn stringify(&self, quoted: bool) -> String {
        match self {
            Self::String(s) if quoted => format!("\"{s}\""),
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::List(values) => format!("[{}]", values.join(", ")),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(false))
    }
}

/// Known application configuration option names and their kinds.
pub const KNOWN_OPTIONS: &[(&str, OptionKind)] = &[
    ("applicationType", OptionKind::String),
    ("authenticationType", OptionKind::String),
    ("baseName", OptionKind::String),
    ("blueprints", OptionKind::List),
    ("buildTool", OptionKind::String),
    ("cacheProvider", OptionKind::String),
    ("clientFramework", OptionKind::String),
    ("clientPackageManager", OptionKind::String),
    ("clientTheme", OptionKind::String),
    ("clientThemeVariant", OptionKind::String),
    ("databaseType", OptionKind::String),
    ("devDatabaseType", OptionKind::String),
    ("dtoSuffix", OptionKind::String),
    ("enableHibernateCache", OptionKind::Boolean),
    ("enableSwaggerCodegen", OptionKind::Boolean),
    ("enableTranslation", OptionKind::Boolean),
    ("entitySuffix", OptionKind::String),
    ("jhiPrefix", OptionKind::String),
    ("jhipsterVersion", OptionKind::String),
    ("jwtSecretKey", OptionKind::String),
    ("languages", OptionKind::List),
    ("messageBroker", OptionKind::String),
    ("nativeLanguage", OptionKind::String),
    ("packageFolder", OptionKind::String),
    ("packageName", OptionKind::String),
    ("prodDatabaseType", OptionKind::String),
    ("reactive", OptionKind::Boolean),
    ("rememberMeKey", OptionKind::String),
    ("searchEngine", OptionKind::String),
    ("serverPort", OptionKind::Integer),
    ("serviceDiscoveryType", OptionKind::String),
    ("skipClient", OptionKind::Boolean),
    ("skipServer", OptionKind::Boolean),
    ("skipUserManagement", OptionKind::Boolean),
    ("testFrameworks", OptionKind::List),
    ("websocket", OptionKind::String),
    ("withAdminUi", OptionKind::Boolean),
];

/// Options whose string values are written between quotes.
const QUOTED_OPTIONS: [&str; 3] = ["jhipsterVersion", "jwtSecretKey", "rememberMeKey"];

/// Options omitted from the output when their value is empty.
const OMITTED_WHEN_EMPTY: [&str; 3] = ["dtoSuffix", "entitySuffix", "clientThemeVariant"];

/// Never written back: it is derived from `packageName`.
const NEVER_SERIALIZED: &str = "packageFolder";

pub fn known_option_kind(name: &str) -> Option<OptionKind> {
    KNOWN_OPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

/// A single `name value` entry of a `config` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationOption {
    name: String,
    value: OptionValue,
}

impl ConfigurationOption {
    pub fn new(name: impl Into<String>, value: OptionValue) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingConfigurationOptionName);
        }
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    pub fn kind(&self) -> OptionKind {
        self.value.kind()
    }

    /// Whether the option appears in the rendered `config` block.
    pub fn is_serialized(&self) -> bool {
        if self.name == NEVER_SERIALIZED {
            return false;
        }
        !(OMITTED_WHEN_EMPTY.contains(&self.name.as_str()) && self.value.is_empty())
    }
}

impl fmt::Display for ConfigurationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted = QUOTED_OPTIONS.contains(&self.name.as_str());
        write!(f, "{} {}", self.name, self.value.stringify(quoted))
    }
}

/// The `config` block of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdlApplicationConfiguration {
    options: OrderedMap<String, ConfigurationOption>,
}

impl JdlApplicationConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_option(&mut self, option: ConfigurationOption) {
        self.options.insert(option.name().to_string(), option);
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn get_option(&self, name: &str) -> Option<&ConfigurationOption> {
        self.options.get(name)
    }

    pub fn for_each_option<F: FnMut(&ConfigurationOption)>(&self, f: F) {
        self.options.values().for_each(f);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn to_string_indented(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let entries: Vec<String> = self
            .options
            .values()
            .filter(|o| o.is_serialized())
            .map(|o| format!("{pad}  {o}"))
            .collect();
        if entries.is_empty() {
            return format!("{pad}config {{}}");
        }
        format!("{pad}config {{\n{}\n{pad}}}", entries.join("\n"))
    }
}

/// Entity names included in an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdlApplicationEntities {
    names: OrderedSet<String>,
}

impl JdlApplicationEntities {
    pub fn add(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingApplicationEntityName);
        }
        Ok(self.names.insert(name))
    }

    /// Empty names are skipped.
    pub fn add_entity_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names.into_iter().map(Into::into) {
            if !name.is_empty() {
                self.names.insert(name);
            }
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_string_indented(&self, indent: usize) -> String {
        format!(
            "{}entities {}",
            " ".repeat(indent),
            self.iter().collect::<Vec<_>>().join(", ")
        )
    }
}

/// One generated application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdlApplication {
    config: JdlApplicationConfiguration,
    entities: JdlApplicationEntities,
    options: JdlOptions,
}

impl JdlApplication {
    pub fn new(config: JdlApplicationConfiguration) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn base_name(&self) -> Option<&str> {
        self.config
            .get_option("baseName")
            .and_then(|o| o.value().as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn config(&self) -> &JdlApplicationConfiguration {
        &self.config
    }

    pub fn set_configuration_option(&mut self, option: ConfigurationOption) {
        self.config.set_option(option);
    }

    pub fn has_configuration_option(&self, name: &str) -> bool {
        self.config.has_option(name)
    }

    pub fn configuration_option_value(&self, name: &str) -> Option<&OptionValue> {
        self.config.get_option(name).map(ConfigurationOption::value)
    }

    pub fn add_entity_name(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        self.entities.add(name)
    }

    pub fn add_entity_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities.add_entity_names(names);
    }

    pub fn entity_names(&self) -> &JdlApplicationEntities {
        &self.entities
    }

    pub fn add_option(&mut self, option: impl Into<JdlOption>) {
        self.options.add_option(option);
    }

    pub fn options(&self) -> &JdlOptions {
        &self.options
    }
}

impl fmt::Display for JdlApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "application {{\n{}", self.config.to_string_indented(2))?;
        if !self.entities.is_empty() {
            writeln!(f, "\n{}", self.entities.to_string_indented(2))?;
        }
        if !self.options.is_empty() {
            writeln!(f, "\n{}", self.options.to_string_indented(2))?;
        }
        f.write_str("}")
    }
}
