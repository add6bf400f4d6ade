//! Generation directives scoped to sets of entity names.
//!
//! An option with no entity names applies to every entity (`*`). Entity
//! names and excluded names are kept disjoint: a name present in one set
//! blocks it from being added to the other.

use std::fmt;

use crate::domain::{
    common::{OrderedMap, OrderedSet},
    error::{DomainError, DomainResult},
};

/// Option names without a value.
pub mod unary {
    pub const SKIP_CLIENT: &str = "skipClient";
    pub const SKIP_SERVER: &str = "skipServer";
    pub const NO_FLUENT_METHOD: &str = "noFluentMethod";
    pub const FILTER: &str = "filter";
    pub const READ_ONLY: &str = "readOnly";
    pub const EMBEDDED: &str = "embedded";

    pub const ALL: [&str; 6] = [SKIP_CLIENT, SKIP_SERVER, NO_FLUENT_METHOD, FILTER, READ_ONLY, EMBEDDED];
}

/// Option names carrying a value, and the values the generator knows.
pub mod binary {
    pub const DTO: &str = "dto";
    pub const SERVICE: &str = "service";
    pub const PAGINATION: &str = "pagination";
    pub const MICROSERVICE: &str = "microservice";
    pub const SEARCH: &str = "search";
    pub const ANGULAR_SUFFIX: &str = "angularSuffix";
    pub const CLIENT_ROOT_FOLDER: &str = "clientRootFolder";

    pub const ALL: [&str; 7] = [
        DTO,
        SERVICE,
        PAGINATION,
        MICROSERVICE,
        SEARCH,
        ANGULAR_SUFFIX,
        CLIENT_ROOT_FOLDER,
    ];

    pub mod values {
        pub const NO: &str = "no";
        pub const MAPSTRUCT: &str = "mapstruct";
        pub const SERVICE_CLASS: &str = "serviceClass";
        pub const SERVICE_IMPL: &str = "serviceImpl";
        pub const PAGINATION: &str = "pagination";
        pub const INFINITE_SCROLL: &str = "infinite-scroll";
        pub const ELASTICSEARCH: &str = "elasticsearch";
        pub const COUCHBASE: &str = "couchbase";
    }

    /// Values accepted by options with a closed value set.
    ///
    /// Returns `None` for options taking free-form values.
    pub fn known_values(name: &str) -> Option<&'static [&'static str]> {
        match name {
            DTO => Some(&[values::MAPSTRUCT, values::NO]),
            SERVICE => Some(&[values::SERVICE_CLASS, values::SERVICE_IMPL, values::NO]),
            PAGINATION => Some(&[values::PAGINATION, values::INFINITE_SCROLL, values::NO]),
            SEARCH => Some(&[values::ELASTICSEARCH, values::COUCHBASE, values::NO]),
            _ => None,
        }
    }

    /// The keyword used when rendering an option name back to JDL.
    pub fn keyword(name: &str) -> &str {
        match name {
            PAGINATION => "paginate",
            other => other,
        }
    }
}

/// Construction arguments shared by unary and binary options.
#[derive(Debug, Clone, Default)]
pub struct OptionArgs {
    pub name: String,
    pub value: Option<String>,
    pub entity_names: Vec<String>,
    pub excluded_names: Vec<String>,
}

impl OptionArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_names.extend(names.into_iter().map(Into::into));
        self
    }
}

/// The entity scope of an option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityScope {
    entity_names: OrderedSet<String>,
    excluded_names: OrderedSet<String>,
    /// Set once an unrestricted scope has been absorbed; listed names are
    /// kept so they still block exclusions.
    all: bool,
}

impl EntityScope {
    fn from_lists(entity_names: Vec<String>, excluded_names: Vec<String>) -> DomainResult<Self> {
        let mut scope = Self::default();
        for name in entity_names {
            scope.add_entity_name(name)?;
        }
        for name in excluded_names {
            scope.exclude_entity_name(name)?;
        }
        Ok(scope)
    }

    /// Returns `false` when the name was already present or is excluded.
    pub fn add_entity_name(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingOptionEntityName { action: "added to" });
        }
        if self.excluded_names.contains(&name) {
            return Ok(false);
        }
        Ok(self.entity_names.insert(name))
    }

    /// Returns `false` when the name was already excluded or is listed.
    pub fn exclude_entity_name(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingOptionEntityName {
                action: "excluded from",
            });
        }
        if self.entity_names.contains(&name) {
            return Ok(false);
        }
        Ok(self.excluded_names.insert(name))
    }

    /// Union another scope into this one.
    ///
    /// If either scope covers every entity, so does the result.
    pub fn absorb(&mut self, other: &EntityScope) {
        let unrestricted = self.is_unrestricted() || other.is_unrestricted();
        for name in other.entity_names.iter() {
            if !self.excluded_names.contains(name) {
                self.entity_names.insert(name.clone());
            }
        }
        for name in other.excluded_names.iter() {
            if !self.entity_names.contains(name) {
                self.excluded_names.insert(name.clone());
            }
        }
        self.all = unrestricted;
    }

    /// The option applies to every entity that is not excluded.
    pub fn is_unrestricted(&self) -> bool {
        self.all || self.entity_names.is_empty()
    }

    pub fn entity_names(&self) -> &OrderedSet<String> {
        &self.entity_names
    }

    pub fn excluded_names(&self) -> &OrderedSet<String> {
        &self.excluded_names
    }

    /// Whether the option applies to `name`.
    pub fn covers(&self, name: &str) -> bool {
        if self.excluded_names.contains(name) {
            return false;
        }
        self.is_unrestricted() || self.entity_names.contains(name)
    }

    /// The concrete entity names this scope selects out of `all`.
    pub fn resolve<S: AsRef<str>>(&self, all: &[S]) -> OrderedSet<String> {
        let candidates: Vec<String> = if self.is_unrestricted() {
            all.iter().map(|n| n.as_ref().to_string()).collect()
        } else {
            self.entity_names.iter().cloned().collect()
        };
        candidates
            .into_iter()
            .filter(|name| !self.excluded_names.contains(name))
            .collect()
    }

    fn render_names(&self) -> String {
        if self.is_unrestricted() {
            "*".to_string()
        } else {
            join(&self.entity_names)
        }
    }

    fn render_exclusions(&self) -> String {
        if self.excluded_names.is_empty() {
            String::new()
        } else {
            format!(" except {}", join(&self.excluded_names))
        }
    }
}

fn join(names: &OrderedSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// An option without a value, e.g. `skipClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlUnaryOption {
    name: String,
    scope: EntityScope,
}

impl JdlUnaryOption {
    pub fn new(args: OptionArgs) -> DomainResult<Self> {
        if args.name.is_empty() {
            return Err(DomainError::MissingOptionName);
        }
        Ok(Self {
            name: args.name,
            scope: EntityScope::from_lists(args.entity_names, args.excluded_names)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &EntityScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut EntityScope {
        &mut self.scope
    }
}

impl fmt::Display for JdlUnaryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.name,
            self.scope.render_names(),
            self.scope.render_exclusions()
        )
    }
}

/// An option with a value, e.g. `dto * with mapstruct`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlBinaryOption {
    name: String,
    value: String,
    scope: EntityScope,
}

impl JdlBinaryOption {
    pub fn new(args: OptionArgs) -> DomainResult<Self> {
        if args.name.is_empty() {
            return Err(DomainError::MissingOptionName);
        }
        let value = match args.value {
            Some(value) if !value.is_empty() => value,
            _ => return Err(DomainError::MissingOptionValue),
        };
        Ok(Self {
            name: args.name,
            value,
            scope: EntityScope::from_lists(args.entity_names, args.excluded_names)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn scope(&self) -> &EntityScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut EntityScope {
        &mut self.scope
    }
}

impl fmt::Display for JdlBinaryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} with {}{}",
            binary::keyword(&self.name),
            self.scope.render_names(),
            self.value,
            self.scope.render_exclusions()
        )
    }
}

/// Either kind of option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JdlOption {
    Unary(JdlUnaryOption),
    Binary(JdlBinaryOption),
}

impl JdlOption {
    pub fn name(&self) -> &str {
        match self {
            Self::Unary(o) => o.name(),
            Self::Binary(o) => o.name(),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Unary(_) => None,
            Self::Binary(o) => Some(o.value()),
        }
    }

    pub fn scope(&self) -> &EntityScope {
        match self {
            Self::Unary(o) => o.scope(),
            Self::Binary(o) => o.scope(),
        }
    }

    pub fn scope_mut(&mut self) -> &mut EntityScope {
        match self {
            Self::Unary(o) => o.scope_mut(),
            Self::Binary(o) => o.scope_mut(),
        }
    }

    pub fn add_entity_name(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        self.scope_mut().add_entity_name(name)
    }

    pub fn exclude_entity_name(&mut self, name: impl Into<String>) -> DomainResult<bool> {
        self.scope_mut().exclude_entity_name(name)
    }

    /// Union the scope of a same-keyed option into this one.
    ///
    /// Returns `false` and leaves `self` untouched when `other` is a
    /// different option.
    pub fn add_entities_from_another_option(&mut self, other: &JdlOption) -> bool {
        if self.key() != other.key() {
            return false;
        }
        self.scope_mut().absorb(other.scope());
        true
    }

    pub fn resolve_entity_names<S: AsRef<str>>(&self, all: &[S]) -> OrderedSet<String> {
        self.scope().resolve(all)
    }

    fn key(&self) -> OptionKey {
        OptionKey {
            name: self.name().to_string(),
            value: self.value().map(str::to_string),
        }
    }
}

impl From<JdlUnaryOption> for JdlOption {
    fn from(option: JdlUnaryOption) -> Self {
        Self::Unary(option)
    }
}

impl From<JdlBinaryOption> for JdlOption {
    fn from(option: JdlBinaryOption) -> Self {
        Self::Binary(option)
    }
}

impl fmt::Display for JdlOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unary(o) => o.fmt(f),
            Self::Binary(o) => o.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OptionKey {
    name: String,
    value: Option<String>,
}

/// Options of a document or an application.
///
/// Unary options are keyed by name, binary ones by name and value. Adding
/// an option whose key is already present accumulates its entity names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdlOptions {
    options: OrderedMap<OptionKey, JdlOption>,
}

impl JdlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(&mut self, option: impl Into<JdlOption>) {
        let option = option.into();
        let key = option.key();
        match self.options.get_mut(&key) {
            Some(existing) => {
                existing.add_entities_from_another_option(&option);
            }
            None => {
                self.options.insert(key, option);
            }
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.options.values().any(|o| o.name() == name)
    }

    pub fn get_options(&self) -> Vec<&JdlOption> {
        self.options.values().collect()
    }

    pub fn get_options_for_name(&self, name: &str) -> Vec<&JdlOption> {
        if name.is_empty() {
            return Vec::new();
        }
        self.options.values().filter(|o| o.name() == name).collect()
    }

    pub fn for_each<F: FnMut(&JdlOption)>(&self, f: F) {
        self.options.values().for_each(f);
    }

    /// Number of distinct options stored.
    pub fn quantity(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// One option per line, each prefixed by `indent` spaces.
    pub fn to_string_indented(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        self.options
            .values()
            .map(|o| format!("{pad}{o}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for JdlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_indented(0))
    }
}
