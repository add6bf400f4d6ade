use std::fmt;

use tracing::debug;

use crate::domain::{
    common::{OrderedMap, OrderedSet},
    error::{DomainError, DomainResult},
    value_objects::DeploymentType,
};

use super::{
    application::JdlApplication,
    deployment::JdlDeployment,
    entity::JdlEntity,
    enums::JdlEnum,
    options::{JdlOption, JdlOptions, binary},
    relationship::{JdlRelationship, JdlRelationships},
};

/// Entities and enums share one declaration order when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Declaration {
    Entity(String),
    Enum(String),
}

/// Everything one JDL document declares.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JdlObject {
    applications: OrderedMap<String, JdlApplication>,
    deployments: OrderedMap<DeploymentType, JdlDeployment>,
    entities: OrderedMap<String, JdlEntity>,
    enums: OrderedMap<String, JdlEnum>,
    declarations: Vec<Declaration>,
    relationships: JdlRelationships,
    options: JdlOptions,
}

impl JdlObject {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Applications ─────────────────────────────────────────────────────

    /// Applications are keyed by base name, which is therefore mandatory.
    pub fn add_application(&mut self, application: JdlApplication) -> DomainResult<()> {
        let Some(base_name) = application.base_name().map(str::to_string) else {
            return Err(DomainError::InvalidApplication {
                reason: "No baseName.".into(),
            });
        };
        self.applications.insert(base_name, application);
        Ok(())
    }

    pub fn get_application(&self, base_name: &str) -> Option<&JdlApplication> {
        self.applications.get(base_name)
    }

    pub fn applications(&self) -> impl Iterator<Item = &JdlApplication> {
        self.applications.values()
    }

    pub fn application_quantity(&self) -> usize {
        self.applications.len()
    }

    pub fn for_each_application<F: FnMut(&JdlApplication)>(&self, f: F) {
        self.applications.values().for_each(f);
    }

    // ── Deployments ──────────────────────────────────────────────────────

    pub fn add_deployment(&mut self, deployment: JdlDeployment) {
        self.deployments.insert(deployment.deployment_type(), deployment);
    }

    pub fn get_deployment(&self, deployment_type: DeploymentType) -> Option<&JdlDeployment> {
        self.deployments.get(&deployment_type)
    }

    pub fn deployments(&self) -> impl Iterator<Item = &JdlDeployment> {
        self.deployments.values()
    }

    pub fn deployment_quantity(&self) -> usize {
        self.deployments.len()
    }

    pub fn for_each_deployment<F: FnMut(&JdlDeployment)>(&self, f: F) {
        self.deployments.values().for_each(f);
    }

    // ── Entities ─────────────────────────────────────────────────────────

    /// Replaces any entity with the same name, keeping its position.
    pub fn add_entity(&mut self, entity: JdlEntity) {
        let name = entity.name().to_string();
        if self.entities.insert(name.clone(), entity).is_some() {
            debug!(entity = %name, "Replacing previously declared entity");
        } else {
            self.declarations.push(Declaration::Entity(name));
        }
    }

    /// Absent entities are `Ok(None)`; an empty name is an error.
    pub fn get_entity(&self, name: &str) -> DomainResult<Option<&JdlEntity>> {
        if name.is_empty() {
            return Err(DomainError::MissingLookupName);
        }
        Ok(self.entities.get(name))
    }

    pub fn entities(&self) -> Vec<&JdlEntity> {
        self.entities.values().collect()
    }

    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    pub fn entity_quantity(&self) -> usize {
        self.entities.len()
    }

    pub fn for_each_entity<F: FnMut(&JdlEntity)>(&self, f: F) {
        self.entities.values().for_each(f);
    }

    // ── Enums ────────────────────────────────────────────────────────────

    /// Replaces any enum with the same name, keeping its position.
    pub fn add_enum(&mut self, en: JdlEnum) {
        let name = en.name().to_string();
        if self.enums.insert(name.clone(), en).is_some() {
            debug!(enum_name = %name, "Replacing previously declared enum");
        } else {
            self.declarations.push(Declaration::Enum(name));
        }
    }

    pub fn get_enum(&self, name: &str) -> Option<&JdlEnum> {
        self.enums.get(name)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn enums(&self) -> impl Iterator<Item = &JdlEnum> {
        self.enums.values()
    }

    pub fn enum_quantity(&self) -> usize {
        self.enums.len()
    }

    pub fn for_each_enum<F: FnMut(&JdlEnum)>(&self, f: F) {
        self.enums.values().for_each(f);
    }

    // ── Relationships ────────────────────────────────────────────────────

    /// Returns `false` when a relationship with the same id already exists.
    pub fn add_relationship(&mut self, relationship: JdlRelationship) -> bool {
        self.relationships.add(relationship)
    }

    pub fn relationships(&self) -> &JdlRelationships {
        &self.relationships
    }

    pub fn relationship_quantity(&self) -> usize {
        self.relationships.size()
    }

    pub fn for_each_relationship<F: FnMut(&JdlRelationship)>(&self, f: F) {
        self.relationships.for_each(f);
    }

    // ── Options ──────────────────────────────────────────────────────────

    pub fn add_option(&mut self, option: impl Into<JdlOption>) {
        self.options.add_option(option);
    }

    pub fn options(&self) -> &JdlOptions {
        &self.options
    }

    pub fn get_options(&self) -> Vec<&JdlOption> {
        self.options.get_options()
    }

    pub fn option_quantity(&self) -> usize {
        self.options.quantity()
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.has(name)
    }

    pub fn get_options_for_name(&self, name: &str) -> Vec<&JdlOption> {
        self.options.get_options_for_name(name)
    }

    pub fn for_each_option<F: FnMut(&JdlOption)>(&self, f: F) {
        self.options.for_each(f);
    }

    /// Whether a `microservice` option applies to the entity.
    pub fn is_entity_in_microservice(&self, entity_name: &str) -> bool {
        self.options
            .get_options_for_name(binary::MICROSERVICE)
            .iter()
            .any(|option| option.scope().covers(entity_name))
    }

    /// The entity names of this object an option applies to.
    pub fn resolve_option_entity_names(&self, option: &JdlOption) -> OrderedSet<String> {
        option.resolve_entity_names(&self.entity_names())
    }
}

impl fmt::Display for JdlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<String> = Vec::new();

        let join = |items: Vec<String>| items.join("\n\n");

        if !self.applications.is_empty() {
            sections.push(join(self.applications.values().map(ToString::to_string).collect()));
        }
        if !self.deployments.is_empty() {
            sections.push(join(self.deployments.values().map(ToString::to_string).collect()));
        }
        if !self.declarations.is_empty() {
            let declarations = self
                .declarations
                .iter()
                .filter_map(|declaration| match declaration {
                    Declaration::Entity(name) => self.entities.get(name).map(ToString::to_string),
                    Declaration::Enum(name) => self.enums.get(name).map(ToString::to_string),
                })
                .collect();
            sections.push(join(declarations));
        }
        if !self.relationships.is_empty() {
            sections.push(join(self.relationships.iter().map(ToString::to_string).collect()));
        }
        if !self.options.is_empty() {
            sections.push(self.options.to_string());
        }

        if sections.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        jdl::{
            application::{ConfigurationOption, JdlApplicationConfiguration, OptionValue},
            field::JdlField,
            options::{JdlBinaryOption, JdlUnaryOption, OptionArgs, unary},
        },
        value_objects::RelationshipType,
    };
    use pretty_assertions::assert_eq;

    fn entity(name: &str) -> JdlEntity {
        JdlEntity::new(name).unwrap()
    }

    fn microservice(args: OptionArgs) -> JdlBinaryOption {
        JdlBinaryOption::new(args.value("ms")).unwrap()
    }

    fn relationship() -> JdlRelationship {
        JdlRelationship::builder()
            .from("A")
            .to("B")
            .relationship_type(RelationshipType::ManyToMany)
            .injected_field_in_from("b")
            .build()
            .unwrap()
    }

    #[test]
    fn application_without_base_name_is_rejected() {
        let mut object = JdlObject::new();
        let err = object.add_application(JdlApplication::default()).unwrap_err();
        assert!(err.to_string().starts_with("Can't add invalid application. Error:"));
        assert_eq!(object.application_quantity(), 0);
    }

    #[test]
    fn application_lookup_by_base_name() {
        let mut config = JdlApplicationConfiguration::new();
        config.set_option(ConfigurationOption::new("baseName", OptionValue::String("shop".into())).unwrap());
        let mut object = JdlObject::new();
        object.add_application(JdlApplication::new(config)).unwrap();

        assert!(object.get_application("shop").is_some());
        assert!(object.get_application("").is_none());
    }

    #[test]
    fn entity_replacement_keeps_position() {
        let mut object = JdlObject::new();
        object.add_entity(entity("A"));
        object.add_entity(entity("B"));
        object.add_entity(entity("A").with_fields([JdlField::new("name", "String").unwrap()]));

        assert_eq!(object.entity_names(), vec!["A", "B"]);
        assert_eq!(object.get_entity("A").unwrap().map(JdlEntity::field_quantity), Some(1));
    }

    #[test]
    fn entity_lookup_needs_a_name() {
        let object = JdlObject::new();
        assert_eq!(object.get_entity("").unwrap_err(), DomainError::MissingLookupName);
        assert_eq!(object.get_entity("Nope").unwrap(), None);
        assert!(object.get_enum("").is_none());
    }

    #[test]
    fn relationship_add_is_idempotent() {
        let mut object = JdlObject::new();
        assert!(object.add_relationship(relationship()));
        assert!(!object.add_relationship(relationship()));
        assert_eq!(object.relationship_quantity(), 1);
    }

    #[test]
    fn microservice_membership() {
        let mut object = JdlObject::new();
        object.add_option(microservice(OptionArgs::new(binary::MICROSERVICE).entities(["A"])));

        assert!(object.is_entity_in_microservice("A"));
        assert!(!object.is_entity_in_microservice("B"));
    }

    #[test]
    fn unrestricted_microservice_honours_exclusions() {
        let mut object = JdlObject::new();
        object.add_option(microservice(OptionArgs::new(binary::MICROSERVICE).excluding(["B"])));

        assert!(object.is_entity_in_microservice("A"));
        assert!(!object.is_entity_in_microservice("B"));
    }

    #[test]
    fn options_for_name() {
        let mut object = JdlObject::new();
        object.add_option(JdlUnaryOption::new(OptionArgs::new(unary::SKIP_CLIENT)).unwrap());
        object.add_option(JdlUnaryOption::new(OptionArgs::new(unary::FILTER)).unwrap());

        assert_eq!(object.get_options_for_name(unary::SKIP_CLIENT).len(), 1);
        assert!(object.get_options_for_name("").is_empty());
        assert!(object.get_options_for_name("nope").is_empty());
    }

    #[test]
    fn for_each_visits_in_insertion_order() {
        let mut object = JdlObject::new();
        object.add_entity(entity("B"));
        object.add_entity(entity("A"));
        let mut names = Vec::new();
        object.for_each_entity(|e| names.push(e.name().to_string()));
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn renders_sections_in_order() {
        let mut object = JdlObject::new();
        object.add_option(JdlUnaryOption::new(OptionArgs::new(unary::SKIP_CLIENT)).unwrap());
        object.add_relationship(relationship());
        object.add_entity(entity("A"));
        object.add_enum(JdlEnum::new("Color").unwrap());
        object.add_entity(entity("B"));

        assert_eq!(
            object.to_string(),
            "entity A\n\nenum Color {\n\n}\n\nentity B\n\nrelationship ManyToMany {\n  A{b} to B\n}\n\nskipClient *\n"
        );
    }

    #[test]
    fn empty_object_renders_nothing() {
        assert_eq!(JdlObject::new().to_string(), "");
    }
}
