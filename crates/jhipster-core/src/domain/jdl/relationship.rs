use std::fmt;

use tracing::info;

use crate::domain::{
    common::{OrderedMap, doc_comment, lower_first},
    error::{DomainError, DomainResult},
    value_objects::RelationshipType,
};

/// Options attached to a relationship.
///
/// `global` options follow the `with` keyword; `source` and `destination`
/// options are annotations rendered above their side (`@id`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipOptions {
    pub global: OrderedMap<String, Option<String>>,
    pub source: OrderedMap<String, Option<String>>,
    pub destination: OrderedMap<String, Option<String>>,
}

impl RelationshipOptions {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.source.is_empty() && self.destination.is_empty()
    }
}

/// An association between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdlRelationship {
    from: String,
    to: String,
    relationship_type: RelationshipType,
    injected_field_in_from: Option<String>,
    injected_field_in_to: Option<String>,
    is_injected_field_in_from_required: bool,
    is_injected_field_in_to_required: bool,
    comment_in_from: Option<String>,
    comment_in_to: Option<String>,
    options: RelationshipOptions,
}

impl JdlRelationship {
    pub fn builder() -> RelationshipBuilder {
        RelationshipBuilder::default()
    }

    /// `{type}_{from}{{injectedFieldInFrom}}_{to}`; the identity used to
    /// collapse duplicate relationships.
    pub fn id(&self) -> String {
        format!(
            "{}_{}{{{}}}_{}",
            self.relationship_type,
            self.from,
            self.injected_field_in_from.as_deref().unwrap_or_default(),
            self.to
        )
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    pub fn injected_field_in_from(&self) -> Option<&str> {
        self.injected_field_in_from.as_deref()
    }

    pub fn injected_field_in_to(&self) -> Option<&str> {
        self.injected_field_in_to.as_deref()
    }

    pub fn is_injected_field_in_from_required(&self) -> bool {
        self.is_injected_field_in_from_required
    }

    pub fn is_injected_field_in_to_required(&self) -> bool {
        self.is_injected_field_in_to_required
    }

    pub fn comment_in_from(&self) -> Option<&str> {
        self.comment_in_from.as_deref()
    }

    pub fn comment_in_to(&self) -> Option<&str> {
        self.comment_in_to.as_deref()
    }

    pub fn options(&self) -> &RelationshipOptions {
        &self.options
    }

    pub fn has_global_option(&self, name: &str) -> bool {
        self.options.global.contains_key(name)
    }

    pub fn for_each_global_option<F: FnMut(&str, Option<&str>)>(&self, mut f: F) {
        for (name, value) in self.options.global.iter() {
            f(name, value.as_deref());
        }
    }
}

fn render_annotations(annotations: &OrderedMap<String, Option<String>>) -> String {
    annotations
        .iter()
        .map(|(name, value)| match value {
            Some(value) => format!("@{name}({value})\n  "),
            None => format!("@{name}\n  "),
        })
        .collect()
}

fn render_side(entity: &str, field: Option<&str>, required: bool) -> String {
    match field {
        Some(field) if required => format!("{entity}{{{field} required}}"),
        Some(field) => format!("{entity}{{{field}}}"),
        None => entity.to_string(),
    }
}

impl fmt::Display for JdlRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relationship {} {{\n  ", self.relationship_type)?;
        if let Some(comment) = &self.comment_in_from {
            f.write_str(&doc_comment(comment, "  "))?;
        }
        f.write_str(&render_annotations(&self.options.source))?;
        f.write_str(&render_side(
            &self.from,
            self.injected_field_in_from.as_deref(),
            self.is_injected_field_in_from_required,
        ))?;
        f.write_str(" to")?;
        if self.comment_in_to.is_some() || !self.options.destination.is_empty() {
            f.write_str("\n  ")?;
            if let Some(comment) = &self.comment_in_to {
                f.write_str(&doc_comment(comment, "  "))?;
            }
            f.write_str(&render_annotations(&self.options.destination))?;
        } else {
            f.write_str(" ")?;
        }
        f.write_str(&render_side(
            &self.to,
            self.injected_field_in_to.as_deref(),
            self.is_injected_field_in_to_required,
        ))?;
        if !self.options.global.is_empty() {
            let names: Vec<&str> = self.options.global.keys().map(String::as_str).collect();
            write!(f, " with {}", names.join(", "))?;
        }
        f.write_str("\n}")
    }
}

/// Builds a [`JdlRelationship`], validating its shape on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RelationshipBuilder {
    from: Option<String>,
    to: Option<String>,
    relationship_type: Option<RelationshipType>,
    injected_field_in_from: Option<String>,
    injected_field_in_to: Option<String>,
    is_injected_field_in_from_required: bool,
    is_injected_field_in_to_required: bool,
    comment_in_from: Option<String>,
    comment_in_to: Option<String>,
    options: RelationshipOptions,
    unidirectional: bool,
}

fn non_empty(s: impl Into<String>) -> Option<String> {
    let s = s.into();
    (!s.is_empty()).then_some(s)
}

impl RelationshipBuilder {
    pub fn from(mut self, entity: impl Into<String>) -> Self {
        self.from = non_empty(entity);
        self
    }

    pub fn to(mut self, entity: impl Into<String>) -> Self {
        self.to = non_empty(entity);
        self
    }

    pub fn relationship_type(mut self, relationship_type: RelationshipType) -> Self {
        self.relationship_type = Some(relationship_type);
        self
    }

    pub fn injected_field_in_from(mut self, field: impl Into<String>) -> Self {
        self.injected_field_in_from = non_empty(field);
        self
    }

    pub fn injected_field_in_to(mut self, field: impl Into<String>) -> Self {
        self.injected_field_in_to = non_empty(field);
        self
    }

    pub fn injected_field_in_from_required(mut self, required: bool) -> Self {
        self.is_injected_field_in_from_required = required;
        self
    }

    pub fn injected_field_in_to_required(mut self, required: bool) -> Self {
        self.is_injected_field_in_to_required = required;
        self
    }

    pub fn comment_in_from(mut self, comment: impl Into<String>) -> Self {
        self.comment_in_from = non_empty(comment);
        self
    }

    pub fn comment_in_to(mut self, comment: impl Into<String>) -> Self {
        self.comment_in_to = non_empty(comment);
        self
    }

    pub fn global_option(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.options.global.insert(name.into(), value);
        self
    }

    pub fn source_option(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.options.source.insert(name.into(), value);
        self
    }

    pub fn destination_option(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.options.destination.insert(name.into(), value);
        self
    }

    pub fn options(mut self, options: RelationshipOptions) -> Self {
        self.options = options;
        self
    }

    /// Do not synthesize the opposite injected field.
    pub fn unidirectional(mut self, unidirectional: bool) -> Self {
        self.unidirectional = unidirectional;
        self
    }

    pub fn build(self) -> DomainResult<JdlRelationship> {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return Err(DomainError::MissingRelationshipEntities);
        };
        let Some(relationship_type) = self.relationship_type else {
            return Err(DomainError::InvalidRelationshipShape);
        };
        if self.injected_field_in_from.is_none() && self.injected_field_in_to.is_none() {
            return Err(DomainError::InvalidRelationshipShape);
        }

        let mut injected_field_in_from = self.injected_field_in_from;
        let mut injected_field_in_to = self.injected_field_in_to;
        if relationship_type == RelationshipType::OneToMany && !self.unidirectional {
            if injected_field_in_to.is_none() {
                let synthesized = lower_first(&from);
                info!(
                    from = %from, to = %to, field = %synthesized,
                    "Synthesizing missing injected field on the destination side"
                );
                injected_field_in_to = Some(synthesized);
            } else if injected_field_in_from.is_none() {
                let synthesized = lower_first(&to);
                info!(
                    from = %from, to = %to, field = %synthesized,
                    "Synthesizing missing injected field on the source side"
                );
                injected_field_in_from = Some(synthesized);
            }
        }

        Ok(JdlRelationship {
            from,
            to,
            relationship_type,
            injected_field_in_from,
            injected_field_in_to,
            is_injected_field_in_from_required: self.is_injected_field_in_from_required,
            is_injected_field_in_to_required: self.is_injected_field_in_to_required,
            comment_in_from: self.comment_in_from,
            comment_in_to: self.comment_in_to,
            options: self.options,
        })
    }
}

/// Relationships of a document, partitioned by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdlRelationships {
    one_to_one: OrderedMap<String, JdlRelationship>,
    one_to_many: OrderedMap<String, JdlRelationship>,
    many_to_one: OrderedMap<String, JdlRelationship>,
    many_to_many: OrderedMap<String, JdlRelationship>,
}

impl JdlRelationships {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, relationship_type: RelationshipType) -> &OrderedMap<String, JdlRelationship> {
        match relationship_type {
            RelationshipType::OneToOne => &self.one_to_one,
            RelationshipType::OneToMany => &self.one_to_many,
            RelationshipType::ManyToOne => &self.many_to_one,
            RelationshipType::ManyToMany => &self.many_to_many,
        }
    }

    fn partition_mut(&mut self, relationship_type: RelationshipType) -> &mut OrderedMap<String, JdlRelationship> {
        match relationship_type {
            RelationshipType::OneToOne => &mut self.one_to_one,
            RelationshipType::OneToMany => &mut self.one_to_many,
            RelationshipType::ManyToOne => &mut self.many_to_one,
            RelationshipType::ManyToMany => &mut self.many_to_many,
        }
    }

    /// Returns `false` when a relationship with the same id is already present.
    pub fn add(&mut self, relationship: JdlRelationship) -> bool {
        let id = relationship.id();
        let partition = self.partition_mut(relationship.relationship_type());
        if partition.contains_key(&id) {
            return false;
        }
        partition.insert(id, relationship);
        true
    }

    pub fn get(&self, relationship_type: RelationshipType, id: &str) -> Option<&JdlRelationship> {
        self.partition(relationship_type).get(id)
    }

    pub fn get_many_to_many(&self, id: &str) -> Option<&JdlRelationship> {
        self.get(RelationshipType::ManyToMany, id)
    }

    pub fn quantity_of(&self, relationship_type: RelationshipType) -> usize {
        self.partition(relationship_type).len()
    }

    pub fn one_to_one_quantity(&self) -> usize {
        self.one_to_one.len()
    }

    pub fn one_to_many_quantity(&self) -> usize {
        self.one_to_many.len()
    }

    pub fn many_to_one_quantity(&self) -> usize {
        self.many_to_one.len()
    }

    pub fn many_to_many_quantity(&self) -> usize {
        self.many_to_many.len()
    }

    pub fn size(&self) -> usize {
        RelationshipType::ALL.iter().map(|t| self.quantity_of(*t)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &JdlRelationship> {
        RelationshipType::ALL
            .iter()
            .flat_map(move |t| self.partition(*t).values())
    }

    pub fn to_vec(&self) -> Vec<&JdlRelationship> {
        self.iter().collect()
    }

    pub fn for_each<F: FnMut(&JdlRelationship)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl fmt::Display for JdlRelationships {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn many_to_many() -> RelationshipBuilder {
        JdlRelationship::builder()
            .from("Abc")
            .to("Abc2")
            .relationship_type(RelationshipType::ManyToMany)
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    #[test]
    fn missing_entities_fail() {
        let err = JdlRelationship::builder()
            .from("Abc")
            .relationship_type(RelationshipType::OneToOne)
            .injected_field_in_from("abc2")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Source and destination entities must be passed to create a relationship."
        );
    }

    #[test]
    fn missing_injected_field_fails() {
        let err = many_to_many().build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "A valid type and at least one injected field must be passed to create a relationship."
        );
    }

    #[test]
    fn missing_type_fails() {
        let err = JdlRelationship::builder()
            .from("A")
            .to("B")
            .injected_field_in_from("b")
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidRelationshipShape);
    }

    #[test]
    fn one_to_many_synthesizes_destination_field() {
        let relationship = JdlRelationship::builder()
            .from("OrderItem")
            .to("Line")
            .relationship_type(RelationshipType::OneToMany)
            .injected_field_in_from("lines")
            .build()
            .unwrap();
        assert_eq!(relationship.injected_field_in_to(), Some("orderItem"));
    }

    #[test]
    fn unidirectional_suppresses_synthesis() {
        let relationship = JdlRelationship::builder()
            .from("A")
            .to("B")
            .relationship_type(RelationshipType::OneToMany)
            .injected_field_in_from("bs")
            .unidirectional(true)
            .build()
            .unwrap();
        assert_eq!(relationship.injected_field_in_to(), None);
    }

    #[test]
    fn other_types_are_left_alone() {
        let relationship = many_to_many().injected_field_in_from("abc2").build().unwrap();
        assert_eq!(relationship.injected_field_in_to(), None);
    }

    // ---------------------------------------------------------------------
    // Identity and options
    // ---------------------------------------------------------------------

    #[test]
    fn id_uses_type_source_field_and_destination() {
        let relationship = many_to_many()
            .injected_field_in_from("abc2")
            .injected_field_in_to("abc")
            .build()
            .unwrap();
        assert_eq!(relationship.id(), "ManyToMany_Abc{abc2}_Abc2");
    }

    #[test]
    fn global_options() {
        let relationship = many_to_many()
            .injected_field_in_from("abc2")
            .global_option("builtInEntity", None)
            .build()
            .unwrap();
        assert!(relationship.has_global_option("builtInEntity"));
        assert!(!relationship.has_global_option("jpaDerivedIdentifier"));

        let mut seen = Vec::new();
        relationship.for_each_global_option(|name, _| seen.push(name.to_string()));
        assert_eq!(seen, vec!["builtInEntity"]);
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    #[test]
    fn renders_both_sides() {
        let relationship = many_to_many()
            .injected_field_in_from("abc2(name)")
            .injected_field_in_to("abc")
            .injected_field_in_from_required(true)
            .build()
            .unwrap();
        assert_eq!(
            relationship.to_string(),
            "relationship ManyToMany {\n  Abc{abc2(name) required} to Abc2{abc}\n}"
        );
    }

    #[test]
    fn renders_comments_annotations_and_global_options() {
        let relationship = JdlRelationship::builder()
            .from("A")
            .to("B")
            .relationship_type(RelationshipType::OneToOne)
            .injected_field_in_from("b")
            .comment_in_from("from comment")
            .source_option("id", None)
            .destination_option("idGenerator", Some("sequence".into()))
            .global_option("builtInEntity", None)
            .build()
            .unwrap();
        assert_eq!(
            relationship.to_string(),
            "relationship OneToOne {\n  /**\n   * from comment\n   */\n  @id\n  A{b} to\n  @idGenerator(sequence)\n  B with builtInEntity\n}"
        );
    }

    // ---------------------------------------------------------------------
    // JdlRelationships
    // ---------------------------------------------------------------------

    #[test]
    fn partitioned_collection() {
        let mut relationships = JdlRelationships::new();
        let m2m = many_to_many().injected_field_in_from("abc2").build().unwrap();
        let o2o = JdlRelationship::builder()
            .from("A")
            .to("B")
            .relationship_type(RelationshipType::OneToOne)
            .injected_field_in_from("b")
            .build()
            .unwrap();

        assert!(relationships.add(m2m.clone()));
        assert!(!relationships.add(m2m.clone()));
        assert!(relationships.add(o2o.clone()));

        assert_eq!(relationships.size(), 2);
        assert_eq!(relationships.many_to_many_quantity(), 1);
        assert_eq!(relationships.get_many_to_many(&m2m.id()), Some(&m2m));
        assert_eq!(relationships.to_vec(), vec![&o2o, &m2m]);
    }
}
