use std::str::FromStr;

use crate::domain::{
    common::{lower_first, upper_first},
    descriptor::{EntityDescriptor, RelationshipDescriptor},
    error::{DomainError, DomainResult},
    value_objects::RelationshipType,
};

use super::{
    Catalog,
    model::{PreparedEntity, PreparedRelationship, RelationshipFlags},
};

/// Entities every application provides without declaring them.
pub const BUILT_IN_ENTITIES: [&str; 2] = ["user", "authority"];

fn prepare_relationship(
    entity: &EntityDescriptor,
    relationship: &RelationshipDescriptor,
    catalog: &Catalog<'_>,
) -> DomainResult<PreparedRelationship> {
    let relationship_name = relationship.relationship_name.clone().unwrap_or_default();
    let relationship_type = relationship
        .relationship_type
        .as_deref()
        .map(RelationshipType::from_str)
        .transpose()?
        .ok_or_else(|| DomainError::UnknownRelationshipType(String::new()))?;
    let other_entity_name = relationship.other_entity_name.clone().unwrap_or_default();

    let (other_entity_is_embedded, other_entity_is_built_in) = match catalog.get(&other_entity_name) {
        Some(other) => (other.embedded, false),
        None if BUILT_IN_ENTITIES.contains(&lower_first(&other_entity_name).as_str()) => (false, true),
        None => {
            return Err(DomainError::UnknownRelatedEntity {
                entity: entity.name.clone(),
                relationship: relationship_name,
            });
        }
    };

    let owner_side = match relationship_type {
        RelationshipType::ManyToOne => true,
        RelationshipType::OneToMany => false,
        RelationshipType::OneToOne | RelationshipType::ManyToMany => relationship.owner_side.unwrap_or(false),
    };

    Ok(PreparedRelationship {
        relationship_name_capitalized: upper_first(&relationship_name),
        relationship_name,
        relationship_type: relationship_type.as_kebab().to_string(),
        other_entity_name_capitalized: upper_first(&other_entity_name),
        other_entity_name,
        other_entity_field: relationship
            .other_entity_field
            .clone()
            .unwrap_or_else(|| "id".to_string()),
        other_entity_relationship_name: relationship.other_entity_relationship_name.clone(),
        owner_side,
        collection: relationship_type.is_collection(),
        relationship_required: relationship.is_required(),
        other_entity_is_embedded,
        other_entity_is_built_in,
        id: relationship.id,
        javadoc: relationship.javadoc.clone(),
    })
}

/// Pass: classify relationships and group them by the other entity.
///
/// Fails when a relationship targets an entity that is neither declared nor
/// built in.
pub(super) fn prepare_relationships(
    entity: &mut PreparedEntity,
    descriptor: &EntityDescriptor,
    catalog: &Catalog<'_>,
) -> DomainResult<()> {
    let mut flags = RelationshipFlags::default();
    let mut prepared = Vec::with_capacity(descriptor.relationships.len());

    for relationship in &descriptor.relationships {
        let relationship = prepare_relationship(descriptor, relationship, catalog)?;
        let kind = RelationshipType::from_str(&relationship.relationship_type)?;

        match kind {
            RelationshipType::ManyToMany if relationship.owner_side => {
                flags.fields_contain_owner_many_to_many = true;
            }
            RelationshipType::OneToOne if relationship.owner_side => {
                flags.fields_contain_owner_one_to_one = true;
            }
            RelationshipType::OneToOne => flags.fields_contain_no_owner_one_to_one = true,
            RelationshipType::OneToMany => flags.fields_contain_one_to_many = true,
            RelationshipType::ManyToOne => flags.fields_contain_many_to_one = true,
            RelationshipType::ManyToMany => {}
        }
        flags.fields_contain_embedded |= relationship.other_entity_is_embedded;

        if !relationship.other_entity_is_embedded {
            let key = relationship.other_entity_name_capitalized.clone();
            match entity.different_relationships.get_mut(&key) {
                Some(names) => names.push(relationship.relationship_name.clone()),
                None => {
                    entity
                        .different_relationships
                        .insert(key, vec![relationship.relationship_name.clone()]);
                }
            }
        }
        prepared.push(relationship);
    }

    entity.relationship_flags = flags;
    entity.relationships = prepared;
    Ok(())
}
