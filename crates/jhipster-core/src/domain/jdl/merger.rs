//! Non-mutating union of JDL objects.
//!
//! Applications, deployments, entities and enums are re-added in order, so
//! on a key collision the second object wins. Relationships collapse by id.
//! Options are replayed through [`JdlObject::add_option`], so options with
//! the same key accumulate entity names instead of being replaced.

use tracing::debug;

use crate::domain::error::{DomainError, DomainResult};

use super::object::JdlObject;

impl JdlObject {
    /// A new object holding the union of `self` and `other`.
    pub fn merged_with(&self, other: &JdlObject) -> JdlObject {
        let mut merged = JdlObject::new();
        for source in [self, other] {
            absorb(&mut merged, source);
        }
        debug!(
            entities = merged.entity_quantity(),
            relationships = merged.relationship_quantity(),
            options = merged.option_quantity(),
            "Merged JDL objects"
        );
        merged
    }
}

fn absorb(target: &mut JdlObject, source: &JdlObject) {
    for application in source.applications() {
        // Applications in an object always carry a base name.
        if let Err(err) = target.add_application(application.clone()) {
            debug!(error = %err, "Skipping application without base name");
        }
    }
    source.for_each_deployment(|deployment| target.add_deployment(deployment.clone()));
    source.for_each_entity(|entity| target.add_entity(entity.clone()));
    source.for_each_enum(|en| target.add_enum(en.clone()));
    source.for_each_relationship(|relationship| {
        target.add_relationship(relationship.clone());
    });
    source.for_each_option(|option| target.add_option(option.clone()));
}

/// Merge two objects, failing when either is absent.
pub fn merge_jdl_objects(first: Option<&JdlObject>, second: Option<&JdlObject>) -> DomainResult<JdlObject> {
    match (first, second) {
        (Some(first), Some(second)) => Ok(first.merged_with(second)),
        _ => Err(DomainError::NilMerge),
    }
}

/// Fold a list of objects into one, left to right.
pub fn merge_all(objects: &[JdlObject]) -> DomainResult<JdlObject> {
    let (first, rest) = objects.split_first().ok_or(DomainError::NilMerge)?;
    Ok(rest
        .iter()
        .fold(first.clone(), |merged, next| merged.merged_with(next)))
}
