//! The JDL object model.
//!
//! A [`JdlObject`] aggregates everything one JDL document declares:
//! applications, deployments, entities, enums, relationships and options.
//! Objects are built once per document, merged with
//! [`merge_jdl_objects`]/[`merge_all`], then handed read-only to the
//! conversion and preparation stages.

pub mod application;
pub mod deployment;
pub mod entity;
pub mod enums;
pub mod field;
pub mod merger;
pub mod object;
pub mod options;
pub mod relationship;

pub use application::{
    ConfigurationOption, JdlApplication, JdlApplicationConfiguration, JdlApplicationEntities,
    OptionKind, OptionValue, known_option_kind,
};
pub use deployment::JdlDeployment;
pub use entity::JdlEntity;
pub use enums::{JdlEnum, JdlEnumValue};
pub use field::{JdlField, JdlValidation};
pub use merger::{merge_all, merge_jdl_objects};
pub use object::JdlObject;
pub use options::{
    EntityScope, JdlBinaryOption, JdlOption, JdlOptions, JdlUnaryOption, OptionArgs, binary, unary,
};
pub use relationship::{JdlRelationship, JdlRelationships, RelationshipBuilder, RelationshipOptions};
