//! Core domain layer.
//!
//! Pure, synchronous transformations over in-memory data:
//!
//! - the JDL object model and its merge ([`jdl`])
//! - the serde boundary for parsed JDL documents ([`document`])
//! - conversion to `.jhipster/<Entity>.json` descriptors ([`conversion`])
//! - descriptor validation and entity preparation ([`preparation`])
//!
//! Nothing here performs I/O. Loading documents and storing descriptors
//! happens behind the ports of [`crate::application`].

pub mod common;
pub mod conversion;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod jdl;
pub mod preparation;
pub mod validation;
pub mod value_objects;

pub use common::{OrderedMap, OrderedSet, lower_first, upper_first};
pub use conversion::{CHANGELOG_DATE_FORMAT, ConversionOptions, convert_to_descriptors};
pub use descriptor::{EntityDescriptor, FieldDescriptor, RelationshipDescriptor};
pub use document::JdlDocument;
pub use error::{DomainError, DomainResult, ErrorCategory};
pub use jdl::{
    JdlApplication, JdlDeployment, JdlEntity, JdlEnum, JdlField, JdlObject, JdlOption,
    JdlRelationship, JdlValidation, merge_all, merge_jdl_objects,
};
pub use preparation::{
    ApplicationContext, DatabaseType, Diagnostics, Preparation, PreparedEntity, prepare_entities,
};
pub use validation::{DescriptorValidator, validate_descriptor};
pub use value_objects::{BlobContent, DeploymentType, FieldType, RelationshipType, ValidationRule};
