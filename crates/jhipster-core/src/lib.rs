//! JHipster JDL core, hexagonal architecture.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        jhipster-cli (jhipster-jdl)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ModelService, PreparationService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (DocumentSource, DescriptorStore)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    jhipster-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  JDL model, merge, conversion,          │
//! │  entity preparation                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use jhipster_core::domain::{JdlEntity, JdlField, JdlObject, merge_jdl_objects};
//!
//! let mut first = JdlObject::new();
//! first.add_entity(JdlEntity::new("A").unwrap());
//!
//! let mut entity = JdlEntity::new("B").unwrap();
//! entity.add_field(JdlField::new("name", "String").unwrap());
//! let mut second = JdlObject::new();
//! second.add_entity(entity);
//!
//! let merged = merge_jdl_objects(Some(&first), Some(&second)).unwrap();
//! assert_eq!(merged.entity_names(), vec!["A", "B"]);
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        DescriptorStore, DocumentSource, ModelService, ModelSummary, PreparationService,
    };
    pub use crate::domain::{
        ApplicationContext, ConversionOptions, DatabaseType, Diagnostics, EntityDescriptor,
        JdlDocument, JdlObject, Preparation, PreparedEntity,
    };
    pub use crate::error::{JhipsterError, JhipsterResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
