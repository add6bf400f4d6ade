//! Application layer.
//!
//! - **Services**: use case orchestration (`ModelService`, `PreparationService`)
//! - **Ports**: traits for documents and descriptor storage
//! - **Errors**: orchestration failures
//!
//! Services coordinate the domain layer but contain no business rules
//! themselves. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ModelService, ModelSummary, PreparationService};

pub use ports::{DescriptorStore, DocumentSource};

pub use error::ApplicationError;
