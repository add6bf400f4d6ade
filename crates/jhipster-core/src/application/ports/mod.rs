//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world; the
//! `jhipster-adapters` crate implements them.
//!
//! - `DocumentSource`: reads parsed JDL documents
//! - `DescriptorStore`: lists, loads and saves `.jhipster/<Entity>.json`

pub mod output;

pub use output::{DescriptorStore, DocumentSource};

#[cfg(test)]
pub use output::{MockDescriptorStore, MockDocumentSource};
