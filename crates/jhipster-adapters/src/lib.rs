//! Infrastructure adapters for the JDL core.
//!
//! This crate implements the ports defined in
//! `jhipster_core::application::ports`. It owns every filesystem access.

pub mod descriptor_store;
pub mod document;

pub use descriptor_store::{LocalDescriptorStore, MemoryDescriptorStore};
pub use document::{DocumentFormat, FileDocumentSource};
