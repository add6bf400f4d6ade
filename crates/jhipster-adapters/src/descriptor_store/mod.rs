//! Entity descriptor stores.

mod local;
mod memory;

pub use local::LocalDescriptorStore;
pub use memory::MemoryDescriptorStore;
