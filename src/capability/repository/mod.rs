//! Capability catalog repository port and adapters.

pub mod contract;
pub mod directory;

pub use contract::{CatalogRepository, StoredCapability};
pub use directory::DirectoryCatalogRepository;
