//! Capabilities
//!
//! Named, versioned units of declared behavior. Definitions are loaded from
//! files, schema-checked once at load time, and held in a
//! [`CapabilityCatalog`] that validation looks capabilities up in.

mod commands;
pub mod domain;
pub mod graph;
pub mod lint;
mod registry;
pub mod repository;

pub use commands::{
    CatalogCommandService, CatalogLintResult, CatalogListItem, CatalogListResult, CatalogShowResult,
};
pub use domain::{Behavior, Capability, Prerequisite};
pub use lint::{lint_catalog, LintReport};
pub use registry::CapabilityCatalog;
pub use repository::{CatalogRepository, DirectoryCatalogRepository, StoredCapability};
