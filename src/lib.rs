//! capcomp: Capability Composition Validator
//!
//! Checks whether a template manifest (a base template plus an ordered list of
//! capabilities) forms a valid composition against a catalog of capability
//! definitions, and resolves valid compositions into a load order and
//! behavior bindings.

pub mod capability;
pub mod composition;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod tooling;
pub mod types;
pub mod version;

pub use capability::{Capability, CapabilityCatalog};
pub use composition::{validate, validate_batch, CompositionResult, Violation, ViolationKind};
pub use error::ApiError;
pub use manifest::{CapabilityEntry, ConflictResolution, TemplateManifest};
