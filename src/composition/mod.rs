//! Composition
//!
//! Validates a [`TemplateManifest`](crate::manifest::TemplateManifest)
//! against a [`CapabilityCatalog`](crate::capability::CapabilityCatalog) and,
//! when the composition is valid, resolves it into a load order and behavior
//! bindings.

mod batch;
mod commands;
mod resolve;
mod result;
mod validator;
mod violation;

pub use batch::{validate_batch, validate_paths, BatchEntry, BatchSummary};
pub use commands::{CompositionCommandService, ResolveCommandResult, ValidateCommandResult};
pub use resolve::BehaviorBinding;
pub use result::{CompositionResult, ResolvedCapability, ResolvedComposition};
pub use validator::validate;
pub use violation::{CompositionWarning, Violation, ViolationKind, WarningKind};
