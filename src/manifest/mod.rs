//! Template Manifests
//!
//! A manifest names a base template and the capabilities to compose onto it.
//! Files are read into a permissive document model, then converted into a
//! [`TemplateManifest`]; any missing or unparsable required field fails the
//! conversion with a `malformed_manifest` error before validation starts.

mod document;
mod model;

pub use document::ManifestDocument;
pub use model::{
    discover_manifests, CapabilityEntry, ConflictResolution, ManifestMetadata, TemplateManifest,
};
