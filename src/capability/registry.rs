//! Capability catalog: the in-memory registry validation runs against.

use crate::capability::domain::Capability;
use crate::capability::repository::{CatalogRepository, DirectoryCatalogRepository};
use crate::error::ApiError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Catalog of known capabilities keyed by id.
///
/// Loaded once, then passed by reference to every validation. Holds no
/// interior mutability, so a single catalog can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CapabilityCatalog {
    capabilities: HashMap<String, Capability>,
    sources: HashMap<String, PathBuf>,
}

impl CapabilityCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from in-memory definitions. Later definitions replace
    /// earlier ones with the same id.
    pub fn from_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut catalog = Self::new();
        for capability in capabilities {
            catalog.register(capability);
        }
        catalog
    }

    /// Register a capability, replacing any existing one with the same id
    pub fn register(&mut self, capability: Capability) {
        self.capabilities.insert(capability.id.clone(), capability);
    }

    /// Load every definition a repository provides. Two definitions sharing an
    /// id make the catalog malformed.
    pub fn load_from_repository(repository: &dyn CatalogRepository) -> Result<Self, ApiError> {
        let mut catalog = Self::new();
        for stored in repository.list()? {
            let id = stored.capability.id.clone();
            if let Some(existing) = catalog.sources.get(&id) {
                return Err(ApiError::malformed_catalog(
                    &stored.path,
                    format!(
                        "capability id '{}' is already defined in {}",
                        id,
                        existing.display()
                    ),
                ));
            }
            catalog.sources.insert(id, stored.path);
            catalog.register(stored.capability);
        }
        tracing::info!(
            root = %repository.root().display(),
            capabilities = catalog.len(),
            "Capability catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from a directory of definition files
    pub fn load_from_dir(dir: &Path, strict: bool) -> Result<Self, ApiError> {
        let repository = DirectoryCatalogRepository::new(dir).with_strict(strict);
        Self::load_from_repository(&repository)
    }

    /// Get a capability by id
    pub fn get(&self, id: &str) -> Option<&Capability> {
        self.capabilities.get(id)
    }

    /// Get a capability by id or return an error
    pub fn get_or_error(&self, id: &str) -> Result<&Capability, ApiError> {
        self.get(id)
            .ok_or_else(|| ApiError::CapabilityNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.capabilities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// File a capability was loaded from, when it came from disk
    pub fn source_path(&self, id: &str) -> Option<&Path> {
        self.sources.get(id).map(PathBuf::as_path)
    }

    /// All capabilities sorted by id
    pub fn list_all(&self) -> Vec<&Capability> {
        let mut all: Vec<&Capability> = self.capabilities.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Capabilities filtered by category, sorted by id
    pub fn list_by_category(&self, category: Option<&str>) -> Vec<&Capability> {
        match category {
            Some(filter) => self
                .list_all()
                .into_iter()
                .filter(|c| c.category.as_deref() == Some(filter))
                .collect(),
            None => self.list_all(),
        }
    }

    /// BLAKE3 digest of the catalog content, hex encoded.
    ///
    /// Independent of load order and file locations; two catalogs with the same
    /// definitions share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for capability in self.list_all() {
            // Serializing plain data into a Vec cannot fail.
            let bytes = serde_json::to_vec(capability).unwrap_or_default();
            hasher.update(&(bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        let digest: crate::types::Digest = hasher.finalize().into();
        hex::encode(digest)
    }
}
