use crate::capability::domain::{validate_capability_file, CapabilityFile};
use crate::capability::repository::{CatalogRepository, StoredCapability};
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Serialization formats a capability file may use, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefinitionFormat {
    Yaml,
    Json,
    Toml,
}

impl DefinitionFormat {
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<CapabilityFile, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Loads capability definitions from a directory tree.
///
/// Strict mode fails on the first malformed file. Lenient mode logs it and
/// moves on.
pub struct DirectoryCatalogRepository {
    root: PathBuf,
    strict: bool,
}

impl DirectoryCatalogRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict: true,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn load_file(&self, path: &Path, format: DefinitionFormat) -> Result<StoredCapability, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| ApiError::io(path, e))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ApiError::malformed_catalog(path, format!("not valid UTF-8: {}", e)))?;
        let file = format
            .parse(&content)
            .map_err(|e| ApiError::malformed_catalog(path, format!("unparsable definition: {}", e)))?;
        let capability =
            validate_capability_file(file).map_err(|e| ApiError::malformed_catalog(path, e))?;

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if stem != capability.id {
                tracing::warn!(
                    "Capability id mismatch in {}: filename={}, id={}",
                    path.display(),
                    stem,
                    capability.id
                );
            }
        }

        Ok(StoredCapability {
            capability,
            path: path.to_path_buf(),
        })
    }
}

impl CatalogRepository for DirectoryCatalogRepository {
    fn list(&self) -> Result<Vec<StoredCapability>, ApiError> {
        if !self.root.is_dir() {
            return Err(ApiError::ConfigError(format!(
                "Capability catalog directory not found: {}",
                self.root.display()
            )));
        }

        let mut loaded = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.root.display(),
                        e
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(format) = DefinitionFormat::from_path(path) else {
                continue;
            };

            match self.load_file(path, format) {
                Ok(stored) => loaded.push(stored),
                Err(e) if self.strict => return Err(e),
                Err(e) => {
                    tracing::warn!("Skipping capability definition: {}", e);
                }
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            count = loaded.len(),
            "Loaded capability definitions"
        );
        Ok(loaded)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
