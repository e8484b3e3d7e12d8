use super::document::{EntryDocument, ManifestDocument};
use crate::error::ApiError;
use crate::version::{scalar_text, VersionConstraint};
use semver::Version;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Strategy applied when two capabilities bind the same behavior name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    /// Collisions are composition violations
    #[default]
    Error,
    /// Earliest-declared capability provides the behavior
    FirstWins,
    /// Latest-declared capability provides the behavior
    LastWins,
    /// All bindings retained, attributes unioned
    Merge,
}

impl ConflictResolution {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictResolution::Error => "error",
            ConflictResolution::FirstWins => "first-wins",
            ConflictResolution::LastWins => "last-wins",
            ConflictResolution::Merge => "merge",
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "error" => Ok(ConflictResolution::Error),
            "first-wins" | "first_wins" => Ok(ConflictResolution::FirstWins),
            "last-wins" | "last_wins" => Ok(ConflictResolution::LastWins),
            "merge" => Ok(ConflictResolution::Merge),
            other => Err(format!(
                "unknown conflict_resolution '{}' (expected error, first-wins, last-wins or merge)",
                other
            )),
        }
    }
}

/// Optional descriptive fields of a manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManifestMetadata {
    pub name: Option<String>,
    pub version: Option<Version>,
    pub author: Option<String>,
}

/// One requested capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityEntry {
    pub name: String,
    pub version: VersionConstraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl CapabilityEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: VersionConstraint::any(),
            config: None,
        }
    }

    pub fn with_version(mut self, version: VersionConstraint) -> Self {
        self.version = version;
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// A composition request: base template plus ordered capability entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateManifest {
    /// Where the manifest came from, used in messages
    pub source_name: String,
    pub metadata: ManifestMetadata,
    pub base_template: String,
    pub capabilities: Vec<CapabilityEntry>,
    pub conflict_resolution: ConflictResolution,
}

impl TemplateManifest {
    pub fn new(base_template: impl Into<String>) -> Self {
        Self {
            source_name: "<memory>".to_string(),
            metadata: ManifestMetadata::default(),
            base_template: base_template.into(),
            capabilities: Vec::new(),
            conflict_resolution: ConflictResolution::Error,
        }
    }

    pub fn with_capability(mut self, entry: CapabilityEntry) -> Self {
        self.capabilities.push(entry);
        self
    }

    pub fn with_conflict_resolution(mut self, policy: ConflictResolution) -> Self {
        self.conflict_resolution = policy;
        self
    }

    /// Read and parse a manifest file. `.json` files parse as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| ApiError::io(path, e))?;
        let source_name = path.display().to_string();
        let content = String::from_utf8(bytes).map_err(|e| {
            ApiError::malformed_manifest(&source_name, format!("not valid UTF-8: {}", e))
        })?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let document: ManifestDocument = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| ApiError::malformed_manifest(&source_name, e.to_string()))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| ApiError::malformed_manifest(&source_name, e.to_string()))?
        };
        Self::from_document(&source_name, document)
    }

    /// Parse manifest YAML (JSON is accepted too, being a YAML subset).
    pub fn from_yaml_str(source_name: &str, content: &str) -> Result<Self, ApiError> {
        let document: ManifestDocument = serde_yaml::from_str(content)
            .map_err(|e| ApiError::malformed_manifest(source_name, e.to_string()))?;
        Self::from_document(source_name, document)
    }

    /// Convert a parsed document, enforcing required fields.
    pub fn from_document(source_name: &str, document: ManifestDocument) -> Result<Self, ApiError> {
        let malformed = |reason: String| ApiError::malformed_manifest(source_name, reason);

        let metadata = match document.metadata {
            Some(meta) => {
                let version = match meta.version.as_ref() {
                    None => None,
                    Some(value) => {
                        let text = scalar_text(value).ok_or_else(|| {
                            malformed("metadata.version must be a version string".to_string())
                        })?;
                        Some(Version::parse(text.trim()).map_err(|e| {
                            malformed(format!("metadata.version '{}' is not semver: {}", text, e))
                        })?)
                    }
                };
                ManifestMetadata {
                    name: meta.name,
                    version,
                    author: meta.author,
                }
            }
            None => ManifestMetadata::default(),
        };

        let composition = document
            .composition
            .ok_or_else(|| malformed("missing required field 'composition'".to_string()))?;

        let base_template = composition
            .base_template
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                malformed("missing required field 'composition.base_template'".to_string())
            })?;

        let capabilities = composition
            .capabilities
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| convert_entry(index, entry).map_err(&malformed))
            .collect::<Result<Vec<_>, _>>()?;

        let conflict_resolution = match composition
            .composition_rules
            .and_then(|rules| rules.conflict_resolution)
        {
            Some(text) => text
                .parse::<ConflictResolution>()
                .map_err(|e| malformed(format!("composition.composition_rules: {}", e)))?,
            None => ConflictResolution::Error,
        };

        Ok(Self {
            source_name: source_name.to_string(),
            metadata,
            base_template,
            capabilities,
            conflict_resolution,
        })
    }

    /// Input contract the validator relies on. Parsed manifests always meet
    /// it; manifests built in code might not.
    pub fn check_contract(&self) -> Result<(), ApiError> {
        if self.base_template.trim().is_empty() {
            return Err(ApiError::malformed_manifest(
                &self.source_name,
                "missing required field 'composition.base_template'",
            ));
        }
        if let Some(index) = self
            .capabilities
            .iter()
            .position(|entry| entry.name.trim().is_empty())
        {
            return Err(ApiError::malformed_manifest(
                &self.source_name,
                format!(
                    "missing required field 'composition.capabilities[{}].name'",
                    index
                ),
            ));
        }
        Ok(())
    }

    /// Manifest display name: metadata name, else the source.
    pub fn display_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or(&self.source_name)
    }
}

fn convert_entry(index: usize, entry: EntryDocument) -> Result<CapabilityEntry, String> {
    let name = entry
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            format!(
                "missing required field 'composition.capabilities[{}].name'",
                index
            )
        })?;

    let version = match entry.version.as_ref() {
        None | Some(serde_json::Value::Null) => VersionConstraint::any(),
        Some(value) => {
            let text = scalar_text(value).ok_or_else(|| {
                format!(
                    "composition.capabilities[{}].version must be a version constraint string; quote decimal values such as \"1.10\"",
                    index
                )
            })?;
            VersionConstraint::parse(&text).map_err(|e| {
                format!(
                    "composition.capabilities[{}].version '{}' is not a valid constraint: {}",
                    index, text, e
                )
            })?
        }
    };

    Ok(CapabilityEntry {
        name,
        version,
        config: entry.config.filter(|c| !c.is_null()),
    })
}

/// Expand manifest paths: files are taken as given, directories are searched
/// recursively for `*.yaml`, `*.yml` and `*.json`. Output keeps argument order,
/// with each directory's files sorted by path.
pub fn discover_manifests(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ApiError> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut in_dir = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry.map_err(|e| {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    ApiError::io(path, source)
                })?;
                let is_manifest = matches!(
                    entry.path().extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml") | Some("json")
                );
                if entry.file_type().is_file() && is_manifest {
                    in_dir.push(entry.into_path());
                }
            }
            in_dir.sort();
            found.extend(in_dir);
        } else if path.is_file() {
            found.push(path.clone());
        } else {
            return Err(ApiError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such manifest file or directory"),
            ));
        }
    }
    Ok(found)
}
