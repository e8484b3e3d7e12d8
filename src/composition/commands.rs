//! Composition command service: entry points for `validate` and `resolve`.

use super::batch::{validate_paths, BatchEntry, BatchSummary};
use super::result::CompositionResult;
use super::validator::validate;
use crate::capability::CapabilityCatalog;
use crate::error::{ApiError, EXIT_VIOLATIONS};
use crate::manifest::{discover_manifests, TemplateManifest};
use std::path::{Path, PathBuf};

pub struct CompositionCommandService;

/// Result of the validate command over one or more manifests.
#[derive(Debug)]
pub struct ValidateCommandResult {
    pub entries: Vec<BatchEntry>,
    pub summary: BatchSummary,
    pub fingerprint: String,
}

impl ValidateCommandResult {
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}

/// Result of the resolve command for one manifest.
#[derive(Debug, Clone)]
pub struct ResolveCommandResult {
    pub source: String,
    pub base_template: String,
    pub result: CompositionResult,
    pub fingerprint: String,
}

impl ResolveCommandResult {
    pub fn exit_code(&self) -> i32 {
        if self.result.valid {
            0
        } else {
            EXIT_VIOLATIONS
        }
    }
}

impl CompositionCommandService {
    /// Validate every manifest found under `paths`. A single manifest that
    /// fails to parse is returned as an error; with several, failures are
    /// recorded per entry. Finding no manifests at all is an error.
    pub fn validate(
        catalog: &CapabilityCatalog,
        paths: &[PathBuf],
    ) -> Result<ValidateCommandResult, ApiError> {
        let manifests = discover_manifests(paths)?;
        let entries = match manifests.as_slice() {
            [] => {
                let searched: Vec<String> =
                    paths.iter().map(|p| p.display().to_string()).collect();
                return Err(ApiError::NoManifests(searched.join(", ")));
            }
            [single] => {
                let manifest = TemplateManifest::load(single)?;
                vec![BatchEntry {
                    source: single.display().to_string(),
                    outcome: Ok(validate(&manifest, catalog)?),
                }]
            }
            _ => validate_paths(&manifests, catalog),
        };
        Ok(ValidateCommandResult {
            summary: BatchSummary::from_entries(&entries),
            entries,
            fingerprint: catalog.fingerprint(),
        })
    }

    /// Validate one manifest and return its resolution.
    pub fn resolve(
        catalog: &CapabilityCatalog,
        path: &Path,
    ) -> Result<ResolveCommandResult, ApiError> {
        let manifest = TemplateManifest::load(path)?;
        let result = validate(&manifest, catalog)?;
        Ok(ResolveCommandResult {
            source: path.display().to_string(),
            base_template: manifest.base_template,
            result,
            fingerprint: catalog.fingerprint(),
        })
    }
}
