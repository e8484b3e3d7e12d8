//! Fleet validation: many independent manifests against one catalog.

use super::result::CompositionResult;
use super::validator::validate;
use crate::capability::CapabilityCatalog;
use crate::error::{ApiError, EXIT_FAILURE, EXIT_MALFORMED, EXIT_VIOLATIONS};
use crate::manifest::TemplateManifest;
use rayon::prelude::*;
use std::path::PathBuf;

/// Outcome for one manifest in a batch
#[derive(Debug)]
pub struct BatchEntry {
    pub source: String,
    pub outcome: Result<CompositionResult, ApiError>,
}

impl BatchEntry {
    pub fn is_valid(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.valid)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Manifests that could not be parsed
    pub malformed: usize,
    /// Manifests that could not be read (I/O and similar)
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match &entry.outcome {
                Ok(result) if result.valid => summary.valid += 1,
                Ok(_) => summary.invalid += 1,
                Err(err) if err.is_input_contract() => summary.malformed += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Operational failures outrank malformed input, which outranks
    /// violations.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            EXIT_FAILURE
        } else if self.malformed > 0 {
            EXIT_MALFORMED
        } else if self.invalid > 0 {
            EXIT_VIOLATIONS
        } else {
            0
        }
    }
}

/// Validate parsed manifests in parallel. Output keeps input order.
pub fn validate_batch(
    manifests: &[TemplateManifest],
    catalog: &CapabilityCatalog,
) -> Vec<BatchEntry> {
    manifests
        .par_iter()
        .map(|manifest| BatchEntry {
            source: manifest.source_name.clone(),
            outcome: validate(manifest, catalog),
        })
        .collect()
}

/// Load and validate manifest files in parallel. A file that fails to load
/// becomes an error entry; the rest still run.
pub fn validate_paths(paths: &[PathBuf], catalog: &CapabilityCatalog) -> Vec<BatchEntry> {
    let entries: Vec<BatchEntry> = paths
        .par_iter()
        .map(|path| BatchEntry {
            source: path.display().to_string(),
            outcome: TemplateManifest::load(path).and_then(|m| validate(&m, catalog)),
        })
        .collect();
    let summary = BatchSummary::from_entries(&entries);
    tracing::info!(
        total = summary.total,
        valid = summary.valid,
        invalid = summary.invalid,
        malformed = summary.malformed,
        failed = summary.failed,
        "Batch validation finished"
    );
    entries
}
