//! Error types for capcomp.
//!
//! Two families exist. Input-contract errors (malformed manifest or catalog)
//! abort an operation before any composition check runs. Everything else is an
//! operational failure: I/O, configuration, lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a run that found composition violations or lint errors.
pub const EXIT_VIOLATIONS: i32 = 1;
/// Exit code for malformed manifest or catalog input.
pub const EXIT_MALFORMED: i32 = 3;
/// Exit code for any other failure.
pub const EXIT_FAILURE: i32 = 4;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("malformed_manifest: {source_name}: {reason}")]
    MalformedManifest { source_name: String, reason: String },

    #[error("malformed_catalog: {}: {reason}", path.display())]
    MalformedCatalog { path: PathBuf, reason: String },

    #[error("Capability not found: {0}")]
    CapabilityNotFound(String),

    #[error("No manifests found under: {0}")]
    NoManifests(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn malformed_manifest(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::MalformedManifest {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_catalog(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ApiError::MalformedCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by malformed manifest or catalog input.
    pub fn is_input_contract(&self) -> bool {
        matches!(
            self,
            ApiError::MalformedManifest { .. } | ApiError::MalformedCatalog { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_input_contract() {
            EXIT_MALFORMED
        } else {
            EXIT_FAILURE
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
