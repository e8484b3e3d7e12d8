//! Configuration
//!
//! Layered configuration for capcomp: built-in defaults, a global file, a
//! workspace file and `CAPCOMP__*` environment variables, merged by the
//! `config` crate and deserialized into [`CapcompConfig`].

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapcompConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Where capability definitions live and how strictly they are loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog directory; relative paths resolve against the workspace root.
    /// None means `$XDG_CONFIG_HOME/capcomp/capabilities`.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Abort on the first malformed capability file (default: true).
    /// When false, malformed files are logged and skipped.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            strict: default_strict(),
        }
    }
}

impl CatalogConfig {
    /// Resolve the catalog directory. A CLI override wins over configuration;
    /// either one, when relative, resolves against the workspace root.
    pub fn resolve_dir(
        &self,
        cli_override: Option<&Path>,
        workspace_root: &Path,
    ) -> Result<PathBuf, ApiError> {
        match cli_override.or(self.dir.as_deref()) {
            Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
            Some(dir) => Ok(workspace_root.join(dir)),
            None => xdg::default_catalog_dir(),
        }
    }
}

/// Output defaults for validation commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Output format used when a command gets no --format flag: text or json
    #[serde(default = "default_output_format")]
    pub default_format: String,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_format: default_output_format(),
        }
    }
}

impl CapcompConfig {
    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<(), ApiError> {
        match self.validation.default_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ApiError::ConfigError(format!(
                "Invalid validation.default_format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}
