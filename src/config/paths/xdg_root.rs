//! XDG Base Directory utilities.

use crate::error::ApiError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Default capability catalog directory
///
/// Returns `$XDG_CONFIG_HOME/capcomp/capabilities/`. Never created here; a
/// missing catalog is reported by the loader.
pub fn default_catalog_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("capcomp").join("capabilities"))
}
