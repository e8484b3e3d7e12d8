//! Workspace config file source: `<workspace>/.capcomp/config.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Add the workspace config file to the builder when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(".capcomp").join("config.toml");
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
