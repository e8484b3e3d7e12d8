//! Global config file source: `$XDG_CONFIG_HOME/capcomp/config.toml`

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file to the builder when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(config_home) = xdg::config_home() else {
        return Ok(builder);
    };
    let path = config_home.join("capcomp").join("config.toml");
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
