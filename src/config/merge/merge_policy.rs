//! Built-in defaults every config builder starts from.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with defaults so partially specified files still deserialize.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("catalog.strict", true)?
        .set_default("validation.default_format", "text")
}
