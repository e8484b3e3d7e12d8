//! Environment overlay: `CAPCOMP__SECTION__KEY` variables.
//!
//! `CAPCOMP__CATALOG__DIR=/srv/caps` sets `catalog.dir`. Single-underscore
//! `CAPCOMP_LOG*` variables belong to the logging layer and are not read here.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};
use std::collections::HashMap;

const PREFIX: &str = "CAPCOMP";

fn source(vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

/// Overlay the process environment.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source(None)))
}

/// Overlay an explicit variable map instead of the process environment.
#[cfg(test)]
pub fn add_vars_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: HashMap<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source(Some(vars))))
}
