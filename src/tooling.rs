//! Tooling & Integration Layer
//!
//! Command-line surface over the catalog and composition services.

pub mod cli;
pub mod format;

pub use cli::{CatalogCommands, Cli, CliContext, CommandOutput, Commands};
