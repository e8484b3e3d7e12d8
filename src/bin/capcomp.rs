//! capcomp CLI Binary
//!
//! Validates capability compositions from the command line.

use anyhow::Context;
use capcomp::config::ConfigLoader;
use capcomp::error::{ApiError, EXIT_FAILURE};
use capcomp::logging::init_logging;
use capcomp::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    }
    .context("Failed to load configuration")?;

    let logging = config.logging.clone().with_overrides(&cli.log_overrides());
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = CliContext::from_config(cli.workspace.clone(), config, cli.catalog.as_deref())
        .context("Failed to load capability catalog")?;
    let output = context.execute(&cli.command)?;
    println!("{}", output.text.trim_end());
    Ok(output.exit_code)
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<ApiError>()
                .map(ApiError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            process::exit(code);
        }
    }
}
