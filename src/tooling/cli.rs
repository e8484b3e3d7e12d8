//! CLI Tooling
//!
//! Command tree and execution context for the `capcomp` binary. Commands
//! delegate to the command services and return formatted output plus the
//! process exit code.

use crate::capability::{CapabilityCatalog, CatalogCommandService};
use crate::composition::CompositionCommandService;
use crate::config::CapcompConfig;
use crate::error::{ApiError, EXIT_VIOLATIONS};
use crate::logging::LogOverrides;
use crate::tooling::format::{self, OutputFormat};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// capcomp - capability composition validator
#[derive(Parser, Debug)]
#[command(name = "capcomp", version)]
#[command(about = "Validate capability compositions for agent base templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces global and workspace config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Capability catalog directory (overrides catalog.dir; relative to --workspace)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more manifests (files or directories)
    Validate {
        /// Manifest files or directories containing manifests
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output format (text or json)
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,
        /// Include warnings and resolution details
        #[arg(long)]
        verbose: bool,
    },
    /// Print the resolved composition of a manifest
    Resolve {
        /// Manifest file
        manifest: PathBuf,
        /// Output format (text or json)
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,
    },
    /// Inspect the capability catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List capabilities
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Output format (text or json)
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,
    },
    /// Show capability details
    Show {
        /// Capability id
        id: String,
        /// Output format (text or json)
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,
    },
    /// Check catalog consistency
    Lint {
        /// Output format (text or json)
        #[arg(long, value_parser = ["text", "json"])]
        format: Option<String>,
        /// Show every check, not only failures
        #[arg(long)]
        verbose: bool,
    },
}

/// Rendered command output and the exit code it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn new(text: String, exit_code: i32) -> Self {
        Self { text, exit_code }
    }
}

/// CLI context: resolved configuration plus the loaded catalog.
pub struct CliContext {
    workspace_root: PathBuf,
    config: CapcompConfig,
    catalog: CapabilityCatalog,
    color: bool,
}

impl CliContext {
    /// Build a context from loaded configuration, then load the catalog.
    pub fn from_config(
        workspace_root: PathBuf,
        config: CapcompConfig,
        catalog_override: Option<&Path>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        let catalog_dir = config
            .catalog
            .resolve_dir(catalog_override, &workspace_root)?;
        let catalog = CapabilityCatalog::load_from_dir(&catalog_dir, config.catalog.strict)?;
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

        Ok(Self {
            workspace_root,
            config,
            catalog,
            color,
        })
    }

    /// Force colored text output on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn catalog(&self) -> &CapabilityCatalog {
        &self.catalog
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        tracing::debug!(?command, "Executing command");
        match command {
            Commands::Validate {
                paths,
                format,
                verbose,
            } => {
                let paths = self.resolve_paths(paths);
                let result = CompositionCommandService::validate(&self.catalog, &paths)?;
                let text = match self.output_format(format.as_deref()) {
                    OutputFormat::Json => format::validate_json(&result),
                    OutputFormat::Text => format::validate_text(&result, *verbose, self.color),
                };
                Ok(CommandOutput::new(text, result.exit_code()))
            }
            Commands::Resolve { manifest, format } => {
                let path = self.resolve_path(manifest);
                let result = CompositionCommandService::resolve(&self.catalog, &path)?;
                let text = match self.output_format(format.as_deref()) {
                    OutputFormat::Json => format::resolve_json(&result),
                    OutputFormat::Text => format::resolve_text(&result, self.color),
                };
                Ok(CommandOutput::new(text, result.exit_code()))
            }
            Commands::Catalog { command } => self.execute_catalog(command),
        }
    }

    fn execute_catalog(&self, command: &CatalogCommands) -> Result<CommandOutput, ApiError> {
        match command {
            CatalogCommands::List { category, format } => {
                let result = CatalogCommandService::list(&self.catalog, category.as_deref())?;
                let text = match self.output_format(format.as_deref()) {
                    OutputFormat::Json => format::catalog_list_json(&result),
                    OutputFormat::Text => format::catalog_list_text(&result, self.color),
                };
                Ok(CommandOutput::new(text, 0))
            }
            CatalogCommands::Show { id, format } => {
                let result = CatalogCommandService::show(&self.catalog, id)?;
                let text = match self.output_format(format.as_deref()) {
                    OutputFormat::Json => format::catalog_show_json(&result),
                    OutputFormat::Text => format::catalog_show_text(&result, self.color),
                };
                Ok(CommandOutput::new(text, 0))
            }
            CatalogCommands::Lint { format, verbose } => {
                let result = CatalogCommandService::lint(&self.catalog)?;
                let text = match self.output_format(format.as_deref()) {
                    OutputFormat::Json => {
                        format::catalog_lint_json(&result, &self.catalog.fingerprint())
                    }
                    OutputFormat::Text => format::catalog_lint_text(&result, *verbose, self.color),
                };
                let exit_code = if result.is_valid() { 0 } else { EXIT_VIOLATIONS };
                Ok(CommandOutput::new(text, exit_code))
            }
        }
    }

    /// Explicit --format, else the configured default.
    fn output_format(&self, flag: Option<&str>) -> OutputFormat {
        let name = flag.unwrap_or(&self.config.validation.default_format);
        if name == "json" {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn resolve_paths(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths.iter().map(|p| self.resolve_path(p)).collect()
    }
}
