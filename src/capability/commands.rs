//! Catalog command service: one entry point per `catalog` CLI command variant.
//!
//! Owns catalog workflow logic; the CLI parses, calls one method, and formats output.

use crate::capability::domain::Capability;
use crate::capability::lint::{lint_catalog, LintReport};
use crate::capability::registry::CapabilityCatalog;
use crate::error::ApiError;
use std::path::PathBuf;

pub struct CatalogCommandService;

/// Result of catalog list command.
#[derive(Debug, Clone)]
pub struct CatalogListResult {
    pub capabilities: Vec<CatalogListItem>,
    pub fingerprint: String,
}

#[derive(Debug, Clone)]
pub struct CatalogListItem {
    pub id: String,
    pub version: String,
    pub category: Option<String>,
    pub prerequisites: Vec<String>,
    pub composable_with: Vec<String>,
}

/// Result of catalog show command.
#[derive(Debug, Clone)]
pub struct CatalogShowResult {
    pub capability: Capability,
    pub source: Option<PathBuf>,
}

/// Result of catalog lint command.
#[derive(Debug, Clone)]
pub struct CatalogLintResult {
    pub reports: Vec<LintReport>,
}

impl CatalogLintResult {
    pub fn valid_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_valid()).count()
    }

    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(LintReport::is_valid)
    }
}

impl CatalogCommandService {
    /// List capabilities, optionally filtered by category.
    pub fn list(
        catalog: &CapabilityCatalog,
        category: Option<&str>,
    ) -> Result<CatalogListResult, ApiError> {
        let capabilities = catalog
            .list_by_category(category)
            .into_iter()
            .map(|c| CatalogListItem {
                id: c.id.clone(),
                version: c.version.to_string(),
                category: c.category.clone(),
                prerequisites: c.prerequisites.iter().map(|p| p.id.clone()).collect(),
                composable_with: c.composable_with.clone(),
            })
            .collect();
        Ok(CatalogListResult {
            capabilities,
            fingerprint: catalog.fingerprint(),
        })
    }

    /// Show one capability.
    pub fn show(catalog: &CapabilityCatalog, id: &str) -> Result<CatalogShowResult, ApiError> {
        let capability = catalog.get_or_error(id)?.clone();
        Ok(CatalogShowResult {
            source: catalog.source_path(id).map(PathBuf::from),
            capability,
        })
    }

    /// Lint the whole catalog.
    pub fn lint(catalog: &CapabilityCatalog) -> Result<CatalogLintResult, ApiError> {
        Ok(CatalogLintResult {
            reports: lint_catalog(catalog),
        })
    }
}
