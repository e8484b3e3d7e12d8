//! Catalog lint: cross-capability consistency checks.
//!
//! Schema rules are enforced when files load. Lint covers what a single file
//! cannot know on its own: whether prerequisites exist anywhere in the
//! catalog, whether their versions can ever be satisfied, and whether the
//! prerequisite graph has cycles.

use crate::capability::graph::prerequisite_cycles;
use crate::capability::registry::CapabilityCatalog;
use serde::Serialize;
use std::collections::HashMap;

/// Lint findings for one capability
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub capability_id: String,
    pub checks: Vec<(String, bool)>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn new(capability_id: String) -> Self {
        Self {
            capability_id,
            checks: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_check(&mut self, description: &str, passed: bool) {
        self.checks.push((description.to_string(), passed));
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Warnings do not fail a report.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }
}

/// Lint every capability in the catalog. Reports are sorted by id.
pub fn lint_catalog(catalog: &CapabilityCatalog) -> Vec<LintReport> {
    let capabilities = catalog.list_all();
    let positions: HashMap<&str, usize> = capabilities
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    let graph: Vec<Vec<usize>> = capabilities
        .iter()
        .map(|c| {
            c.prerequisite_ids()
                .filter_map(|id| positions.get(id).copied())
                .collect()
        })
        .collect();
    let mut cycle_of: HashMap<usize, Vec<&str>> = HashMap::new();
    for cycle in prerequisite_cycles(&graph) {
        let members: Vec<&str> = cycle.iter().map(|&i| capabilities[i].id.as_str()).collect();
        for &member in &cycle {
            cycle_of.insert(member, members.clone());
        }
    }

    capabilities
        .iter()
        .enumerate()
        .map(|(position, capability)| {
            let mut report = LintReport::new(capability.id.clone());

            match catalog
                .source_path(&capability.id)
                .and_then(|p| p.file_stem())
                .and_then(|s| s.to_str())
            {
                Some(stem) if stem == capability.id => {
                    report.add_check("File name matches id", true)
                }
                Some(stem) => {
                    report.add_check("File name matches id", false);
                    report.add_warning(format!(
                        "File name '{}' does not match id '{}'",
                        stem, capability.id
                    ));
                }
                // Registered in memory, nothing to compare.
                None => {}
            }

            let missing: Vec<&str> = capability
                .prerequisite_ids()
                .filter(|id| !catalog.contains(id))
                .collect();
            report.add_check("Prerequisites resolve in catalog", missing.is_empty());
            for id in &missing {
                report.add_error(format!("Prerequisite '{}' is not in the catalog", id));
            }

            let mut satisfiable = true;
            for prerequisite in &capability.prerequisites {
                if let Some(target) = catalog.get(&prerequisite.id) {
                    if !prerequisite.version.matches(&target.version) {
                        satisfiable = false;
                        report.add_error(format!(
                            "Prerequisite '{}' requires version {} but catalog has {}",
                            prerequisite.id, prerequisite.version, target.version
                        ));
                    }
                }
            }
            report.add_check("Prerequisite versions satisfiable", satisfiable);

            match cycle_of.get(&position) {
                Some(members) => {
                    report.add_check("No prerequisite cycle", false);
                    report.add_error(format!(
                        "Part of prerequisite cycle: {}",
                        members.join(" -> ")
                    ));
                }
                None => report.add_check("No prerequisite cycle", true),
            }

            if capability.category.is_none() {
                report.add_warning("No category declared".to_string());
            }

            report
        })
        .collect()
}
