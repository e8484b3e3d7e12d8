//! Composition validator.
//!
//! Checks run in a fixed order and every violation is collected; nothing
//! short-circuits after the input contract is met. Within a step, findings
//! follow manifest declaration order.

use super::resolve::{resolve_collision, sole_binding, Binder, BehaviorBinding};
use super::result::{CompositionResult, ResolvedCapability, ResolvedComposition};
use super::violation::{CompositionWarning, Violation, ViolationKind};
use crate::capability::graph::{load_order, prerequisite_cycles};
use crate::capability::{Capability, CapabilityCatalog};
use crate::error::ApiError;
use crate::manifest::{CapabilityEntry, ConflictResolution, TemplateManifest};
use std::collections::{HashMap, HashSet};

/// Validate a manifest against a catalog.
///
/// Returns `Err` only for a manifest that breaks the input contract (blank
/// base template or capability name); composition problems are reported in
/// the result.
pub fn validate(
    manifest: &TemplateManifest,
    catalog: &CapabilityCatalog,
) -> Result<CompositionResult, ApiError> {
    manifest.check_contract()?;

    let mut check = Validation::new(manifest, catalog);
    check.duplicates();
    check.unknown_capabilities();
    check.versions();
    check.template_compatibility();
    check.prerequisites();
    check.cycles();
    let bindings = check.behaviors();

    let valid = check.violations.is_empty();
    let resolved = valid.then(|| check.resolve(bindings));

    tracing::debug!(
        manifest = %manifest.source_name,
        valid,
        violations = check.violations.len(),
        warnings = check.warnings.len(),
        "Composition validated"
    );

    Ok(CompositionResult {
        valid,
        violations: check.violations,
        warnings: check.warnings,
        resolved,
    })
}

/// Working state for one validation run.
struct Validation<'a> {
    manifest: &'a TemplateManifest,
    catalog: &'a CapabilityCatalog,
    /// First occurrence of each name, declaration order
    unique: Vec<&'a CapabilityEntry>,
    /// Unique entries found in the catalog, declaration order
    present: Vec<(&'a CapabilityEntry, &'a Capability)>,
    violations: Vec<Violation>,
    warnings: Vec<CompositionWarning>,
}

impl<'a> Validation<'a> {
    fn new(manifest: &'a TemplateManifest, catalog: &'a CapabilityCatalog) -> Self {
        let mut seen = HashSet::new();
        let unique = manifest
            .capabilities
            .iter()
            .filter(|entry| seen.insert(entry.name.as_str()))
            .collect();
        Self {
            manifest,
            catalog,
            unique,
            present: Vec::new(),
            violations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn emit(&mut self, violation: Violation) {
        tracing::debug!(kind = %violation.kind, "{}", violation.message);
        self.violations.push(violation);
    }

    fn duplicates(&mut self) {
        let manifest = self.manifest;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &manifest.capabilities {
            *counts.entry(entry.name.as_str()).or_insert(0) += 1;
        }
        for entry in self.unique.clone() {
            let count = counts[entry.name.as_str()];
            if count > 1 {
                self.emit(Violation::new(
                    ViolationKind::Duplicate,
                    vec![entry.name.clone()],
                    format!("Capability '{}' is declared {} times", entry.name, count),
                ));
            }
        }
    }

    fn unknown_capabilities(&mut self) {
        let catalog = self.catalog;
        for entry in self.unique.clone() {
            match catalog.get(&entry.name) {
                Some(capability) => self.present.push((entry, capability)),
                None => self.emit(Violation::new(
                    ViolationKind::UnknownCapability,
                    vec![entry.name.clone()],
                    format!("Capability '{}' is not in the catalog", entry.name),
                )),
            }
        }
    }

    fn versions(&mut self) {
        // Every declaration counts, so a duplicate entry with a stricter
        // constraint is still checked. Identical constraints report once.
        let (manifest, catalog) = (self.manifest, self.catalog);
        let present = self.present.clone();
        let mut reported: HashSet<(&str, &str)> = HashSet::new();
        for entry in &manifest.capabilities {
            let Some(capability) = catalog.get(&entry.name) else {
                continue;
            };
            if entry.version.matches(&capability.version)
                || !reported.insert((entry.name.as_str(), entry.version.as_str()))
            {
                continue;
            }
            self.emit(Violation::new(
                ViolationKind::VersionMismatch,
                vec![entry.name.clone()],
                format!(
                    "Capability '{}' is at version {}, which does not satisfy '{}'",
                    entry.name, capability.version, entry.version
                ),
            ));
        }

        let versions: HashMap<&str, &semver::Version> = present
            .iter()
            .map(|&(_, c)| (c.id.as_str(), &c.version))
            .collect();
        for &(_, capability) in &present {
            for prerequisite in &capability.prerequisites {
                let Some(version) = versions.get(prerequisite.id.as_str()) else {
                    continue;
                };
                if !prerequisite.version.matches(version) {
                    self.emit(Violation::new(
                        ViolationKind::VersionMismatch,
                        vec![capability.id.clone(), prerequisite.id.clone()],
                        format!(
                            "Capability '{}' requires '{}' {}, but version {} is composed",
                            capability.id, prerequisite.id, prerequisite.version, version
                        ),
                    ));
                }
            }
        }
    }

    fn template_compatibility(&mut self) {
        let manifest = self.manifest;
        let base = manifest.base_template.as_str();
        for (_, capability) in self.present.clone() {
            if !capability.is_compatible_with(base) {
                self.emit(Violation::new(
                    ViolationKind::IncompatibleTemplate,
                    vec![capability.id.clone()],
                    format!(
                        "Capability '{}' composes only with [{}], not base template '{}'",
                        capability.id,
                        capability.composable_with.join(", "),
                        base
                    ),
                ));
            }
        }
    }

    fn prerequisites(&mut self) {
        // Unknown names count as declared; they are already reported.
        let unique = self.unique.clone();
        let declared: HashSet<&str> = unique.iter().map(|e| e.name.as_str()).collect();
        for (_, capability) in self.present.clone() {
            for missing in capability.prerequisite_ids().filter(|id| !declared.contains(id)) {
                self.emit(Violation::new(
                    ViolationKind::MissingPrerequisite,
                    vec![capability.id.clone(), missing.to_string()],
                    format!(
                        "Capability '{}' requires '{}', which is not in the manifest",
                        capability.id, missing
                    ),
                ));
            }
        }
    }

    /// Prerequisite edges between present capabilities, by position in `present`.
    fn prerequisite_graph(&self) -> Vec<Vec<usize>> {
        let positions: HashMap<&str, usize> = self
            .present
            .iter()
            .enumerate()
            .map(|(i, (_, c))| (c.id.as_str(), i))
            .collect();
        self.present
            .iter()
            .map(|(_, c)| {
                c.prerequisite_ids()
                    .filter_map(|id| positions.get(id).copied())
                    .collect()
            })
            .collect()
    }

    fn cycles(&mut self) {
        for cycle in prerequisite_cycles(&self.prerequisite_graph()) {
            let members: Vec<String> = cycle
                .iter()
                .map(|&i| self.present[i].1.id.clone())
                .collect();
            let message = format!(
                "Capabilities form a prerequisite cycle: {}",
                members.join(" -> ")
            );
            self.emit(Violation::new(
                ViolationKind::CircularPrerequisite,
                members,
                message,
            ));
        }
    }

    /// Collision check plus binding resolution. Returns every binding; they
    /// are only used when the composition is valid.
    fn behaviors(&mut self) -> Vec<BehaviorBinding> {
        let mut order: Vec<(&'a str, Vec<Binder<'a>>)> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        for &(_, capability) in &self.present {
            for behavior in &capability.behaviors {
                let binder = Binder {
                    capability: capability.id.as_str(),
                    behavior,
                };
                match index.get(behavior.name.as_str()) {
                    Some(&slot) => order[slot].1.push(binder),
                    None => {
                        index.insert(behavior.name.as_str(), order.len());
                        order.push((behavior.name.as_str(), vec![binder]));
                    }
                }
            }
        }

        let policy = self.manifest.conflict_resolution;
        let mut bindings = Vec::with_capacity(order.len());
        for (name, binders) in order {
            if let [only] = binders.as_slice() {
                bindings.push(sole_binding(*only));
                continue;
            }
            match resolve_collision(&binders, policy) {
                Some((binding, warnings)) => {
                    tracing::debug!(behavior = name, %policy, "Behavior collision resolved");
                    bindings.push(binding);
                    self.warnings.extend(warnings);
                }
                None => {
                    let ids: Vec<String> =
                        binders.iter().map(|b| b.capability.to_string()).collect();
                    let message = format!(
                        "Behavior '{}' is bound by {} under conflict_resolution '{}'",
                        name,
                        ids.join(", "),
                        ConflictResolution::Error
                    );
                    self.emit(
                        Violation::new(ViolationKind::BehaviorCollision, ids, message)
                            .with_behavior(name),
                    );
                }
            }
        }
        bindings
    }

    fn resolve(&self, mut bindings: Vec<BehaviorBinding>) -> ResolvedComposition {
        // A valid composition has no cycles, so an order always exists.
        let order = load_order(&self.prerequisite_graph())
            .unwrap_or_else(|| (0..self.present.len()).collect());
        let capabilities = order
            .into_iter()
            .map(|i| {
                let (entry, capability) = self.present[i];
                ResolvedCapability {
                    id: capability.id.clone(),
                    version: capability.version.clone(),
                    category: capability.category.clone(),
                    config: entry.config.clone(),
                }
            })
            .collect();
        bindings.sort_by(|a, b| a.behavior.cmp(&b.behavior));

        ResolvedComposition {
            base_template: self.manifest.base_template.clone(),
            capabilities,
            bindings,
        }
    }
}
