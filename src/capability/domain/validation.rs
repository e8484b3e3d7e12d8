//! Capability schema validation owned by the capability domain.
//!
//! Runs once when a definition is loaded. Everything downstream works with
//! the typed [`Capability`] and never re-checks these rules.

use super::definition::{
    Behavior, BehaviorSpec, Capability, CapabilityFile, Prerequisite, PrerequisiteSpec,
};
use crate::version::{scalar_text, VersionConstraint};
use semver::Version;
use std::collections::HashSet;

/// `memory-management`, `org-kb`, `v2-tools`
pub fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && id.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Validate a capability file and convert it into a [`Capability`].
pub fn validate_capability_file(file: CapabilityFile) -> Result<Capability, String> {
    let id = match file.id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => return Err("missing required field 'id'".to_string()),
    };
    if !is_kebab_case(&id) {
        return Err(format!("id '{}' is not kebab-case", id));
    }

    let version_text = file
        .version
        .as_ref()
        .ok_or_else(|| format!("capability '{}' is missing required field 'version'", id))?;
    let version_text = scalar_text(version_text)
        .ok_or_else(|| {
            format!(
                "capability '{}' has invalid version: expected a string such as \"1.2.0\"",
                id
            )
        })?;
    let version = Version::parse(version_text.trim()).map_err(|e| {
        format!(
            "capability '{}' has invalid version '{}': {}",
            id, version_text, e
        )
    })?;

    let mut prerequisites = Vec::with_capacity(file.prerequisites.len());
    let mut seen_prerequisites = HashSet::new();
    for spec in file.prerequisites {
        let (prereq_id, constraint) = match spec {
            PrerequisiteSpec::Id(prereq_id) => (prereq_id, VersionConstraint::any()),
            PrerequisiteSpec::Detailed {
                id: prereq_id,
                version,
            } => {
                let constraint = match version.as_ref() {
                    None => VersionConstraint::any(),
                    Some(value) => {
                        let text = scalar_text(value).ok_or_else(|| {
                            format!(
                                "capability '{}': prerequisite '{}' version must be a constraint string; quote decimal values such as \"1.10\"",
                                id, prereq_id
                            )
                        })?;
                        VersionConstraint::parse(&text).map_err(|e| {
                            format!(
                                "capability '{}': prerequisite '{}' has invalid version constraint '{}': {}",
                                id, prereq_id, text, e
                            )
                        })?
                    }
                };
                (prereq_id, constraint)
            }
        };
        let prereq_id = prereq_id.trim().to_string();
        if prereq_id.is_empty() {
            return Err(format!("capability '{}' lists an empty prerequisite", id));
        }
        if prereq_id == id {
            return Err(format!("capability '{}' lists itself as a prerequisite", id));
        }
        if !seen_prerequisites.insert(prereq_id.clone()) {
            return Err(format!(
                "capability '{}' lists prerequisite '{}' more than once",
                id, prereq_id
            ));
        }
        prerequisites.push(Prerequisite {
            id: prereq_id,
            version: constraint,
        });
    }

    let mut composable_with = Vec::with_capacity(file.composable_with.len());
    for template in file.composable_with {
        let template = template.trim().to_string();
        if template.is_empty() {
            return Err(format!(
                "capability '{}' has an empty composable_with entry",
                id
            ));
        }
        if !composable_with.contains(&template) {
            composable_with.push(template);
        }
    }

    let mut behaviors = Vec::with_capacity(file.behaviors.len());
    let mut seen_behaviors = HashSet::new();
    for spec in file.behaviors {
        let behavior = match spec {
            BehaviorSpec::Name(name) => Behavior::named(name.trim()),
            BehaviorSpec::Detailed { name, attributes } => Behavior {
                name: name.trim().to_string(),
                attributes,
            },
        };
        if behavior.name.is_empty() {
            return Err(format!("capability '{}' declares an unnamed behavior", id));
        }
        if !seen_behaviors.insert(behavior.name.clone()) {
            return Err(format!(
                "capability '{}' declares behavior '{}' more than once",
                id, behavior.name
            ));
        }
        behaviors.push(behavior);
    }

    let name = file
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| id.clone());

    Ok(Capability {
        id,
        name,
        version,
        category: file.category.filter(|c| !c.trim().is_empty()),
        description: file.description,
        prerequisites,
        composable_with,
        behaviors,
    })
}
