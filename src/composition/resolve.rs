//! Behavior binding resolution under a conflict policy.
//!
//! `merge` keeps every binder and unions attributes. An attribute that two
//! binders set to different values has no defined merge; it is dropped from
//! the binding, listed as unresolved, and reported as `unmergeable`. The
//! result does not depend on declaration order.

use super::violation::{CompositionWarning, WarningKind};
use crate::capability::Behavior;
use crate::manifest::ConflictResolution;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Final binding of one behavior name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorBinding {
    pub behavior: String,
    /// Capabilities providing the behavior; several only under `merge`
    pub providers: Vec<String>,
    pub attributes: BTreeMap<String, serde_json::Value>,
    /// Attribute keys a merge could not settle
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

/// A capability binding a behavior. Slices of binders are in manifest
/// declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'a> {
    pub capability: &'a str,
    pub behavior: &'a Behavior,
}

/// Binding for a behavior with exactly one binder.
pub fn sole_binding(binder: Binder<'_>) -> BehaviorBinding {
    BehaviorBinding {
        behavior: binder.behavior.name.clone(),
        providers: vec![binder.capability.to_string()],
        attributes: binder.behavior.attributes.clone(),
        unresolved: Vec::new(),
    }
}

/// Settle a collision (two or more binders) under a non-`error` policy.
///
/// Returns None under `error`: there the collision stays a violation.
pub fn resolve_collision(
    binders: &[Binder<'_>],
    policy: ConflictResolution,
) -> Option<(BehaviorBinding, Vec<CompositionWarning>)> {
    let (first, last) = (binders.first()?, binders.last()?);
    let behavior = first.behavior.name.clone();
    let declared: Vec<String> = binders.iter().map(|b| b.capability.to_string()).collect();

    let collision = |summary: String| CompositionWarning {
        kind: WarningKind::ResolvedCollision,
        behavior: behavior.clone(),
        capabilities: declared.clone(),
        attribute: None,
        message: format!(
            "Behavior '{}' is bound by {}; {}",
            behavior,
            declared.join(", "),
            summary
        ),
    };

    match policy {
        ConflictResolution::Error => None,
        ConflictResolution::FirstWins => Some((
            sole_binding(*first),
            vec![collision(format!("first-wins selected '{}'", first.capability))],
        )),
        ConflictResolution::LastWins => Some((
            sole_binding(*last),
            vec![collision(format!("last-wins selected '{}'", last.capability))],
        )),
        ConflictResolution::Merge => {
            let mut warnings = vec![collision("merge retained every binding".to_string())];
            let (binding, conflicts) = merge(&behavior, binders);
            for (attribute, owners) in conflicts {
                warnings.push(CompositionWarning {
                    kind: WarningKind::Unmergeable,
                    behavior: behavior.clone(),
                    message: format!(
                        "Attribute '{}' of behavior '{}' has conflicting values in {}; left unresolved",
                        attribute,
                        behavior,
                        owners.join(", ")
                    ),
                    capabilities: owners,
                    attribute: Some(attribute),
                });
            }
            Some((binding, warnings))
        }
    }
}

/// Union of all binders' attributes. Returns the binding and, per conflicting
/// key, the capabilities (sorted) that set it.
fn merge(
    behavior: &str,
    binders: &[Binder<'_>],
) -> (BehaviorBinding, BTreeMap<String, Vec<String>>) {
    let mut sorted: Vec<Binder<'_>> = binders.to_vec();
    sorted.sort_by(|a, b| a.capability.cmp(b.capability));

    let mut attributes: BTreeMap<String, serde_json::Value> = BTreeMap::new();
    let mut conflicting: BTreeSet<String> = BTreeSet::new();
    for binder in &sorted {
        for (key, value) in &binder.behavior.attributes {
            match attributes.get(key) {
                None => {
                    attributes.insert(key.clone(), value.clone());
                }
                Some(existing) if existing != value => {
                    conflicting.insert(key.clone());
                }
                Some(_) => {}
            }
        }
    }

    let mut conflicts = BTreeMap::new();
    for key in &conflicting {
        attributes.remove(key);
        let owners = sorted
            .iter()
            .filter(|b| b.behavior.attributes.contains_key(key))
            .map(|b| b.capability.to_string())
            .collect();
        conflicts.insert(key.clone(), owners);
    }

    let binding = BehaviorBinding {
        behavior: behavior.to_string(),
        providers: sorted.iter().map(|b| b.capability.to_string()).collect(),
        attributes,
        unresolved: conflicting.into_iter().collect(),
    };
    (binding, conflicts)
}
