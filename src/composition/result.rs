//! Validation output.

use super::resolve::BehaviorBinding;
use super::violation::{CompositionWarning, Violation, ViolationKind};
use semver::Version;
use serde::Serialize;

/// Outcome of validating one manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub warnings: Vec<CompositionWarning>,
    /// Present only when `valid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedComposition>,
}

impl CompositionResult {
    /// Violations of one kind, in emission order
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.violations_of(kind).count()
    }

    /// Resolved binding for a behavior, if the composition is valid and binds it
    pub fn binding(&self, behavior: &str) -> Option<&BehaviorBinding> {
        self.resolved
            .as_ref()?
            .bindings
            .iter()
            .find(|b| b.behavior == behavior)
    }
}

/// A valid composition ready to load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedComposition {
    pub base_template: String,
    /// Load order: prerequisites first, then declaration order
    pub capabilities: Vec<ResolvedCapability>,
    /// Sorted by behavior name
    pub bindings: Vec<BehaviorBinding>,
}

impl ResolvedComposition {
    pub fn load_order(&self) -> Vec<&str> {
        self.capabilities.iter().map(|c| c.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCapability {
    pub id: String,
    pub version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}
