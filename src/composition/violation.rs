//! Structured conflict records produced by validation.

use serde::Serialize;
use std::fmt;

/// Kind of composition violation. Variants are declared in the order the
/// validator emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Duplicate,
    UnknownCapability,
    VersionMismatch,
    IncompatibleTemplate,
    MissingPrerequisite,
    CircularPrerequisite,
    BehaviorCollision,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Duplicate => "duplicate",
            ViolationKind::UnknownCapability => "unknown_capability",
            ViolationKind::VersionMismatch => "version_mismatch",
            ViolationKind::IncompatibleTemplate => "incompatible_template",
            ViolationKind::MissingPrerequisite => "missing_prerequisite",
            ViolationKind::CircularPrerequisite => "circular_prerequisite",
            ViolationKind::BehaviorCollision => "behavior_collision",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One composition violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Affected capabilities; for dependency violations the dependent comes first
    pub capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, capabilities: Vec<String>, message: String) -> Self {
        Self {
            kind,
            capabilities,
            behavior: None,
            message,
        }
    }

    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Kind of non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A behavior collision settled by the manifest's conflict policy
    ResolvedCollision,
    /// A merge left an attribute with disagreeing values unresolved
    Unmergeable,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::ResolvedCollision => "resolved_collision",
            WarningKind::Unmergeable => "unmergeable",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionWarning {
    pub kind: WarningKind,
    pub behavior: String,
    pub capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub message: String,
}

impl fmt::Display for CompositionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
