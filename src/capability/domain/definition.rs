//! Capability definitions: the on-disk file model and the validated type.

use crate::types::{BehaviorName, CapabilityId};
use crate::version::VersionConstraint;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Capability file as written by authors. Every field is optional here so
/// that missing fields surface as schema errors naming the field rather than
/// as opaque parser errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilityFile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<serde_json::Value>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteSpec>,
    #[serde(default)]
    pub composable_with: Vec<String>,
    #[serde(default)]
    pub behaviors: Vec<BehaviorSpec>,
}

/// `- domain-knowledge` or `- { id: domain-knowledge, version: ">=1.0" }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrerequisiteSpec {
    Id(String),
    Detailed {
        id: String,
        #[serde(default)]
        version: Option<serde_json::Value>,
    },
}

/// `- summarize` or `- { name: summarize, attributes: { max_tokens: 512 } }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BehaviorSpec {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        attributes: BTreeMap<String, serde_json::Value>,
    },
}

/// A validated capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capability {
    pub id: CapabilityId,
    pub name: String,
    pub version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub prerequisites: Vec<Prerequisite>,
    /// Base templates this capability may extend; empty means any.
    pub composable_with: Vec<String>,
    pub behaviors: Vec<Behavior>,
}

/// Another capability that must be present in the same composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prerequisite {
    pub id: CapabilityId,
    pub version: VersionConstraint,
}

/// A named behavior bound by a capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Behavior {
    pub name: BehaviorName,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Behavior {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Capability {
    /// Minimal capability with no prerequisites, template limits or behaviors.
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            version,
            category: None,
            description: None,
            prerequisites: Vec::new(),
            composable_with: Vec::new(),
            behaviors: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>, version: VersionConstraint) -> Self {
        self.prerequisites.push(Prerequisite {
            id: id.into(),
            version,
        });
        self
    }

    pub fn composable_with(mut self, template: impl Into<String>) -> Self {
        self.composable_with.push(template.into());
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// True when this capability may extend the given base template.
    pub fn is_compatible_with(&self, base_template: &str) -> bool {
        self.composable_with.is_empty() || self.composable_with.iter().any(|t| t == base_template)
    }

    pub fn prerequisite_ids(&self) -> impl Iterator<Item = &str> {
        self.prerequisites.iter().map(|p| p.id.as_str())
    }

    pub fn behavior(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| b.name == name)
    }
}
