//! Version constraints declared by manifests and prerequisites.
//!
//! A constraint is either "any version" (absent, `*` or `latest`) or a semver
//! requirement such as `>=2.0.0`, `^1.2`, `~1.4` or `>=1, <2`. A bare version
//! (`1.2.0`) means caret compatibility, following `semver::VersionReq`.

use semver::{Version, VersionReq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    raw: String,
    req: Option<VersionReq>,
}

impl VersionConstraint {
    /// Constraint satisfied by every version.
    pub fn any() -> Self {
        Self {
            raw: "*".to_string(),
            req: None,
        }
    }

    pub fn parse(text: &str) -> Result<Self, semver::Error> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::any());
        }
        let req = VersionReq::parse(trimmed)?;
        Ok(Self {
            raw: trimmed.to_string(),
            req: Some(req),
        })
    }

    pub fn is_any(&self) -> bool {
        self.req.is_none()
    }

    pub fn matches(&self, version: &Version) -> bool {
        match &self.req {
            Some(req) => req.matches(version),
            None => true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for VersionConstraint {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for VersionConstraint {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for VersionConstraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Render a YAML/JSON scalar as version text. Strings and integers only: an
/// unquoted `1.10` arrives as the float 1.1, so floats are refused rather
/// than read as a different version.
pub(crate) fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}
