//! Manifest file model. Every field is optional so missing fields can be
//! reported by path instead of as parser errors.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestDocument {
    pub metadata: Option<MetadataDocument>,
    pub composition: Option<CompositionDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataDocument {
    pub name: Option<String>,
    pub version: Option<serde_json::Value>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompositionDocument {
    pub base_template: Option<String>,
    pub capabilities: Option<Vec<EntryDocument>>,
    pub composition_rules: Option<RulesDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDocument {
    pub name: Option<String>,
    pub version: Option<serde_json::Value>,
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesDocument {
    pub conflict_resolution: Option<String>,
}
