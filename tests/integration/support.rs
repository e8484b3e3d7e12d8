use capcomp::capability::Behavior;
use capcomp::version::VersionConstraint;
use capcomp::{Capability, CapabilityCatalog, CapabilityEntry, TemplateManifest};
use semver::Version;
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn cap(id: &str, major: u64, minor: u64, patch: u64) -> Capability {
    Capability::new(id, Version::new(major, minor, patch))
}

/// Catalog used across scenarios.
pub fn fleet_catalog() -> CapabilityCatalog {
    CapabilityCatalog::from_capabilities(vec![
        cap("org-kb", 1, 0, 0)
            .with_category("knowledge")
            .composable_with("supervisor"),
        cap("domain-knowledge", 1, 0, 0).with_category("knowledge"),
        cap("collaboration", 1, 0, 0)
            .with_category("coordination")
            .with_prerequisite("domain-knowledge", VersionConstraint::any())
            .with_behavior(Behavior::named("handoff")),
        cap("memory-management", 1, 2, 0)
            .with_category("memory")
            .with_behavior(Behavior::named("recall").with_attribute("depth", json!(3))),
        cap("summarizer-a", 1, 0, 0)
            .with_behavior(Behavior::named("summarize").with_attribute("style", json!("terse"))),
        cap("summarizer-b", 1, 0, 0)
            .with_behavior(Behavior::named("summarize").with_attribute("style", json!("long"))),
    ])
}

pub fn manifest(base: &str, names: &[&str]) -> TemplateManifest {
    names.iter().fold(TemplateManifest::new(base), |m, name| {
        m.with_capability(CapabilityEntry::new(*name))
    })
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
