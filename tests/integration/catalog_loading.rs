use capcomp::capability::{lint_catalog, DirectoryCatalogRepository};
use capcomp::{validate, CapabilityCatalog, TemplateManifest, ViolationKind};
use tempfile::TempDir;

use crate::integration::support::write_file;

fn populated_catalog_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "knowledge/org-kb.yaml",
        "id: org-kb\nversion: 1.0.0\ncategory: knowledge\ncomposable_with: [supervisor]\n",
    );
    write_file(
        temp.path(),
        "knowledge/domain-knowledge.json",
        r#"{"id": "domain-knowledge", "version": "1.0.0", "category": "knowledge"}"#,
    );
    write_file(
        temp.path(),
        "coordination/collaboration.toml",
        "id = \"collaboration\"\nversion = \"1.0.0\"\ncategory = \"coordination\"\nprerequisites = [\"domain-knowledge\"]\nbehaviors = [\"handoff\"]\n",
    );
    write_file(temp.path(), "README.md", "not a capability");
    temp
}

#[test]
fn loads_every_supported_format_recursively() {
    let temp = populated_catalog_dir();
    let catalog = CapabilityCatalog::load_from_dir(temp.path(), true).unwrap();
    assert_eq!(catalog.len(), 3);
    let collaboration = catalog.get("collaboration").unwrap();
    assert_eq!(collaboration.prerequisites[0].id, "domain-knowledge");
    assert!(collaboration.behavior("handoff").is_some());
}

#[test]
fn loaded_catalog_drives_validation() {
    let temp = populated_catalog_dir();
    let catalog = CapabilityCatalog::load_from_dir(temp.path(), true).unwrap();
    let manifest = TemplateManifest::from_yaml_str(
        "advisor.yaml",
        "composition:\n  base_template: advisor\n  capabilities:\n    - name: collaboration\n",
    )
    .unwrap();
    let result = validate(&manifest, &catalog).unwrap();
    assert_eq!(result.count_of(ViolationKind::MissingPrerequisite), 1);
}

#[test]
fn strict_catalog_rejects_schema_violation() {
    let temp = populated_catalog_dir();
    write_file(temp.path(), "broken.yaml", "id: Not_Kebab\nversion: 1.0.0\n");
    let err = CapabilityCatalog::load_from_dir(temp.path(), true).unwrap_err();
    assert!(err.is_input_contract());
    assert!(err.to_string().contains("broken.yaml"), "{err}");
}

#[test]
fn lenient_catalog_skips_bad_files() {
    let temp = populated_catalog_dir();
    write_file(temp.path(), "broken.yaml", "version: 1.0.0\n");
    let repository = DirectoryCatalogRepository::new(temp.path()).with_strict(false);
    let catalog = CapabilityCatalog::load_from_repository(&repository).unwrap();
    assert_eq!(catalog.len(), 3);
}

#[test]
fn self_prerequisite_is_rejected_at_load() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "loop.yaml",
        "id: loop\nversion: 1.0.0\nprerequisites: [loop]\n",
    );
    assert!(CapabilityCatalog::load_from_dir(temp.path(), true).is_err());
}

#[test]
fn lint_reports_dangling_prerequisite() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "collaboration.yaml",
        "id: collaboration\nversion: 1.0.0\ncategory: coordination\nprerequisites: [domain-knowledge]\n",
    );
    let catalog = CapabilityCatalog::load_from_dir(temp.path(), true).unwrap();
    let reports = lint_catalog(&catalog);
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].is_valid());
    assert!(reports[0].warnings.is_empty());
}

#[test]
fn fingerprint_ignores_file_layout() {
    let nested = populated_catalog_dir();
    let flat = TempDir::new().unwrap();
    for entry in walkdir::WalkDir::new(nested.path()) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            std::fs::copy(entry.path(), flat.path().join(entry.file_name())).unwrap();
        }
    }
    let a = CapabilityCatalog::load_from_dir(nested.path(), true).unwrap();
    let b = CapabilityCatalog::load_from_dir(flat.path(), true).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}
