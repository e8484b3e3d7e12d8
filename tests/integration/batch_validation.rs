use capcomp::composition::{validate_paths, BatchSummary};
use capcomp::manifest::discover_manifests;
use capcomp::validate_batch;
use tempfile::TempDir;

use crate::integration::support::{fleet_catalog, manifest, write_file};

#[test]
fn fleet_results_follow_input_order() {
    let manifests = vec![
        manifest("supervisor", &["org-kb"]),
        manifest("worker", &["org-kb"]),
        manifest("advisor", &["collaboration", "domain-knowledge"]),
        manifest("advisor", &["collaboration"]),
    ];
    let entries = validate_batch(&manifests, &fleet_catalog());
    let verdicts: Vec<bool> = entries.iter().map(|e| e.is_valid()).collect();
    assert_eq!(verdicts, vec![true, false, true, false]);

    let summary = BatchSummary::from_entries(&entries);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.invalid, 2);
}

#[test]
fn fleet_directory_with_one_broken_manifest() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "fleet/a-worker.yaml",
        "composition:\n  base_template: worker\n  capabilities:\n    - name: memory-management\n",
    );
    write_file(
        temp.path(),
        "fleet/b-broken.yaml",
        "metadata:\n  name: no-composition\n",
    );
    write_file(
        temp.path(),
        "fleet/c-advisor.json",
        r#"{"composition": {"base_template": "advisor", "capabilities": [{"name": "collaboration"}]}}"#,
    );

    let paths = discover_manifests(&[temp.path().join("fleet")]).unwrap();
    assert_eq!(paths.len(), 3);
    let entries = validate_paths(&paths, &fleet_catalog());
    assert!(entries[0].is_valid());
    assert!(entries[1].outcome.as_ref().unwrap_err().is_input_contract());
    assert!(!entries[2].is_valid());
    assert!(entries[2].outcome.is_ok());

    let summary = BatchSummary::from_entries(&entries);
    assert_eq!((summary.valid, summary.invalid, summary.malformed), (1, 1, 1));
    assert_eq!(summary.exit_code(), 3);
}
