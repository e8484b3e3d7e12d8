use capcomp::composition::WarningKind;
use capcomp::version::VersionConstraint;
use capcomp::{validate, CapabilityEntry, ConflictResolution, TemplateManifest, ViolationKind};

use crate::integration::support::{fleet_catalog, manifest};

#[test]
fn empty_manifest_leaves_base_template_unchanged() {
    let result = validate(&manifest("worker", &[]), &fleet_catalog()).unwrap();
    assert!(result.valid);
    assert!(result.violations.is_empty());
    let resolved = result.resolved.unwrap();
    assert_eq!(resolved.base_template, "worker");
    assert!(resolved.capabilities.is_empty());
}

#[test]
fn repeated_capability_is_one_duplicate_violation() {
    let result = validate(
        &manifest("worker", &["memory-management", "memory-management"]),
        &fleet_catalog(),
    )
    .unwrap();
    assert!(!result.valid);
    assert_eq!(result.count_of(ViolationKind::Duplicate), 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].capabilities, vec!["memory-management"]);
}

#[test]
fn org_kb_on_worker_is_incompatible_template() {
    let result = validate(&manifest("worker", &["org-kb"]), &fleet_catalog()).unwrap();
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::IncompatibleTemplate);
    assert_eq!(result.violations[0].capabilities, vec!["org-kb"]);
}

#[test]
fn collaboration_without_domain_knowledge_is_missing_prerequisite() {
    let result = validate(&manifest("advisor", &["collaboration"]), &fleet_catalog()).unwrap();
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    let violation = &result.violations[0];
    assert_eq!(violation.kind, ViolationKind::MissingPrerequisite);
    assert_eq!(violation.capabilities, vec!["collaboration", "domain-knowledge"]);
}

#[test]
fn collaboration_with_prerequisite_resolves_in_load_order() {
    let result = validate(
        &manifest("advisor", &["collaboration", "domain-knowledge"]),
        &fleet_catalog(),
    )
    .unwrap();
    assert!(result.valid);
    assert_eq!(
        result.resolved.unwrap().load_order(),
        vec!["domain-knowledge", "collaboration"]
    );
}

#[test]
fn memory_management_below_required_version_is_mismatch() {
    let manifest = TemplateManifest::new("worker").with_capability(
        CapabilityEntry::new("memory-management")
            .with_version(VersionConstraint::parse(">=2.0.0").unwrap()),
    );
    let result = validate(&manifest, &fleet_catalog()).unwrap();
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::VersionMismatch);
}

#[test]
fn collision_is_violation_under_error_policy() {
    let result = validate(
        &manifest("worker", &["summarizer-a", "summarizer-b"]),
        &fleet_catalog(),
    )
    .unwrap();
    assert!(!result.valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::BehaviorCollision);
    assert_eq!(result.violations[0].behavior.as_deref(), Some("summarize"));
}

#[test]
fn first_wins_binds_earlier_declaration() {
    let catalog = fleet_catalog();
    let forward = manifest("worker", &["summarizer-a", "summarizer-b"])
        .with_conflict_resolution(ConflictResolution::FirstWins);
    let result = validate(&forward, &catalog).unwrap();
    assert!(result.valid);
    assert_eq!(result.warnings[0].kind, WarningKind::ResolvedCollision);
    assert_eq!(
        result.binding("summarize").unwrap().providers,
        vec!["summarizer-a"]
    );

    let backward = manifest("worker", &["summarizer-b", "summarizer-a"])
        .with_conflict_resolution(ConflictResolution::FirstWins);
    let result = validate(&backward, &catalog).unwrap();
    assert!(result.valid);
    assert_eq!(
        result.binding("summarize").unwrap().providers,
        vec!["summarizer-b"]
    );
}

#[test]
fn last_wins_binds_later_declaration() {
    let manifest = manifest("worker", &["summarizer-a", "summarizer-b"])
        .with_conflict_resolution(ConflictResolution::LastWins);
    let result = validate(&manifest, &fleet_catalog()).unwrap();
    assert_eq!(
        result.binding("summarize").unwrap().providers,
        vec!["summarizer-b"]
    );
}

#[test]
fn merge_flags_disagreeing_attribute() {
    let manifest = manifest("worker", &["summarizer-b", "summarizer-a"])
        .with_conflict_resolution(ConflictResolution::Merge);
    let result = validate(&manifest, &fleet_catalog()).unwrap();
    assert!(result.valid);
    let binding = result.binding("summarize").unwrap();
    assert_eq!(binding.providers, vec!["summarizer-a", "summarizer-b"]);
    assert_eq!(binding.unresolved, vec!["style"]);
    let unmergeable: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::Unmergeable)
        .collect();
    assert_eq!(unmergeable.len(), 1);
    assert_eq!(unmergeable[0].attribute.as_deref(), Some("style"));
}

#[test]
fn all_violations_reported_in_one_pass() {
    let result = validate(
        &manifest(
            "worker",
            &["org-kb", "collaboration", "ghost", "summarizer-a", "summarizer-b"],
        ),
        &fleet_catalog(),
    )
    .unwrap();
    let kinds: Vec<ViolationKind> = result.violations.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::UnknownCapability,
            ViolationKind::IncompatibleTemplate,
            ViolationKind::MissingPrerequisite,
            ViolationKind::BehaviorCollision,
        ]
    );
    assert!(result.resolved.is_none());
}

#[test]
fn missing_base_template_is_malformed_not_violation() {
    let err = TemplateManifest::from_yaml_str(
        "broken.yaml",
        "composition:\n  capabilities:\n    - name: org-kb\n",
    )
    .unwrap_err();
    assert!(err.is_input_contract());
    assert!(err.to_string().starts_with("malformed_manifest"), "{err}");

    let err = validate(&TemplateManifest::new(""), &fleet_catalog()).unwrap_err();
    assert!(err.is_input_contract());
}
