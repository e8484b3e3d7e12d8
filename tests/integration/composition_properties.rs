use capcomp::{validate, ConflictResolution, ViolationKind};
use proptest::prelude::*;

use crate::integration::support::{fleet_catalog, manifest};

const NAMES: [&str; 7] = [
    "org-kb",
    "domain-knowledge",
    "collaboration",
    "memory-management",
    "summarizer-a",
    "summarizer-b",
    "ghost",
];

const TEMPLATES: [&str; 3] = ["worker", "advisor", "supervisor"];

fn policy() -> impl Strategy<Value = ConflictResolution> {
    prop_oneof![
        Just(ConflictResolution::Error),
        Just(ConflictResolution::FirstWins),
        Just(ConflictResolution::LastWins),
        Just(ConflictResolution::Merge),
    ]
}

proptest! {
    #[test]
    fn empty_manifest_is_always_valid(template in prop::sample::select(TEMPLATES.to_vec())) {
        let result = validate(&manifest(template, &[]), &fleet_catalog()).unwrap();
        prop_assert!(result.valid);
    }

    #[test]
    fn validity_ignores_declaration_order(
        names in prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len()).prop_shuffle(),
        template in prop::sample::select(TEMPLATES.to_vec()),
        policy in policy(),
    ) {
        let catalog = fleet_catalog();
        let mut reversed = names.clone();
        reversed.reverse();

        let forward = validate(
            &manifest(template, &names).with_conflict_resolution(policy),
            &catalog,
        ).unwrap();
        let backward = validate(
            &manifest(template, &reversed).with_conflict_resolution(policy),
            &catalog,
        ).unwrap();
        prop_assert_eq!(forward.valid, backward.valid);
        prop_assert_eq!(forward.violations.len(), backward.violations.len());
    }

    #[test]
    fn repeated_name_reports_exactly_one_duplicate(
        index in 0..NAMES.len(),
        repeats in 2usize..5,
    ) {
        let name = NAMES[index];
        let names = vec![name; repeats];
        let result = validate(&manifest("supervisor", &names), &fleet_catalog()).unwrap();
        prop_assert!(!result.valid);
        let duplicates: Vec<_> = result.violations_of(ViolationKind::Duplicate).collect();
        prop_assert_eq!(duplicates.len(), 1);
        prop_assert_eq!(&duplicates[0].capabilities, &vec![name.to_string()]);
    }
}
