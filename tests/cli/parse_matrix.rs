use capcomp::tooling::cli::Cli;
use clap::{CommandFactory, Parser};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["capcomp", "validate", "m.yaml"],
        vec!["capcomp", "validate", "a.yaml", "fleet/", "--format", "json"],
        vec!["capcomp", "validate", "m.yaml", "--verbose"],
        vec!["capcomp", "--catalog", "caps", "validate", "m.yaml"],
        vec!["capcomp", "resolve", "m.yaml"],
        vec!["capcomp", "resolve", "m.yaml", "--format", "json"],
        vec!["capcomp", "catalog", "list"],
        vec!["capcomp", "catalog", "list", "--category", "knowledge"],
        vec!["capcomp", "catalog", "show", "org-kb"],
        vec!["capcomp", "catalog", "lint", "--verbose", "--format", "text"],
        vec![
            "capcomp",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-output",
            "stderr",
            "catalog",
            "list",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_invocations() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["capcomp"],
        vec!["capcomp", "validate"],
        vec!["capcomp", "resolve"],
        vec!["capcomp", "catalog", "show"],
        vec!["capcomp", "validate", "m.yaml", "--format", "yaml"],
        vec!["capcomp", "compose", "m.yaml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_err(), "expected parse failure for args: {args:?}");
    }
}

#[test]
fn usage_errors_exit_with_clap_code() {
    let err = Cli::try_parse_from(["capcomp", "validate"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn command_tree_is_consistent() {
    Cli::command().debug_assert();
}
