use capcomp::tooling::cli::{CatalogCommands, Commands};
use serde_json::Value;

use crate::cli::support::Fixture;

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("command output should be JSON")
}

#[test]
fn validate_json_contract_has_required_fields() {
    let fixture = Fixture::new();
    let path = fixture.manifest("worker.yaml", "worker", &["org-kb"]);
    let cli = fixture.context();

    let output = cli
        .execute(&Commands::Validate {
            paths: vec![path],
            format: Some("json".to_string()),
            verbose: false,
        })
        .unwrap();

    let parsed = parse(&output.text);
    assert_eq!(
        parsed["catalog_fingerprint"].as_str(),
        Some(cli.catalog().fingerprint().as_str())
    );
    let generated = parsed["generated_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(generated).is_ok());
    assert_eq!(parsed["summary"]["total"], 1);

    let result = &parsed["results"][0];
    assert_eq!(result["valid"], false);
    assert!(result["source"].as_str().unwrap().ends_with("worker.yaml"));
    let violations = result["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["kind"], "incompatible_template");
    assert_eq!(violations[0]["capabilities"][0], "org-kb");
    assert!(violations[0]["message"].as_str().is_some());
    assert!(result.get("resolved").is_none());
}

#[test]
fn validate_text_prints_valid() {
    let fixture = Fixture::new();
    let path = fixture.manifest("empty.yaml", "worker", &[]);
    let output = fixture
        .context()
        .execute(&Commands::Validate {
            paths: vec![path],
            format: None,
            verbose: false,
        })
        .unwrap();
    assert!(output.text.trim_end().ends_with(": valid"), "{}", output.text);
}

#[test]
fn validate_text_lists_violations() {
    let fixture = Fixture::new();
    let path = fixture.manifest("advisor.yaml", "advisor", &["collaboration"]);
    let output = fixture
        .context()
        .execute(&Commands::Validate {
            paths: vec![path],
            format: Some("text".to_string()),
            verbose: true,
        })
        .unwrap();
    assert!(output.text.contains("invalid (1 violation(s))"), "{}", output.text);
    assert!(output.text.contains("[missing_prerequisite]"));
}

#[test]
fn relative_manifest_paths_resolve_against_workspace() {
    let fixture = Fixture::new();
    fixture.manifest("ok.yaml", "worker", &["memory-management"]);
    let output = fixture
        .context()
        .execute(&Commands::Validate {
            paths: vec!["manifests/ok.yaml".into()],
            format: None,
            verbose: false,
        })
        .unwrap();
    assert_eq!(output.exit_code, 0);
}

#[test]
fn resolve_json_contract_has_load_order_and_bindings() {
    let fixture = Fixture::new();
    let path = fixture.manifest(
        "advisor.yaml",
        "advisor",
        &["collaboration", "memory-management", "domain-knowledge"],
    );
    let output = fixture
        .context()
        .execute(&Commands::Resolve {
            manifest: path,
            format: Some("json".to_string()),
        })
        .unwrap();

    let parsed = parse(&output.text);
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["base_template"], "advisor");
    let ids: Vec<&str> = parsed["resolved"]["capabilities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["memory-management", "domain-knowledge", "collaboration"]);

    let bindings = parsed["resolved"]["bindings"].as_array().unwrap();
    let behaviors: Vec<&str> = bindings
        .iter()
        .map(|b| b["behavior"].as_str().unwrap())
        .collect();
    assert_eq!(behaviors, vec!["handoff", "recall"]);
    assert_eq!(bindings[1]["attributes"]["depth"], 3);
}

#[test]
fn resolve_text_shows_load_order() {
    let fixture = Fixture::new();
    let path = fixture.manifest(
        "advisor.yaml",
        "advisor",
        &["collaboration", "domain-knowledge"],
    );
    let output = fixture
        .context()
        .execute(&Commands::Resolve {
            manifest: path,
            format: None,
        })
        .unwrap();
    assert!(output.text.contains("1. domain-knowledge 1.0.0"), "{}", output.text);
    assert!(output.text.contains("2. collaboration 1.0.0"));
}

#[test]
fn catalog_list_json_contract() {
    let fixture = Fixture::new();
    let output = fixture
        .context()
        .execute(&Commands::Catalog {
            command: CatalogCommands::List {
                category: Some("knowledge".to_string()),
                format: Some("json".to_string()),
            },
        })
        .unwrap();
    let parsed = parse(&output.text);
    assert_eq!(parsed["total"], 2);
    let capabilities = parsed["capabilities"].as_array().unwrap();
    assert_eq!(capabilities[0]["id"], "domain-knowledge");
    assert_eq!(capabilities[1]["composable_with"][0], "supervisor");
}

#[test]
fn catalog_show_json_includes_source() {
    let fixture = Fixture::new();
    let output = fixture
        .context()
        .execute(&Commands::Catalog {
            command: CatalogCommands::Show {
                id: "collaboration".to_string(),
                format: Some("json".to_string()),
            },
        })
        .unwrap();
    let parsed = parse(&output.text);
    assert_eq!(parsed["version"], "1.0.0");
    assert_eq!(parsed["prerequisites"][0]["id"], "domain-knowledge");
    assert!(parsed["source"]
        .as_str()
        .unwrap()
        .ends_with("collaboration.yaml"));
}

#[test]
fn catalog_lint_json_contract() {
    let fixture = Fixture::new();
    let output = fixture
        .context()
        .execute(&Commands::Catalog {
            command: CatalogCommands::Lint {
                format: Some("json".to_string()),
                verbose: false,
            },
        })
        .unwrap();
    let parsed = parse(&output.text);
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["reports"].as_array().unwrap().len(), 4);
    assert!(parsed["catalog_fingerprint"].as_str().is_some());
}
