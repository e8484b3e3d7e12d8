//! Text and JSON rendering for CLI command results.

use crate::capability::{CatalogLintResult, CatalogListResult, CatalogShowResult};
use crate::composition::{
    BatchEntry, CompositionResult, ResolveCommandResult, ResolvedComposition,
    ValidateCommandResult,
};
use crate::error::ApiError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

fn good(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.green())
    } else {
        text.to_string()
    }
}

fn bad(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.red())
    } else {
        text.to_string()
    }
}

fn caution(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.yellow())
    } else {
        text.to_string()
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::MalformedManifest { .. } => "malformed_manifest",
        ApiError::MalformedCatalog { .. } => "malformed_catalog",
        ApiError::CapabilityNotFound(_) => "capability_not_found",
        ApiError::NoManifests(_) => "no_manifests",
        ApiError::ConfigError(_) => "config",
        ApiError::Io { .. } => "io",
    }
}

fn result_json(result: &CompositionResult) -> Value {
    serde_json::to_value(result).unwrap_or(Value::Null)
}

fn entry_json(entry: &BatchEntry) -> Value {
    match &entry.outcome {
        Ok(result) => {
            let mut value = result_json(result);
            value["source"] = json!(entry.source);
            value
        }
        Err(err) => json!({
            "source": entry.source,
            "valid": false,
            "error": { "kind": error_kind(err), "message": err.to_string() },
        }),
    }
}

/// Format validate result as JSON
pub fn validate_json(result: &ValidateCommandResult) -> String {
    let results: Vec<Value> = result.entries.iter().map(entry_json).collect();
    pretty(&json!({
        "catalog_fingerprint": result.fingerprint,
        "generated_at": generated_at(),
        "summary": result.summary,
        "results": results,
    }))
}

/// Format validate result as text
pub fn validate_text(result: &ValidateCommandResult, verbose: bool, color: bool) -> String {
    let mut output = String::new();
    for entry in &result.entries {
        match &entry.outcome {
            Ok(outcome) if outcome.valid => {
                output.push_str(&format!("{}: {}\n", entry.source, good("valid", color)));
            }
            Ok(outcome) => {
                output.push_str(&format!(
                    "{}: {} ({} violation(s))\n",
                    entry.source,
                    bad("invalid", color),
                    outcome.violations.len()
                ));
                for violation in &outcome.violations {
                    output.push_str(&format!("  {}\n", violation));
                }
            }
            Err(err) => {
                output.push_str(&format!(
                    "{}: {} {}\n",
                    entry.source,
                    bad("error", color),
                    err
                ));
            }
        }
        if verbose {
            if let Ok(outcome) = &entry.outcome {
                for warning in &outcome.warnings {
                    output.push_str(&format!("  {} {}\n", caution("warning", color), warning));
                }
                if let Some(resolved) = &outcome.resolved {
                    output.push_str(&format!(
                        "  Load order: {}\n  Bindings: {}\n",
                        display_order(resolved),
                        resolved.bindings.len()
                    ));
                }
            }
        }
    }

    if result.entries.len() > 1 {
        let summary = &result.summary;
        output.push_str(&format!(
            "\nSummary: {} valid, {} invalid, {} malformed, {} failed (out of {} total)\n",
            summary.valid,
            summary.invalid,
            summary.malformed,
            summary.failed,
            summary.total
        ));
    }
    output
}

fn display_order(resolved: &ResolvedComposition) -> String {
    if resolved.capabilities.is_empty() {
        "(base template only)".to_string()
    } else {
        resolved.load_order().join(", ")
    }
}

/// Format resolve result as JSON
pub fn resolve_json(result: &ResolveCommandResult) -> String {
    let mut value = result_json(&result.result);
    value["source"] = json!(result.source);
    value["base_template"] = json!(result.base_template);
    value["catalog_fingerprint"] = json!(result.fingerprint);
    value["generated_at"] = json!(generated_at());
    pretty(&value)
}

/// Format resolve result as text
pub fn resolve_text(result: &ResolveCommandResult, color: bool) -> String {
    let mut output = format!("{}\n\n", heading("Composition", color));
    output.push_str(&format!("  Manifest: {}\n", result.source));
    output.push_str(&format!("  Base template: {}\n", result.base_template));

    let Some(resolved) = &result.result.resolved else {
        output.push_str(&format!("  Status: {}\n\n", bad("invalid", color)));
        for violation in &result.result.violations {
            output.push_str(&format!("  {}\n", violation));
        }
        return output;
    };
    output.push_str(&format!("  Status: {}\n\n", good("valid", color)));

    output.push_str(&format!("{}\n\n", heading("Load order", color)));
    if resolved.capabilities.is_empty() {
        output.push_str("  (base template only)\n");
    }
    for (position, capability) in resolved.capabilities.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} {}\n",
            position + 1,
            capability.id,
            capability.version
        ));
    }

    if !resolved.bindings.is_empty() {
        output.push_str(&format!("\n{}\n\n", heading("Bindings", color)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Behavior", "Providers", "Attributes", "Unresolved"]);
        for binding in &resolved.bindings {
            let attributes = binding
                .attributes
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![
                binding.behavior.clone(),
                binding.providers.join(", "),
                attributes,
                binding.unresolved.join(", "),
            ]);
        }
        output.push_str(&format!("{}\n", table));
    }

    if !result.result.warnings.is_empty() {
        output.push_str(&format!("\n{}\n\n", heading("Warnings", color)));
        for warning in &result.result.warnings {
            output.push_str(&format!("  {}\n", caution(&warning.to_string(), color)));
        }
    }
    output
}

/// Format catalog list result as text
pub fn catalog_list_text(result: &CatalogListResult, color: bool) -> String {
    if result.capabilities.is_empty() {
        return "No capabilities found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Version", "Category", "Prerequisites", "Templates"]);
    for item in &result.capabilities {
        table.add_row(vec![
            item.id.clone(),
            item.version.clone(),
            item.category.clone().unwrap_or_else(|| "-".to_string()),
            item.prerequisites.join(", "),
            if item.composable_with.is_empty() {
                "any".to_string()
            } else {
                item.composable_with.join(", ")
            },
        ]);
    }
    format!(
        "{}\n\n{}\n\nTotal: {} capability(ies)\nFingerprint: {}",
        heading("Capabilities", color),
        table,
        result.capabilities.len(),
        result.fingerprint
    )
}

/// Format catalog list result as JSON
pub fn catalog_list_json(result: &CatalogListResult) -> String {
    let capabilities: Vec<Value> = result
        .capabilities
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "version": item.version,
                "category": item.category,
                "prerequisites": item.prerequisites,
                "composable_with": item.composable_with,
            })
        })
        .collect();
    pretty(&json!({
        "capabilities": capabilities,
        "total": result.capabilities.len(),
        "catalog_fingerprint": result.fingerprint,
    }))
}

/// Format catalog show result as text
pub fn catalog_show_text(result: &CatalogShowResult, color: bool) -> String {
    let capability = &result.capability;
    let mut output = format!("{}\n\n", heading(&format!("Capability: {}", capability.id), color));
    output.push_str(&format!("  Name: {}\n", capability.name));
    output.push_str(&format!("  Version: {}\n", capability.version));
    if let Some(category) = &capability.category {
        output.push_str(&format!("  Category: {}\n", category));
    }
    if let Some(description) = &capability.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    if let Some(source) = &result.source {
        output.push_str(&format!("  Source: {}\n", source.display()));
    }
    if capability.composable_with.is_empty() {
        output.push_str("  Templates: any\n");
    } else {
        output.push_str(&format!(
            "  Templates: {}\n",
            capability.composable_with.join(", ")
        ));
    }
    if !capability.prerequisites.is_empty() {
        output.push_str("  Prerequisites:\n");
        for prerequisite in &capability.prerequisites {
            if prerequisite.version.is_any() {
                output.push_str(&format!("    - {}\n", prerequisite.id));
            } else {
                output.push_str(&format!(
                    "    - {} ({})\n",
                    prerequisite.id, prerequisite.version
                ));
            }
        }
    }
    if !capability.behaviors.is_empty() {
        output.push_str("  Behaviors:\n");
        for behavior in &capability.behaviors {
            output.push_str(&format!("    - {}\n", behavior.name));
        }
    }
    output
}

/// Format catalog show result as JSON
pub fn catalog_show_json(result: &CatalogShowResult) -> String {
    let mut value = serde_json::to_value(&result.capability).unwrap_or(Value::Null);
    if let Some(source) = &result.source {
        value["source"] = json!(source.display().to_string());
    }
    pretty(&value)
}

/// Format catalog lint result as text
pub fn catalog_lint_text(result: &CatalogLintResult, verbose: bool, color: bool) -> String {
    let mut output = format!("{}\n\n", heading("Catalog lint", color));
    for report in &result.reports {
        if report.is_valid() {
            output.push_str(&format!(
                "  {} {}: {}/{} checks\n",
                good("ok", color),
                report.capability_id,
                report.passed_checks(),
                report.total_checks()
            ));
        } else {
            output.push_str(&format!(
                "  {} {}\n",
                bad("fail", color),
                report.capability_id
            ));
        }
        if verbose {
            for (description, passed) in &report.checks {
                let mark = if *passed { "pass" } else { "fail" };
                output.push_str(&format!("      [{}] {}\n", mark, description));
            }
        }
        for error in &report.errors {
            output.push_str(&format!("      {}\n", error));
        }
        for warning in &report.warnings {
            output.push_str(&format!("      {} {}\n", caution("warning", color), warning));
        }
    }
    output.push_str(&format!(
        "\nSummary: {} valid, {} invalid (out of {} total)\n",
        result.valid_count(),
        result.reports.len() - result.valid_count(),
        result.reports.len()
    ));
    output
}

/// Format catalog lint result as JSON
pub fn catalog_lint_json(result: &CatalogLintResult, fingerprint: &str) -> String {
    let reports: Vec<Value> = result
        .reports
        .iter()
        .map(|report| {
            let checks: Vec<Value> = report
                .checks
                .iter()
                .map(|(description, passed)| json!({ "check": description, "passed": passed }))
                .collect();
            json!({
                "id": report.capability_id,
                "valid": report.is_valid(),
                "checks": checks,
                "errors": report.errors,
                "warnings": report.warnings,
            })
        })
        .collect();
    pretty(&json!({
        "valid": result.is_valid(),
        "reports": reports,
        "catalog_fingerprint": fingerprint,
    }))
}
