use anyhow::{bail, Context, Result};
use jsonschema::Validator;
use serde_json::Value;

use crate::errors::{CheckIssue, CheckReport};
use crate::validate::validate_categories;

const SCHEMA_V10: &str = include_str!("../schema/courtside-v1.0.schema.json");

/// Version declared by a category set document ("1.0" when absent).
pub fn detect_version(data: &Value) -> String {
    data.get("version")
        .and_then(Value::as_str)
        .unwrap_or("1.0")
        .to_string()
}

/// Compile the embedded category set schema.
pub fn validator() -> Result<Validator> {
    let schema: Value =
        serde_json::from_str(SCHEMA_V10).context("embedded schema is invalid JSON")?;
    Validator::new(&schema).map_err(|e| anyhow::anyhow!("schema compilation failed: {e}"))
}

/// Validate a single category set value against the schema.
pub fn validate(data: &Value) -> Result<()> {
    let v = validator()?;
    if v.is_valid(data) {
        return Ok(());
    }
    let msgs: Vec<String> = v
        .iter_errors(data)
        .map(|error| format!("  {}: {error}", location(&error.instance_path.to_string())))
        .collect();
    bail!("validation failed:\n{}", msgs.join("\n"));
}

/// Validate multiple files, logging results. Returns (passed, failed) counts.
pub fn validate_files(paths: &[String]) -> Result<(usize, usize)> {
    let v = validator()?;
    let mut passed = 0usize;
    let mut failed = 0usize;
    for path in paths {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
        let data: Value =
            serde_json::from_str(&content).with_context(|| format!("{path}: invalid JSON"))?;
        if v.is_valid(&data) {
            tracing::info!(file = %path, "schema ok");
            passed += 1;
        } else {
            failed += 1;
            for error in v.iter_errors(&data) {
                tracing::warn!(
                    file = %path,
                    at = %location(&error.instance_path.to_string()),
                    "{error}"
                );
            }
        }
    }
    Ok((passed, failed))
}

/// Full check producing a structured report (for `court check --json`).
///
/// Semantic category checks only run when the document parses as a
/// category set; schema errors are reported either way.
pub fn check(data: &Value, file: &str, strict: bool, buffer_range: f64) -> CheckReport {
    let version = detect_version(data);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match validator() {
        Ok(v) => {
            for error in v.iter_errors(data) {
                let path = error.instance_path.to_string();
                errors.push(CheckIssue {
                    code: "E001".to_string(),
                    check: "schema".to_string(),
                    message: error.to_string(),
                    path: Some(if path.is_empty() {
                        "$(root)".to_string()
                    } else {
                        format!("${path}")
                    }),
                });
            }
        }
        Err(e) => errors.push(CheckIssue {
            code: "E000".to_string(),
            check: "schema".to_string(),
            message: e.to_string(),
            path: None,
        }),
    }

    if let Ok(set) = crate::spec::from_value(data.clone()) {
        for issue in validate_categories(&set.categories, buffer_range) {
            if issue.is_error() {
                errors.push(issue);
            } else {
                warnings.push(issue);
            }
        }
        if set.categories.is_empty() {
            warnings.push(CheckIssue {
                code: "W001".to_string(),
                check: "lint".to_string(),
                message: "category set has no categories".to_string(),
                path: Some("$.categories".to_string()),
            });
        }
    }

    let pass = errors.is_empty() && (!strict || warnings.is_empty());
    CheckReport {
        file: file.to_string(),
        version,
        pass,
        errors,
        warnings,
    }
}

fn location(path: &str) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}
