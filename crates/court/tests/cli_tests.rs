//! CLI integration via the JSON interface.

use test_helpers::{court_bin, court_in, court_json, court_stdout, workspace_root};

use std::io::Write;
use std::process::Stdio;

// ── classify ────────────────────────────────────────────────────

#[test]
fn classify_eligible_rating() {
    let v = court_json(
        &["classify", "demos/autumn_open.json", "--rating", "2.5", "--json"],
        0,
    );
    let result = &v["result"];
    assert_eq!(result["isEligible"], true);
    assert_eq!(result["eligibleCategories"], serde_json::json!(["Gold"]));
    assert_eq!(
        result["ineligibleCategories"],
        serde_json::json!(["Bronze", "Silver", "Platinum"])
    );
    assert_eq!(result["reasons"]["Gold"], "Eligible to register");
    assert_eq!(result["reasons"]["Silver"], "Category is full");
    assert_eq!(
        result["reasons"]["Bronze"],
        "ELO rating too high (max 1, have 2.5)"
    );
    assert_eq!(
        result["reasons"]["Platinum"],
        "ELO rating too low (need 3+, have 2.5)"
    );
}

#[test]
fn classify_borderline_rating() {
    let v = court_json(
        &["classify", "demos/autumn_open.json", "--rating", "1.85", "--json"],
        0,
    );
    let result = &v["result"];
    assert_eq!(result["isEligible"], false);
    assert_eq!(result["borderlineCategories"], serde_json::json!(["Gold"]));
    assert_eq!(
        result["reasons"]["Gold"],
        "ELO rating (1.9) is close to range (2.0-3.0)"
    );
    assert_eq!(v["buffer_range"], 0.2);
}

#[test]
fn classify_wider_buffer_flag() {
    let v = court_json(
        &[
            "classify",
            "demos/autumn_open.json",
            "--rating",
            "2.6",
            "--buffer",
            "0.5",
            "--json",
        ],
        0,
    );
    assert_eq!(
        v["result"]["borderlineCategories"],
        serde_json::json!(["Platinum"])
    );
    assert_eq!(v["buffer_range"], 0.5);
}

#[test]
fn classify_signed_out() {
    let v = court_json(&["classify", "demos/autumn_open.json", "--json"], 0);
    let result = &v["result"];
    assert_eq!(result["isEligible"], false);
    assert_eq!(result["ineligibleCategories"].as_array().unwrap().len(), 4);
    for reason in result["reasons"].as_object().unwrap().values() {
        assert_eq!(reason, "Login required to check eligibility");
    }
    assert!(v["rating"].is_null());
}

#[test]
fn classify_full_category_overrides_rating() {
    let v = court_json(
        &["classify", "demos/gold_full.json", "--rating", "2.5", "--json"],
        0,
    );
    assert_eq!(v["result"]["isEligible"], false);
    assert_eq!(v["result"]["reasons"]["Gold"], "Category is full");
    assert_eq!(v["details"][0]["spots_left"], 0);
}

#[test]
fn classify_rejects_inverted_bounds() {
    let out = court_bin()
        .args(["classify", "demos/inverted.json", "--rating", "2.5"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("min_elo 3 above max_elo 2"), "stderr: {stderr}");
}

#[test]
fn classify_lenient_accepts_inverted_bounds() {
    let v = court_json(
        &[
            "classify",
            "demos/inverted.json",
            "--rating",
            "2.5",
            "--lenient",
            "--json",
        ],
        0,
    );
    assert_eq!(v["result"]["ineligibleCategories"], serde_json::json!(["Gold"]));
}

#[test]
fn classify_rejects_negative_buffer() {
    let out = court_bin()
        .args([
            "classify",
            "demos/autumn_open.json",
            "--rating",
            "2.5",
            "--buffer",
            "-0.1",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn classify_reads_stdin() {
    let content = std::fs::read(workspace_root().join("demos/gold_full.json")).unwrap();
    let mut child = court_bin()
        .args(["classify", "-", "--rating", "2.5", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&content).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["tournament"], "Gold Cup");
}

#[test]
fn classify_text_output() {
    let out = court_stdout(&["classify", "demos/autumn_open.json", "--rating", "2.5"]);
    assert!(out.starts_with("Autumn Open  rating 2.5"));
    assert!(out.contains("Gold"));
    assert!(out.contains("eligible for at least one category"));
}

// ── status ──────────────────────────────────────────────────────

#[test]
fn status_matches_classify() {
    for (rating, expected) in [
        ("2.5", "eligible"),
        ("1.85", "borderline"),
        ("1.5", "ineligible"),
    ] {
        let out = court_stdout(&[
            "status",
            "demos/autumn_open.json",
            "--category",
            "Gold",
            "--rating",
            rating,
        ]);
        assert_eq!(out.trim(), expected, "rating {rating}");
    }
}

#[test]
fn status_without_rating_is_null() {
    let v = court_json(
        &["status", "demos/autumn_open.json", "--category", "Gold", "--json"],
        0,
    );
    assert_eq!(v["category"], "Gold");
    assert!(v["status"].is_null());
}

#[test]
fn status_unknown_category_fails() {
    let out = court_bin()
        .args([
            "status",
            "demos/autumn_open.json",
            "--category",
            "Diamond",
            "--rating",
            "2.0",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown category"));
}

#[test]
fn status_rejects_inverted_bounds() {
    let out = court_bin()
        .args([
            "status",
            "demos/inverted.json",
            "--category",
            "Gold",
            "--rating",
            "2.5",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("min_elo 3 above max_elo 2"));

    let out = court_stdout(&[
        "status",
        "demos/inverted.json",
        "--category",
        "Gold",
        "--rating",
        "2.5",
        "--lenient",
    ]);
    assert_eq!(out.trim(), "ineligible");
}

// ── extreme capacities ──────────────────────────────────────────

const HUGE_SET: &str = r#"{"tournament":"Marathon","categories":[
    {"category":"Gold","min_elo":2.0,"max_elo":3.0,"max_participants":9223372036854775807,"current_participants":-1},
    {"category":"Silver","min_elo":1.0,"max_elo":2.0,"max_participants":1}
]}"#;

#[test]
fn classify_lenient_survives_extreme_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.json");
    std::fs::write(&path, HUGE_SET).unwrap();
    let v = court_json(
        &[
            "classify",
            path.to_str().unwrap(),
            "--rating",
            "2.5",
            "--lenient",
            "--json",
        ],
        0,
    );
    assert_eq!(v["details"][0]["spots_left"], i64::MAX);
    assert_eq!(v["result"]["eligibleCategories"], serde_json::json!(["Gold"]));
}

#[test]
fn list_survives_extreme_capacity() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("huge.json"), HUGE_SET).unwrap();
    let out = court_stdout(&["list", dir.path().to_str().unwrap()]);
    assert!(out.contains(&format!("-1/{}", i64::MAX)), "table: {out}");
}

// ── check / validate ────────────────────────────────────────────

#[test]
fn check_passes_clean_set() {
    let v = court_json(&["check", "demos/autumn_open.json", "--strict", "--json"], 0);
    assert_eq!(v["pass"], true);
    assert_eq!(v["version"], "1.0");
}

#[test]
fn check_reports_inverted_bounds() {
    let v = court_json(&["check", "demos/inverted.json", "--json"], 1);
    assert_eq!(v["pass"], false);
    assert_eq!(v["errors"][0]["code"], "E101");
}

#[test]
fn check_strict_fails_on_overbooking() {
    let v = court_json(&["check", "demos/overbooked.json", "--json"], 0);
    assert_eq!(v["warnings"][0]["code"], "W101");
    let v = court_json(&["check", "demos/overbooked.json", "--strict", "--json"], 1);
    assert_eq!(v["pass"], false);
}

#[test]
fn validate_schema_only() {
    let out = court_bin()
        .args(["validate", "demos/autumn_open.json", "demos/inverted.json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("2 passed, 0 failed"));
}

// ── list / templates / new / init ───────────────────────────────

#[test]
fn list_demos() {
    let out = court_stdout(&["list", "demos"]);
    assert!(out.starts_with("FILE"));
    assert!(out.contains("autumn_open.json"));
    assert!(out.contains("21/50"));
}

#[test]
fn templates_listed() {
    let out = court_stdout(&["templates"]);
    for name in ["club", "social", "open"] {
        assert!(out.contains(name), "missing template {name}");
    }
}

#[test]
fn new_from_template_passes_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("winter.json");
    let status = court_bin()
        .args([
            "new",
            "club",
            "--tournament",
            "Winter Cup",
            "-o",
            path.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    let v = court_json(&["check", path.to_str().unwrap(), "--strict", "--json"], 0);
    assert_eq!(v["pass"], true);
}

#[test]
fn new_unknown_template_fails() {
    let out = court_bin().args(["new", "ladder"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("available: club, social, open"));
}

#[test]
fn workspace_defaults_set_buffer() {
    let dir = tempfile::tempdir().unwrap();
    assert!(court_in(dir.path())
        .args(["init", "--workspace"])
        .status()
        .unwrap()
        .success());
    std::fs::write(
        dir.path().join(".courtside/defaults.json"),
        r#"{"buffer_range": 0.6}"#,
    )
    .unwrap();

    let fixture = workspace_root().join("demos/autumn_open.json");
    let out = court_in(dir.path())
        .args(["classify", fixture.to_str().unwrap(), "--rating", "2.5", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["buffer_range"], 0.6);
    assert_eq!(
        v["result"]["borderlineCategories"],
        serde_json::json!(["Platinum"])
    );
}

#[test]
fn env_buffer_applies_without_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = workspace_root().join("demos/autumn_open.json");
    let out = court_in(dir.path())
        .env("COURTSIDE_BUFFER_RANGE", "0.05")
        .args(["classify", fixture.to_str().unwrap(), "--rating", "1.9", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["buffer_range"], 0.05);
    assert_eq!(
        v["result"]["borderlineCategories"],
        serde_json::json!([])
    );
}

#[test]
fn malformed_defaults_only_affect_commands_that_read_them() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".courtside")).unwrap();
    std::fs::write(dir.path().join(".courtside/defaults.json"), "{buffer_range").unwrap();

    let fixture = workspace_root().join("demos/autumn_open.json");
    let out = court_in(dir.path())
        .args(["classify", fixture.to_str().unwrap(), "--rating", "2.5"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    assert!(court_in(dir.path()).arg("templates").status().unwrap().success());
    assert!(court_in(dir.path())
        .args(["init", "--workspace"])
        .status()
        .unwrap()
        .success());
    let out = court_in(dir.path())
        .args(["classify", fixture.to_str().unwrap(), "--rating", "2.5"])
        .output()
        .unwrap();
    assert!(out.status.success());
}

#[test]
fn init_writes_starter_set() {
    let dir = tempfile::tempdir().unwrap();
    assert!(court_in(dir.path()).arg("init").status().unwrap().success());
    let content = std::fs::read_to_string(dir.path().join("categories.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v["categories"].as_array().unwrap().len(), 4);
}
