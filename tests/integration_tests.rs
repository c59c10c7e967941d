//! Integration tests for the fleet-doclink CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fleet_fixture() -> Value {
    json!({
        "locked_documents": [16],
        "vehicles": [
            { "id": 1, "name": "Truck 1", "short_id": "0001", "license_plate": "ABC123" },
            { "id": 2, "name": "Truck 2", "short_id": "0002" },
            { "id": 3, "name": "Van", "short_id": "0003" }
        ],
        "documents": [
            { "id": 10, "name": "0001_insurance.pdf" },
            { "id": 11, "name": "0002_registration.PDF" },
            { "id": 12, "name": "loose.pdf" },
            { "id": 13, "name": "0001_photo.gif" },
            { "id": 14, "name": "abc123.pdf", "folder": 7 },
            { "id": 15, "name": "" },
            { "id": 16, "name": "0003_tax.pdf" }
        ]
    })
}

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("fleet.json");
    fs::write(&path, serde_json::to_string_pretty(&fleet_fixture()).unwrap()).unwrap();
    path
}

/// Command isolated from user and repo config
fn doclink(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fleet-doclink").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("FLEET_DOCLINK_LINKER__MATCH_KEY");
    cmd
}

fn link_target(data: &Path, document: u64) -> Value {
    let snapshot: Value = serde_json::from_str(&fs::read_to_string(data).unwrap()).unwrap();
    snapshot["documents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == json!(document))
        .map(|d| d["link_target"].clone())
        .unwrap_or(Value::Null)
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    doclink(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scans a document store"));

    // Short help carries the one-line summary
    doclink(temp_dir.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Link fleet documents to vehicles"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    doclink(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleet-doclink"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    doclink(temp_dir.path())
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_scan_lists_matches() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["scan", "--vehicle", "1,2", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("0001_insurance.pdf"))
        .stdout(predicate::str::contains("Truck 1"))
        .stdout(predicate::str::contains("0002_registration.PDF"))
        .stdout(predicate::str::contains("Documents matched"));

    // Scanning never writes
    assert_eq!(link_target(&data, 10), Value::Null);
}

#[test]
fn test_scan_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    let assert = doclink(temp_dir.path())
        .args(["scan", "--vehicle", "1,2", "--format", "json", "--data"])
        .arg(&data)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["state"], json!("reviewing"));
    assert_eq!(report["match_key"], json!("short-id"));
    // gif is filtered by extension and the unnamed document is skipped
    assert_eq!(report["total_scanned"], json!(5));
    assert_eq!(report["total_matched"], json!(2));
    assert_eq!(report["total_vehicles"], json!(2));
    assert_eq!(report["stats"]["skipped_by_extension"], json!(1));
    assert_eq!(report["stats"]["skipped_unnamed"], json!(1));

    let loose = report["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["document"] == json!("loose.pdf"))
        .unwrap();
    assert_eq!(loose["is_matched"], json!(false));
    assert_eq!(loose["vehicle"], Value::Null);
}

#[test]
fn test_scan_without_vehicles_fails() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["scan", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one vehicle must be selected"));
}

#[test]
fn test_link_with_yes_updates_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["link", "--yes", "--vehicle", "1", "--vehicle", "2", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 2 document(s)"));

    assert_eq!(link_target(&data, 10), json!(1));
    assert_eq!(link_target(&data, 11), json!(2));
    assert_eq!(link_target(&data, 12), Value::Null);
    // Extension filter keeps the gif out even though its token matches
    assert_eq!(link_target(&data, 13), Value::Null);
}

#[test]
fn test_link_reports_partial_failure() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["link", "--yes", "--all-vehicles", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 2 document(s)"))
        .stderr(predicate::str::contains("1 document(s) failed to link"))
        .stderr(predicate::str::contains("0003_tax.pdf: permission denied"));

    assert_eq!(link_target(&data, 10), json!(1));
    assert_eq!(link_target(&data, 16), Value::Null);
}

#[test]
fn test_quiet_link_still_names_failed_documents() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["-q", "link", "--yes", "--vehicle", "3", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("1 document(s) failed to link"))
        .stderr(predicate::str::contains(
            "0003_tax.pdf: permission denied: document 16 is read-only",
        ));
}

#[test]
fn test_link_by_license_plate_dry_run_leaves_file() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());
    let before = fs::read_to_string(&data).unwrap();

    let assert = doclink(temp_dir.path())
        .args([
            "link",
            "--dry-run",
            "--all-vehicles",
            "--key",
            "license-plate",
            "--folder",
            "7",
            "--format",
            "json",
            "--data",
        ])
        .arg(&data)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["state"], json!("done"));
    assert_eq!(report["result"]["linked_count"], json!(1));
    assert_eq!(report["lines"][0]["document"], json!("abc123.pdf"));
    assert_eq!(report["lines"][0]["vehicle_id"], json!(1));
    assert_eq!(report["lines"][0]["is_linked"], json!(true));

    assert_eq!(fs::read_to_string(&data).unwrap(), before);
}

#[test]
fn test_link_json_requires_yes() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["link", "--vehicle", "1", "--format", "json", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --yes"));
}

#[test]
fn test_link_declined_prompt_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["link", "--vehicle", "1", "--data"])
        .arg(&data)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Link cancelled"));

    assert_eq!(link_target(&data, 10), Value::Null);
}

#[test]
fn test_link_custom_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    // The pattern narrows short-id matches to insurance documents
    doclink(temp_dir.path())
        .args([
            "link",
            "--yes",
            "--vehicle",
            "1,2",
            "--key",
            "custom",
            "--pattern",
            "^{vehicle_field}_insurance",
            "--data",
        ])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 1 document(s)"));

    assert_eq!(link_target(&data, 10), json!(1));
    assert_eq!(link_target(&data, 11), Value::Null);
}

#[test]
fn test_preview_truncates_to_limit() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    doclink(temp_dir.path())
        .args(["preview", "--all-vehicles", "--limit", "1", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("0001_insurance.pdf"))
        .stdout(predicate::str::contains("Showing 1 of 4 matches"));
}

#[test]
fn test_preview_json() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());

    let assert = doclink(temp_dir.path())
        .args(["preview", "--vehicle", "2", "--format", "json", "--data"])
        .arg(&data)
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["total"], json!(1));
    assert_eq!(report["matches"][0]["document"], json!("0002_registration.PDF"));
}

#[test]
fn test_config_show_and_env_override() {
    let temp_dir = TempDir::new().unwrap();

    doclink(temp_dir.path())
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_key\": \"short-id\""));

    doclink(temp_dir.path())
        .args(["config", "get", "linker.match_key"])
        .env("FLEET_DOCLINK_LINKER__MATCH_KEY", "license-plate")
        .assert()
        .success()
        .stdout(predicate::str::contains("license-plate"));
}

#[test]
fn test_repo_config_sets_session_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let data = write_fixture(temp_dir.path());
    fs::write(
        temp_dir.path().join("fleet-doclink.toml"),
        "[linker]\nallowed_extensions = [\"gif\"]\n",
    )
    .unwrap();

    doclink(temp_dir.path())
        .args(["link", "--yes", "--vehicle", "1", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 1 document(s)"));

    assert_eq!(link_target(&data, 13), json!(1));
    assert_eq!(link_target(&data, 10), Value::Null);
}
