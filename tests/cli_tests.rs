//! Command-line Test Suite
//!
//! Runs the `seqcat` binary against temporary catalog roots.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn seqcat(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("seqcat").expect("binary should build");
    cmd.env_remove("SEQCAT_ROOT").arg("--root").arg(root);
    cmd
}

#[test]
fn test_status_on_fresh_root() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequences: 0"))
        .stdout(predicate::str::contains("Active: none"));

    assert!(dir.path().join("index.json").exists());
}

#[test]
fn test_create_next_and_list() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path())
        .args(["create", "trip1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: trip1 (step 0)"));

    seqcat(dir.path())
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("step 1"));

    seqcat(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("trip1"))
        .stdout(predicate::str::contains("Active: trip1 (step 1)"));
}

#[test]
fn test_duplicate_create_fails() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path()).args(["create", "x"]).assert().success();
    seqcat(dir.path())
        .args(["create", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_attach_and_show_json() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("catalog");
    let log = dir.path().join("imu-capture.txt");
    std::fs::write(&log, "0.0 0.0 9.8\n").unwrap();

    seqcat(&root).args(["create", "trip1"]).assert().success();
    seqcat(&root)
        .args(["attach", "imu-log"])
        .arg(&log)
        .assert()
        .success();

    assert!(!log.exists());
    assert!(root.join("trip1/imu.txt").exists());

    let output = seqcat(&root)
        .args(["--format", "json", "show", "trip1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["name"], "trip1");
    assert_eq!(summary["active"], true);
    assert_eq!(summary["assets"][0]["kind"], "imu-log");
}

#[test]
fn test_attach_without_active_fails() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("scan.mp4");
    std::fs::write(&src, b"video").unwrap();

    seqcat(&dir.path().join("catalog"))
        .args(["attach", "scan"])
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active sequence"));
    assert!(src.exists());
}

#[test]
fn test_delete_by_index() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path()).args(["add", "a"]).assert().success();
    seqcat(dir.path()).args(["add", "b"]).assert().success();
    seqcat(dir.path())
        .args(["delete", "--index", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted a"));

    assert!(!dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());

    seqcat(dir.path())
        .args(["delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sequence not found"));
}

#[test]
fn test_numeric_name_is_not_an_index() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path()).args(["add", "first"]).assert().success();
    seqcat(dir.path()).args(["add", "0"]).assert().success();

    seqcat(dir.path())
        .args(["delete", "--index", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted first"));
    assert!(dir.path().join("0").exists());

    seqcat(dir.path())
        .args(["delete", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0"));
    assert!(!dir.path().join("0").exists());
}

#[test]
fn test_activate_out_of_range() {
    let dir = tempfile::tempdir().unwrap();

    seqcat(dir.path()).args(["add", "a"]).assert().success();
    seqcat(dir.path())
        .args(["activate", "--index", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sequence at index 3"));
    seqcat(dir.path())
        .args(["activate", "--index", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: a (step 0)"));
    seqcat(dir.path())
        .args(["activate", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: a (step 0)"));
}

#[test]
fn test_invalid_asset_kind_rejected() {
    let dir = tempfile::tempdir().unwrap();
    seqcat(dir.path())
        .args(["attach", "video", "x.mp4"])
        .assert()
        .failure();
}
