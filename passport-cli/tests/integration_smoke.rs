//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("passport").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("passport").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--unique-visits"))
        .stdout(predicate::str::contains("--active-user"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("passport").unwrap();
    cmd.arg("serve").arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}

#[test]
fn test_rejects_unknown_active_user() {
    let mut cmd = Command::cargo_bin("passport").unwrap();
    cmd.arg("serve").arg("--active-user").arg("nobody");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("most-recent"));
}
