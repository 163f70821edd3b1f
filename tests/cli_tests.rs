//! CLI integration tests using the real pax binary

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    TestWorkspace::new()
        .pax()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("create-bundle"))
        .stdout(predicate::str::contains("remove-bundle"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_provision_help_lists_options() {
    TestWorkspace::new()
        .pax()
        .args(["provision", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--framework"))
        .stdout(predicate::str::contains("--no-deploy"))
        .stdout(predicate::str::contains("--deploy-poms"))
        .stdout(predicate::str::contains("--runner"))
        .stdout(predicate::str::contains("felix"));
}

#[test]
fn test_version_output() {
    TestWorkspace::new()
        .pax()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pax"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    TestWorkspace::new()
        .pax()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pax"));
}

#[test]
fn test_completions_unknown_shell() {
    TestWorkspace::new()
        .pax()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_unknown_command() {
    TestWorkspace::new()
        .pax()
        .arg("install")
        .assert()
        .failure();
}

#[test]
fn test_provision_without_descriptor() {
    TestWorkspace::new()
        .pax()
        .args(["provision", "--dir", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
