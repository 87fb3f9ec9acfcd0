use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_help_includes_usage() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tahfeez"));

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn api_and_mock_flags_conflict() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tahfeez"));

    cmd.args(["--api", "--mock", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
