use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tahfeez"));
    cmd.env("HOME", home)
        .env("TAHFEEZ_MOCK_DELAY_MS", "0")
        .env("TAHFEEZ_STORAGE", "file")
        .env_remove("TAHFEEZ_USE_API")
        .env_remove("TAHFEEZ_MOCK_AUTH")
        .env_remove("TAHFEEZ_LANGUAGE")
        .env_remove("TAHFEEZ_API_URL");
    cmd
}

fn storage_file(home: &Path) -> std::path::PathBuf {
    home.join(".tahfeez").join("storage.json")
}

#[test]
fn mock_login_persists_session_until_logout() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["login", "-u", "admin", "--password", "admin123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as admin"));

    let stored = fs::read_to_string(storage_file(home_dir.path())).expect("storage file");
    assert!(stored.contains("mock_access_token_admin"));

    base_cmd(home_dir.path())
        .args(["status", "--verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logged_in\""))
        .stdout(predicate::str::contains("\"authenticated\": true"));

    base_cmd(home_dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    let stored = fs::read_to_string(storage_file(home_dir.path())).expect("storage file");
    assert!(!stored.contains("mock_access_token_admin"));

    base_cmd(home_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logged_out\""));
}

#[test]
fn mock_login_rejects_wrong_password() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["login", "-u", "admin", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    assert!(!storage_file(home_dir.path()).exists());
}

#[test]
fn register_validates_before_sending() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args([
            "register",
            "--username",
            "amal",
            "--email",
            "not-an-email",
            "--password",
            "longenough1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));
}

#[test]
fn goals_list_serves_demo_data() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["goals", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walk 10,000 steps a day"))
        .stdout(predicate::str::contains("\"count\": 3"));
}

#[test]
fn language_flag_localizes_demo_data() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["--lang", "ar", "scopes", "get", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("الصحة"));
}

#[test]
fn unknown_goal_reports_not_found() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["goals", "get", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal not found"));
}

#[test]
fn message_rating_is_range_checked() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["messages", "rate", "1", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rating must be between 1 and 5"));
}

#[test]
fn config_set_is_persisted_and_shown() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["config", "set", "language", "ar"])
        .assert()
        .success();

    let config_path = home_dir.path().join(".tahfeez").join("config.json");
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config_path).expect("config file"))
            .expect("config json");
    assert_eq!(saved["language"], "ar");

    base_cmd(home_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"ar\""));
}

#[test]
fn config_set_rejects_invalid_base_url() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["config", "set", "base_url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn types_command_prints_goal_schema() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["types", "goal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("progress_percentage"));
}

#[test]
fn api_login_stores_server_tokens() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("POST", "/v1/auth/token/")
        .match_body(Matcher::PartialJson(json!({
            "username": "amal",
            "password": "secret-pass"
        })))
        .with_status(200)
        .with_body(
            json!({
                "access": "a-1",
                "refresh": "r-1",
                "user": {
                    "id": 7,
                    "username": "amal",
                    "email": "amal@example.com",
                    "date_joined": "2024-03-01T08:00:00Z"
                }
            })
            .to_string(),
        )
        .create();

    base_cmd(home_dir.path())
        .env("TAHFEEZ_API_URL", server.url())
        .env("TAHFEEZ_MOCK_AUTH", "false")
        .args(["login", "-u", "amal", "--password", "secret-pass"])
        .assert()
        .success();

    let stored = fs::read_to_string(storage_file(home_dir.path())).expect("storage file");
    assert!(stored.contains("a-1"));
    assert!(stored.contains("r-1"));
    assert!(stored.contains("amal@example.com"));
}

#[test]
fn api_flag_routes_data_to_server() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    let scopes = server
        .mock("GET", "/v1/scopes/")
        .match_query(Matcher::Any)
        .match_header("accept-language", "en")
        .with_status(200)
        .with_body(
            json!([{
                "id": 42,
                "name": "Remote scope",
                "category": "personal"
            }])
            .to_string(),
        )
        .create();

    base_cmd(home_dir.path())
        .env("TAHFEEZ_API_URL", server.url())
        .args(["--api", "scopes", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote scope"));

    scopes.assert();
}

#[test]
fn api_failure_surfaces_server_message() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();

    server
        .mock("GET", "/v1/goals/5/")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(json!({"detail": "Not found."}).to_string())
        .create();

    base_cmd(home_dir.path())
        .env("TAHFEEZ_API_URL", server.url())
        .args(["--api", "goals", "get", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found."));
}
