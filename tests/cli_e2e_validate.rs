//! End-to-end tests for the `validate` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of the
//! `validate` subcommand from a user's perspective. Nothing here touches the
//! network or runs VCS commands; validation is a read-only resolution pass.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn vcspull() -> Command {
    Command::cargo_bin("vcspull").unwrap()
}

#[test]
fn test_validate_valid_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".vcspull.yaml");

    config_file
        .write_str(&format!(
            r#"
{}/repos:
  flask: git+https://github.com/pallets/flask.git
"#,
            temp.path().display()
        ))
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("1 repositories"));
}

#[test]
fn test_validate_invalid_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".vcspull.yaml");

    // Actually invalid YAML syntax (unmatched bracket)
    config_file
        .write_str(
            r#"
/repos:
  flask: [unclosed
"#,
        )
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .failure();
}

#[test]
fn test_validate_missing_prefix_reports_suggestion() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".vcspull.yaml");

    config_file
        .write_str(
            r#"
/repos:
  flask: https://github.com/pallets/flask.git
"#,
        )
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("MissingProtocolPrefix"))
        .stdout(predicate::str::contains(
            "git+https://github.com/pallets/flask.git",
        ));
}

#[test]
fn test_validate_reports_all_errors_at_once() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child(".vcspull.yaml");

    config_file
        .write_str(
            r#"
/repos:
  one: https://host/one.git
  two: https://host/two.git
"#,
        )
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("/repos/one/url"))
        .stdout(predicate::str::contains("/repos/two/url"));
}

#[test]
fn test_validate_duplicate_warns_but_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();
    let first = temp.child("a.yaml");
    let second = temp.child("b.yaml");

    first
        .write_str("/repos:\n  r: git+https://host/old.git\n")
        .unwrap();
    second
        .write_str("/repos:\n  r: git+https://host/new.git\n")
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(first.path())
        .arg("--config")
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicate definition of /repos/r"));
}

#[test]
fn test_validate_duplicate_fails_in_strict_mode() {
    let temp = assert_fs::TempDir::new().unwrap();
    let first = temp.child("a.yaml");
    let second = temp.child("b.yaml");

    first
        .write_str("/repos:\n  r: git+https://host/old.git\n")
        .unwrap();
    second
        .write_str("/repos:\n  r: git+https://host/new.git\n")
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(first.path())
        .arg("--config")
        .arg(second.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn test_validate_circular_include_is_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let first = temp.child("a.yaml");
    let second = temp.child("b.yaml");

    first.write_str("include:\n  - ./b.yaml\n").unwrap();
    second.write_str("include:\n  - ./a.yaml\n").unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(first.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular include"));
}

#[test]
fn test_validate_nonexistent_config_hints() {
    vcspull()
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/vcspull.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_validate_json_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config_file = temp.child("vcspull.json");

    config_file
        .write_str(r#"{"/repos": {"flask": "git+https://github.com/pallets/flask.git"}}"#)
        .unwrap();

    vcspull()
        .arg("validate")
        .arg("--config")
        .arg(config_file.path())
        .assert()
        .success();
}
