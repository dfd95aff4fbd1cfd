use assert_cmd::Command;
use predicates::prelude::*;

fn examine() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_examine"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_command() {
    examine().arg("--help").assert().success();
}

#[test]
fn test_version_command() {
    examine().arg("--version").assert().success();
}

#[test]
fn test_run_help_lists_flags() {
    examine()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_list_prints_the_demo_manifest() {
    examine()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("examine::demo::passing_assertion"))
        .stdout(predicate::str::contains("examine::demo::failing_assertion"))
        .stdout(predicate::str::contains("examine::demo::substitute_round_trip"))
        .stdout(predicate::str::contains("examine::demo::unmocked_call_is_reported"));
}

#[test]
fn test_run_reports_the_demo_outcomes_and_exits_nonzero() {
    examine()
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Test results: 3/6 passed."))
        .stdout(predicate::str::contains("[ * ] examine::demo::passing_assertion"))
        .stdout(predicate::str::contains("[!!!] examine::demo::failing_assertion"))
        .stdout(predicate::str::contains("         one should equal zero"))
        .stdout(predicate::str::contains("[!!!] examine::demo::unmocked_call_is_reported"));
}

#[test]
fn test_run_with_filter_succeeds_when_everything_passes() {
    examine()
        .arg("run")
        .arg("--filter")
        .arg("passing_assertion")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test results: 1/1 passed."));
}

#[test]
fn test_run_with_unmatched_filter_fails() {
    examine()
        .arg("run")
        .arg("--filter")
        .arg("no_such_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tests matched filter"));
}

#[test]
fn test_json_report_is_valid_json() {
    let output = examine()
        .arg("run")
        .arg("--filter")
        .arg("passing_assertion")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["passed"], 1);
    assert_eq!(json["total"], 1);
    assert_eq!(json["tests"][0]["failed"], false);
}

#[test]
fn test_config_file_supplies_the_default_filter() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".examine.toml"),
        "[runner]\nfilter = \"passing_assertion\"\n",
    )
    .unwrap();

    examine()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Test results: 1/1 passed."));
}

#[test]
fn test_cli_filter_overrides_the_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".examine.toml"),
        "[runner]\nfilter = \"passing_assertion\"\n",
    )
    .unwrap();

    examine()
        .arg("run")
        .arg("--filter")
        .arg("substitute_round_trip")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Test results: 1/1 passed."))
        .stdout(predicate::str::contains("substitute round trip complete"));
}
