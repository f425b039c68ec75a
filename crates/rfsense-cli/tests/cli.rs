use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rfsense"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_capture() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("test_sensor")
        .join("input.jsonl")
}

fn stdout_report(args: &[&str]) -> Value {
    let assert = cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--stdout")
        .args(args)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("devices")));
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn version_includes_build_metadata() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("rfsense 0.1.0 ("));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.jsonl");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn wrong_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.json");
    std::fs::write(&input, "{\"pulses\": []}\n").expect("write input");

    cmd()
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format").and(contains(".jsonl")));
}

#[test]
fn stdout_outputs_json() {
    let report = stdout_report(&[]);
    assert_eq!(report["summary"]["records_total"], 3);
    assert_eq!(report["records"][0]["id"], 75);
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_written_to_nested_path() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: 3 records from 4 windows"));

    let json = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["report_version"], 1);
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.jsonl");
    std::fs::copy(sample_capture(), &input).expect("copy capture");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn list_records_prints_readings() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("-o")
        .arg(report)
        .arg("--list-records")
        .assert()
        .success()
        .stderr(
            contains("Records:")
                .and(contains("Test Sensor: House Code=75 Battery=LOW Channel=3"))
                .and(contains("Temperature=74.2 Humidity=143")),
        );
}

#[test]
fn glob_matching_one_file_is_accepted() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("test_sen*")
        .join("input.jsonl");

    cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
}

#[test]
fn glob_matching_many_files_is_rejected() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("*")
        .join("input.jsonl");

    cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern").and(contains("hint:")));
}

#[test]
fn device_selection_restricts_decoders() {
    let report = stdout_report(&["-R", "Rubicson Temperature Sensor"]);
    assert_eq!(report["summary"]["records_total"], 0);
    assert_eq!(
        report["summary"]["devices"],
        serde_json::json!(["Rubicson Temperature Sensor"])
    );

    let report = stdout_report(&["--disable", "1"]);
    assert_eq!(report["summary"]["records_total"], 3);
    assert_eq!(report["summary"]["devices"], serde_json::json!(["Test Sensor"]));
}

#[test]
fn unknown_device_shows_hint() {
    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--stdout")
        .arg("-R")
        .arg("Acme")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown device 'Acme'").and(contains("rfsense devices")));
}

#[test]
fn disabling_every_device_is_an_error() {
    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--stdout")
        .arg("--disable")
        .arg("1")
        .arg("--disable")
        .arg("2")
        .assert()
        .failure()
        .stderr(contains("no devices enabled"));
}

#[test]
fn devices_lists_registry() {
    cmd()
        .arg("devices")
        .assert()
        .success()
        .stdout(
            contains("[01] Rubicson Temperature Sensor (ppm_raw, 1744/3500/5000 us)")
                .and(contains("[02] Test Sensor (ppm_raw, 2400/5000/8000 us)")),
        );
}

#[test]
fn devices_json_lists_fields() {
    let assert = cmd().arg("devices").arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value[1]["name"], "Test Sensor");
    assert_eq!(value[1]["fields"][6], "humidity");
    assert_eq!(value[1]["enabled"], true);
}

#[test]
fn malformed_line_writes_partial_report_and_fails() {
    let temp = TempDir::new().expect("tempdir");
    let fixture = std::fs::read_to_string(sample_capture()).expect("read capture");
    let first_window = fixture
        .lines()
        .find(|line| line.starts_with('{'))
        .expect("window line");
    let input = temp.path().join("capture.jsonl");
    std::fs::write(&input, format!("{first_window}\n{{\"pulses\": [[1]]}}\n"))
        .expect("write input");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .assert()
        .failure()
        .code(2)
        .stderr(
            contains("capture read failed at window 1")
                .and(contains("hint: the report holds the 1 windows")),
        );

    let json = std::fs::read_to_string(&report).expect("read partial report");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["summary"]["windows_total"], 1);
    assert_eq!(value["records"][0]["id"], 75);
}
