use std::fs;
use std::path::{Path, PathBuf};

use rfsense_core::{DeviceRegistry, analyze_pulse_file};
use serde_json::Value;

fn golden_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_report(dir: &str) -> Value {
    let expected_path = golden_dir(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let input = golden_dir(dir).join("input.jsonl");
    let expected = load_expected_report(dir);

    let actual =
        analyze_pulse_file(&input, &DeviceRegistry::builtin()).expect("decode pulse capture");
    let mut actual = serde_json::to_value(actual).expect("serialize actual");
    actual["input"]["path"] = expected["input"]["path"].clone();

    assert_eq!(actual, expected, "golden mismatch in {dir}");
}

#[test]
fn golden_test_sensor() {
    run_golden("tests/golden/test_sensor");
}

#[test]
fn golden_rubicson() {
    run_golden("tests/golden/rubicson");
}

#[test]
fn golden_no_match() {
    run_golden("tests/golden/no_match");
}

#[test]
fn golden_test_sensor_has_reference_reading() {
    let report = load_expected_report("tests/golden/test_sensor");
    let record = &report["records"][0];
    assert_eq!(record["model"], "Test Sensor");
    assert_eq!(record["id"], 75);
    assert_eq!(record["battery"], "LOW");
    assert_eq!(record["channel"], 3);
    assert_eq!(record["temperature_C"], 74.2);
    assert_eq!(record["humidity"], 143);
}

#[test]
fn golden_test_sensor_untimed_window_uses_default_time() {
    let report = load_expected_report("tests/golden/test_sensor");
    assert!(report["windows"][2].get("ts").is_none());
    assert_eq!(report["records"][2]["time"], rfsense_core::DEFAULT_TIME);
}

#[test]
fn golden_no_match_rejects_rubicson_lookalike() {
    let report = load_expected_report("tests/golden/no_match");
    assert_eq!(report["summary"]["records_total"], 0);
    assert_eq!(report["windows"][1]["decoded"], 0);
}

#[test]
fn golden_with_test_sensor_disabled_decodes_nothing() {
    let input = golden_dir("tests/golden/test_sensor").join("input.jsonl");
    let mut registry = DeviceRegistry::builtin();
    registry
        .set_enabled("Test Sensor", false)
        .expect("known device");

    let report = analyze_pulse_file(&input, &registry).expect("decode pulse capture");
    assert_eq!(report.summary.windows_total, 4);
    assert_eq!(report.summary.records_total, 0);
    assert_eq!(
        report.summary.devices,
        vec!["Rubicson Temperature Sensor".to_string()]
    );
}
