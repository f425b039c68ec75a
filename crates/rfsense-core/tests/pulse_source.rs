use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rfsense_core::{AnalysisError, DeviceRegistry, PulseFileSource, PulseSource, SourceError};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn temp_capture(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("rfsense_capture_{unique}.jsonl"));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn pulse_source_reads_windows_from_fixture() {
    let path = repo_root()
        .join("tests")
        .join("golden")
        .join("test_sensor")
        .join("input.jsonl");
    let mut source = PulseFileSource::open(&path).unwrap();

    let mut windows = Vec::new();
    while let Some(window) = source.next_window().unwrap() {
        windows.push(window);
    }

    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0].ts, Some(1_700_000_000.0));
    assert_eq!(windows[2].ts, None);
    // Sync gap, three 40-bit repetitions with two separators, end gap.
    assert_eq!(windows[0].pulses.len(), 1 + 3 * 40 + 2 + 1);
}

#[test]
fn pulse_source_missing_file_is_io_error() {
    let path = repo_root().join("tests").join("no_such_capture.jsonl");
    let err = match PulseFileSource::open(&path) {
        Ok(_) => panic!("expected missing file to be rejected"),
        Err(err) => err,
    };
    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn malformed_line_keeps_windows_decoded_before_it() {
    let fixture = repo_root()
        .join("tests")
        .join("golden")
        .join("test_sensor")
        .join("input.jsonl");
    let fixture = fs::read_to_string(fixture).unwrap();
    let first_window = fixture
        .lines()
        .find(|line| line.starts_with('{'))
        .unwrap();
    let path = temp_capture(&format!("{first_window}\n{{\"pulses\": [[1]]}}\n"));
    let err = rfsense_core::analyze_pulse_file(&path, &DeviceRegistry::builtin()).unwrap_err();
    let _ = fs::remove_file(&path);

    let AnalysisError::Window {
        window,
        source,
        partial,
    } = err
    else {
        panic!("expected a window error");
    };
    assert_eq!(window, 1);
    assert!(matches!(source, SourceError::Malformed { line: 2, .. }));
    assert_eq!(partial.summary.windows_total, 1);
    assert_eq!(partial.records.len(), 1);
    assert_eq!(
        partial.records[0].get("id"),
        Some(&rfsense_core::FieldValue::Int(75))
    );
}

#[test]
fn empty_capture_yields_empty_report() {
    let path = temp_capture("# nothing captured\n\n");
    let report = rfsense_core::analyze_pulse_file(&path, &DeviceRegistry::builtin()).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(report.summary.windows_total, 0);
    assert_eq!(report.generated_at, rfsense_core::DEFAULT_TIME);
    assert_eq!(report.input.bytes, 20);
}
