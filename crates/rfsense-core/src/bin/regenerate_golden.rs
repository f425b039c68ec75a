use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rfsense_core::{DeviceRegistry, analyze_pulse_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;
    let registry = DeviceRegistry::builtin();

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.jsonl");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_report.json");
        regenerate_one(&input, &output, &registry)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path, registry: &DeviceRegistry) -> Result<(), String> {
    let report = analyze_pulse_file(input, registry)
        .map_err(|err| format!("decoding failed for {}: {}", input.display(), err))?;
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
