use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use rfsense_core::{AnalysisError, DecodeReport, DeviceRegistry, FieldValue, Record};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RFSENSE_BUILD_COMMIT"),
    " ",
    env!("RFSENSE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "rfsense")]
#[command(version = VERSION)]
#[command(
    about = "Offline decoder for 433 MHz sensor pulse captures.",
    long_about = None,
    after_help = "Examples:\n  rfsense decode capture.jsonl -o report.json\n  rfsense decode capture.jsonl --stdout -R \"Test Sensor\"\n  rfsense devices --json"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a pulse capture and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  rfsense decode capture.jsonl -o report.json\n  rfsense decode 'captures/*.jsonl' --stdout --pretty"
    )]
    Decode {
        /// Path to a .jsonl pulse capture
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// List decoded records after decoding
        #[arg(long)]
        list_records: bool,

        /// Enable only this device (name or 1-based index); repeatable
        #[arg(short = 'R', long = "device", value_name = "DEVICE")]
        devices: Vec<String>,

        /// Disable this device (name or 1-based index); repeatable
        #[arg(long, value_name = "DEVICE")]
        disable: Vec<String>,
    },
    /// List the built-in device registry.
    Devices {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            list_records,
            devices,
            disable,
        } => {
            init_logging(cli.verbose, quiet);
            cmd_decode(DecodeArgs {
                input,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                list_records,
                devices,
                disable,
            })
        }
        Commands::Devices { json } => {
            init_logging(cli.verbose, false);
            cmd_devices(json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct DecodeArgs {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    list_records: bool,
    devices: Vec<String>,
    disable: Vec<String>,
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&path, &input_abs)?;
        Some(path)
    };

    let registry = build_registry(&args.devices, &args.disable)?;
    if registry.enabled().next().is_none() {
        return Err(CliError::new(
            "no devices enabled",
            Some("run `rfsense devices` to see the registry".to_string()),
        ));
    }

    info!(
        input = %resolved_input.display(),
        devices = registry.enabled().count(),
        "decoding capture"
    );
    let rep = match rfsense_core::analyze_pulse_file(&resolved_input, &registry) {
        Ok(rep) => rep,
        Err(AnalysisError::Window {
            window,
            source,
            partial,
        }) => {
            // Keep what decoded before the bad window.
            write_report(&partial, report_path.as_deref(), &args)?;
            return Err(CliError::new(
                format!("capture read failed at window {}: {}", window, source),
                Some(format!(
                    "the report holds the {} windows decoded before the failure",
                    partial.summary.windows_total
                )),
            ));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context("pulse capture decoding failed")
                .into());
        }
    };
    write_report(&rep, report_path.as_deref(), &args)?;

    let Some(report_path) = report_path else {
        return Ok(());
    };
    if !args.quiet {
        eprintln!(
            "OK: {} records from {} windows -> {}",
            rep.summary.records_total,
            rep.summary.windows_total,
            report_path.display()
        );
    }
    Ok(())
}

/// Write `rep` to `report_path`, or to stdout when there is none.
fn write_report(
    rep: &DecodeReport,
    report_path: Option<&Path>,
    args: &DecodeArgs,
) -> Result<(), CliError> {
    let json = serialize_report(rep, args.pretty, args.compact)?;

    let Some(report_path) = report_path else {
        print!("{}", json);
        if args.list_records && !args.quiet {
            print_records(rep);
        }
        return Ok(());
    };

    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report_path, json)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    if args.list_records && !args.quiet {
        print_records(rep);
    }
    Ok(())
}

fn build_registry(only: &[String], disable: &[String]) -> Result<DeviceRegistry, CliError> {
    let mut registry = DeviceRegistry::builtin();
    let hint = || Some("run `rfsense devices` to list names and indices".to_string());
    if !only.is_empty() {
        registry
            .enable_only(only)
            .map_err(|err| CliError::new(err.to_string(), hint()))?;
    }
    for selector in disable {
        registry
            .set_enabled(selector, false)
            .map_err(|err| CliError::new(err.to_string(), hint()))?;
    }
    Ok(registry)
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let report_dir = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    // A missing parent is created later and cannot contain the input.
    let Ok(Some(report_dir)) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_records(rep: &DecodeReport) {
    eprintln!("Records:");
    for record in &rep.records {
        eprintln!("  {}", format_record(record));
    }
}

fn format_record(record: &Record) -> String {
    let model = match record.get("model") {
        Some(FieldValue::String(model)) => model.as_str(),
        _ => "?",
    };
    let fields = record
        .fields()
        .iter()
        .filter(|field| field.key != "model" && field.key != "time")
        .map(|field| {
            let label = if field.label.is_empty() {
                field.key
            } else {
                field.label
            };
            let value = match &field.value {
                FieldValue::String(value) => value.clone(),
                FieldValue::Int(value) => value.to_string(),
                FieldValue::Float(value) => format!("{:.1}", value),
            };
            format!("{}={}", label, value)
        })
        .collect::<Vec<_>>();
    format!("{}: {}", model, fields.join(" "))
}

#[derive(Serialize)]
struct DeviceEntry {
    index: usize,
    name: &'static str,
    modulation: &'static str,
    short_limit: u32,
    long_limit: u32,
    reset_limit: u32,
    enabled: bool,
    fields: &'static [&'static str],
}

fn cmd_devices(json: bool) -> Result<(), CliError> {
    let registry = DeviceRegistry::builtin();
    let entries = registry
        .devices()
        .iter()
        .enumerate()
        .map(|(index, device)| DeviceEntry {
            index: index + 1,
            name: device.name,
            modulation: device.modulation.as_str(),
            short_limit: device.short_limit,
            long_limit: device.long_limit,
            reset_limit: device.reset_limit,
            enabled: device.enabled,
            fields: device.fields,
        })
        .collect::<Vec<_>>();

    if json {
        let out = serde_json::to_string_pretty(&entries).context("JSON serialization failed")?;
        println!("{}", out);
        return Ok(());
    }
    for entry in entries {
        println!(
            "[{:02}] {} ({}, {}/{}/{} us){}",
            entry.index,
            entry.name,
            entry.modulation,
            entry.short_limit,
            entry.long_limit,
            entry.reset_limit,
            if entry.enabled { "" } else { " disabled" }
        );
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsonl pulse capture".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsonl pulse capture".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsonl" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsonl file with one capture window per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .jsonl".to_string()),
        ));
    }
    if matches.len() > 1 {
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(
            message,
            Some("pass a single capture file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
