use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::demod::PulseDemodulator;
use crate::device::{DecodeContext, DeviceRegistry, DispatchError, dispatch, ts_to_rfc3339};
use crate::source::{CaptureWindow, PulseFileSource, PulseSource, SourceError};
use crate::{DEFAULT_TIME, DecodeReport, DecodeSummary, Record, WindowSummary, make_stub_report};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    /// Reading window `window` failed; `partial` holds every window before it.
    #[error("Source error at window {window}: {source}")]
    Window {
        window: u64,
        #[source]
        source: SourceError,
        partial: Box<DecodeReport>,
    },
    #[error("Decode error in window {window}: {source}")]
    Dispatch {
        window: u64,
        #[source]
        source: DispatchError,
    },
}

/// Decode every window of a JSON Lines pulse capture.
pub fn analyze_pulse_file(
    path: &Path,
    registry: &DeviceRegistry,
) -> Result<DecodeReport, AnalysisError> {
    let source = PulseFileSource::open(path)?;
    analyze_source(path, source, registry)
}

/// Decode every window `source` yields, offering each to all enabled devices.
///
/// A source error stops the run at the failing window. The windows decoded
/// before it come back in `AnalysisError::Window::partial`, so the caller
/// decides whether to keep them.
pub fn analyze_source<S: PulseSource>(
    path: &Path,
    mut source: S,
    registry: &DeviceRegistry,
) -> Result<DecodeReport, AnalysisError> {
    let demodulator = PulseDemodulator;
    let mut windows = Vec::new();
    let mut records: Vec<Record> = Vec::new();
    let mut last_ts = None;
    let mut index = 0u64;

    loop {
        let CaptureWindow { ts, pulses } = match source.next_window() {
            Ok(Some(window)) => window,
            Ok(None) => break,
            Err(err) => {
                warn!(window = index, error = %err, "capture read failed");
                let partial = build_report(path, registry, windows, records, last_ts)?;
                return Err(AnalysisError::Window {
                    window: index,
                    source: err,
                    partial: Box::new(partial),
                });
            }
        };
        let ctx = DecodeContext::new(ts);
        let decoded = dispatch(registry, &demodulator, &pulses, &ctx, &mut records)
            .map_err(|source| AnalysisError::Dispatch {
                window: index,
                source,
            })?;
        debug!(window = index, pulses = pulses.len(), decoded, "window decoded");
        if ts.is_some() {
            last_ts = ts;
        }
        windows.push(WindowSummary {
            index,
            ts: ts_to_rfc3339(ts),
            decoded,
        });
        index += 1;
    }

    info!(
        windows = windows.len(),
        records = records.len(),
        "capture decoded"
    );

    build_report(path, registry, windows, records, last_ts)
}

fn build_report(
    path: &Path,
    registry: &DeviceRegistry,
    windows: Vec<WindowSummary>,
    records: Vec<Record>,
    last_ts: Option<f64>,
) -> Result<DecodeReport, AnalysisError> {
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    report.generated_at = ts_to_rfc3339(last_ts).unwrap_or_else(|| DEFAULT_TIME.to_string());
    report.summary = DecodeSummary {
        windows_total: windows.len() as u64,
        records_total: records.len() as u64,
        devices: registry
            .enabled()
            .map(|device| device.name.to_string())
            .collect(),
    };
    report.windows = windows;
    report.records = records;
    Ok(report)
}
