//! rfsense core library: sensor readings out of raw 433/868 MHz pulse trains.
//!
//! Pipeline: a pulse source yields capture windows; the dispatcher offers
//! each window to every enabled device in registry order, demodulating the
//! pulses afresh under that device's timing profile; the device's decoder
//! reads the resulting bit buffer and emits zero or more records. Decoders
//! are pure and independent, so a window is offered to all of them and the
//! one that recognises it (if any) speaks.
//!
//! Invariants:
//! - Bit buffers are bounded and only read within each row's declared length.
//! - A frame that does not fit a protocol is `Ok(0)`, never an error.
//! - A descriptor's `fields` lists exactly the keys its decoder emits.
//! - Report outputs are deterministic for a given capture and registry.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use rfsense_core::{DeviceRegistry, analyze_pulse_file};
//!
//! let registry = DeviceRegistry::builtin();
//! let report = analyze_pulse_file(Path::new("capture.jsonl"), &registry)?;
//! println!("records: {}", report.summary.records_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

mod analysis;
mod bitbuffer;
mod demod;
mod device;
pub mod protocols;
mod record;
mod source;

pub use analysis::{AnalysisError, analyze_pulse_file, analyze_source};
pub use bitbuffer::{BITBUF_COLS, BITBUF_MAX_ROW_BITS, BITBUF_ROWS, BitBuffer, BitBufferError};
pub use demod::{Demodulator, Limits, Modulation, Pulse, PulseDemodulator};
pub use device::{
    BUILTIN_DEVICES, DecodeContext, DecodeError, Decoder, DeviceDescriptor, DeviceRegistry,
    DispatchError, RegistryError, dispatch,
};
pub use record::{Field, FieldValue, Record, RecordSink};
pub use source::{CaptureWindow, MAX_WINDOW_PULSES, PulseFileSource, PulseSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Timestamp used when no capture time is available.
pub const DEFAULT_TIME: &str = "1970-01-01T00:00:00Z";

/// Decoded capture with deterministic ordering.
///
/// # Examples
/// ```
/// use rfsense_core::make_stub_report;
///
/// let report = make_stub_report("capture.jsonl", 123);
/// assert_eq!(report.report_version, rfsense_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the last timed window.
    pub generated_at: String,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Totals over the whole capture.
    pub summary: DecodeSummary,
    /// Per-window outcome in capture order.
    pub windows: Vec<WindowSummary>,
    /// Records in emission order.
    pub records: Vec<Record>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use rfsense_core::InputInfo;
///
/// let input = InputInfo {
///     path: "capture.jsonl".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DecodeSummary {
    pub windows_total: u64,
    pub records_total: u64,
    /// Enabled devices in dispatch order.
    pub devices: Vec<String>,
}

/// Outcome of one capture window.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    /// Zero-based position in the capture.
    pub index: u64,
    /// RFC3339 capture time, if the window carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    /// Records emitted for this window across all devices.
    pub decoded: usize,
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "rfsense".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_TIME.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: DecodeSummary::default(),
        windows: vec![],
        records: vec![],
    }
}
