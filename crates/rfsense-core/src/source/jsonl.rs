//! JSON Lines capture files.
//!
//! One capture window per line:
//! `{"ts": 1700000000.0, "pulses": [[500, 6000], [500, 1000], ...]}` with
//! `ts` optional and each pulse given as `[pulse_us, gap_us]`. Blank lines
//! and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use super::{CaptureWindow, MAX_WINDOW_PULSES, PulseSource, SourceError};
use crate::demod::Pulse;
use crate::device::ts_to_rfc3339;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowLine {
    #[serde(default)]
    ts: Option<f64>,
    pulses: Vec<[u32; 2]>,
}

/// `PulseSource` reading a JSON Lines capture.
pub struct PulseFileSource<R = BufReader<File>> {
    reader: R,
    line_no: usize,
    line: String,
}

impl PulseFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> PulseFileSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            line: String::new(),
        }
    }
}

impl<R: BufRead> PulseSource for PulseFileSource<R> {
    fn next_window(&mut self) -> Result<Option<CaptureWindow>, SourceError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let text = self.line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return parse_window(text, self.line_no).map(Some);
        }
    }
}

fn parse_window(text: &str, line: usize) -> Result<CaptureWindow, SourceError> {
    let parsed: WindowLine =
        serde_json::from_str(text).map_err(|err| SourceError::Malformed {
            line,
            message: err.to_string(),
        })?;
    if parsed.pulses.len() > MAX_WINDOW_PULSES {
        return Err(SourceError::WindowTooLarge {
            line,
            pulses: parsed.pulses.len(),
        });
    }
    if let Some(ts) = parsed.ts {
        if !ts.is_finite() || ts < 0.0 {
            return Err(SourceError::Malformed {
                line,
                message: format!("invalid timestamp {ts}"),
            });
        }
        if ts_to_rfc3339(Some(ts)).is_none() {
            return Err(SourceError::Malformed {
                line,
                message: format!("timestamp {ts} out of range"),
            });
        }
    }
    Ok(CaptureWindow {
        ts: parsed.ts,
        pulses: parsed
            .pulses
            .into_iter()
            .map(|[pulse_us, gap_us]| Pulse::new(pulse_us, gap_us))
            .collect(),
    })
}
