mod jsonl;

pub use jsonl::PulseFileSource;

use thiserror::Error;

use crate::demod::Pulse;

/// Longest pulse sequence accepted for one capture window.
pub const MAX_WINDOW_PULSES: usize = 1200;

/// One bounded span of captured pulses.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureWindow {
    /// Capture time in seconds since the Unix epoch, when known.
    pub ts: Option<f64>,
    pub pulses: Vec<Pulse>,
}

/// Supplier of capture windows.
pub trait PulseSource {
    fn next_window(&mut self) -> Result<Option<CaptureWindow>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed capture line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("capture line {line} holds {pulses} pulses (limit {})", MAX_WINDOW_PULSES)]
    WindowTooLarge { line: usize, pulses: usize },
}
